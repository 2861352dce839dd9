//! Raw host facts supplied by collaborators.
//!
//! The compositor never reads the OS itself. Everything it displays comes
//! through a [`FactSource`], one method per raw value.

use crate::error::FieldDataUnavailable;

/// A raw value, or the reason it could not be gathered.
pub type Fact<T> = Result<T, FieldDataUnavailable>;

/// Used and total memory in megabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    /// Megabytes in use.
    pub used_mb: i64,
    /// Megabytes installed.
    pub total_mb: i64,
}

/// Supplier of raw host facts.
///
/// Calls are blocking and made in canonical field order, at most once per
/// field per pass.
pub trait FactSource {
    /// Login name.
    fn user(&self) -> Fact<String>;
    /// Host name.
    fn host(&self) -> Fact<String>;
    /// Human-readable OS name (e.g. `Arch Linux`).
    fn os_pretty_name(&self) -> Fact<String>;
    /// CPU architecture (e.g. `x86_64`).
    fn architecture(&self) -> Fact<String>;
    /// Kernel name and release.
    fn kernel(&self) -> Fact<String>;
    /// Seconds since boot.
    fn uptime_secs(&self) -> Fact<i64>;
    /// Login shell.
    fn shell(&self) -> Fact<String>;
    /// Connected display resolutions.
    fn resolutions(&self) -> Fact<Vec<String>>;
    /// CPU model.
    fn cpu(&self) -> Fact<String>;
    /// Detected GPUs.
    fn gpus(&self) -> Fact<Vec<String>>;
    /// Memory usage.
    fn memory(&self) -> Fact<MemoryUsage>;
    /// Address of the outbound interface.
    fn local_ip(&self) -> Fact<String>;
    /// Public address as seen from outside.
    fn remote_ip(&self) -> Fact<String>;
    /// Distro identifier used for `auto` logo selection.
    fn distro_id(&self) -> Fact<String>;
}

/// Treat an empty string like a failed lookup.
pub fn non_empty(what: &'static str, fact: Fact<String>) -> Fact<String> {
    match fact {
        Ok(value) if value.trim().is_empty() => {
            Err(FieldDataUnavailable::new(what, "collaborator returned an empty value"))
        }
        other => other.map(|value| value.trim().to_string()),
    }
}

/// In-memory [`FactSource`] with fixed values.
///
/// Every fact starts unavailable; builder setters fill them in.
#[derive(Debug, Clone)]
pub struct StaticFacts {
    user: Fact<String>,
    host: Fact<String>,
    os_pretty_name: Fact<String>,
    architecture: Fact<String>,
    kernel: Fact<String>,
    uptime_secs: Fact<i64>,
    shell: Fact<String>,
    resolutions: Fact<Vec<String>>,
    cpu: Fact<String>,
    gpus: Fact<Vec<String>>,
    memory: Fact<MemoryUsage>,
    local_ip: Fact<String>,
    remote_ip: Fact<String>,
    distro_id: Fact<String>,
}

fn missing<T>(what: &'static str) -> Fact<T> {
    Err(FieldDataUnavailable::new(what, "not provided"))
}

impl Default for StaticFacts {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticFacts {
    /// All facts unavailable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: missing("user"),
            host: missing("host"),
            os_pretty_name: missing("os_pretty_name"),
            architecture: missing("architecture"),
            kernel: missing("kernel"),
            uptime_secs: missing("uptime_secs"),
            shell: missing("shell"),
            resolutions: missing("resolutions"),
            cpu: missing("cpu"),
            gpus: missing("gpus"),
            memory: missing("memory"),
            local_ip: missing("local_ip"),
            remote_ip: missing("remote_ip"),
            distro_id: missing("distro_id"),
        }
    }

    /// Fixed values for a deterministic demo render.
    #[must_use]
    pub fn demo() -> Self {
        Self::new()
            .with_user("hound")
            .with_host("kennel")
            .with_os("Houndix Linux", "x86_64")
            .with_kernel("Linux 6.9.0-hound")
            .with_uptime(93_784)
            .with_shell("zsh")
            .with_resolutions(["2560x1440"])
            .with_cpu("Retriever R9 7950X (32) @ 4.50 GHz")
            .with_gpus(["NVIDIA GeForce RTX 4070", "Intel UHD Graphics 770"])
            .with_memory(6_144, 32_768)
            .with_local_ip("192.168.1.42")
            .with_distro_id("default")
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Ok(user.into());
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Ok(host.into());
        self
    }

    #[must_use]
    pub fn with_os(mut self, pretty_name: impl Into<String>, arch: impl Into<String>) -> Self {
        self.os_pretty_name = Ok(pretty_name.into());
        self.architecture = Ok(arch.into());
        self
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: impl Into<String>) -> Self {
        self.kernel = Ok(kernel.into());
        self
    }

    #[must_use]
    pub fn with_uptime(mut self, secs: i64) -> Self {
        self.uptime_secs = Ok(secs);
        self
    }

    #[must_use]
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Ok(shell.into());
        self
    }

    #[must_use]
    pub fn with_resolutions<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resolutions = Ok(items.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = Ok(cpu.into());
        self
    }

    #[must_use]
    pub fn with_gpus<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gpus = Ok(items.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_memory(mut self, used_mb: i64, total_mb: i64) -> Self {
        self.memory = Ok(MemoryUsage { used_mb, total_mb });
        self
    }

    #[must_use]
    pub fn with_local_ip(mut self, ip: impl Into<String>) -> Self {
        self.local_ip = Ok(ip.into());
        self
    }

    #[must_use]
    pub fn with_remote_ip(mut self, ip: impl Into<String>) -> Self {
        self.remote_ip = Ok(ip.into());
        self
    }

    #[must_use]
    pub fn with_distro_id(mut self, id: impl Into<String>) -> Self {
        self.distro_id = Ok(id.into());
        self
    }
}

impl FactSource for StaticFacts {
    fn user(&self) -> Fact<String> {
        self.user.clone()
    }

    fn host(&self) -> Fact<String> {
        self.host.clone()
    }

    fn os_pretty_name(&self) -> Fact<String> {
        self.os_pretty_name.clone()
    }

    fn architecture(&self) -> Fact<String> {
        self.architecture.clone()
    }

    fn kernel(&self) -> Fact<String> {
        self.kernel.clone()
    }

    fn uptime_secs(&self) -> Fact<i64> {
        self.uptime_secs.clone()
    }

    fn shell(&self) -> Fact<String> {
        self.shell.clone()
    }

    fn resolutions(&self) -> Fact<Vec<String>> {
        self.resolutions.clone()
    }

    fn cpu(&self) -> Fact<String> {
        self.cpu.clone()
    }

    fn gpus(&self) -> Fact<Vec<String>> {
        self.gpus.clone()
    }

    fn memory(&self) -> Fact<MemoryUsage> {
        self.memory.clone()
    }

    fn local_ip(&self) -> Fact<String> {
        self.local_ip.clone()
    }

    fn remote_ip(&self) -> Fact<String> {
        self.remote_ip.clone()
    }

    fn distro_id(&self) -> Fact<String> {
        self.distro_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_facts_start_unavailable() {
        let facts = StaticFacts::new();
        assert!(facts.user().is_err());
        assert!(facts.gpus().is_err());
        assert_eq!(facts.kernel().unwrap_err().what, "kernel");
    }

    #[test]
    fn test_static_facts_builder() {
        let facts = StaticFacts::new()
            .with_user("alice")
            .with_host("box")
            .with_memory(512, 1024)
            .with_gpus(["a", "b"]);
        assert_eq!(facts.user().unwrap(), "alice");
        assert_eq!(facts.host().unwrap(), "box");
        assert_eq!(
            facts.memory().unwrap(),
            MemoryUsage {
                used_mb: 512,
                total_mb: 1024
            }
        );
        assert_eq!(facts.gpus().unwrap().len(), 2);
    }

    #[test]
    fn test_demo_facts_are_complete_except_remote() {
        let facts = StaticFacts::demo();
        assert!(facts.user().is_ok());
        assert!(facts.uptime_secs().is_ok());
        assert!(facts.remote_ip().is_err());
    }

    #[test]
    fn test_non_empty_rejects_blank() {
        let fact = non_empty("shell", Ok("   ".to_string()));
        assert_eq!(fact.unwrap_err().what, "shell");
    }

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty("cpu", Ok(" x86 \n".to_string())).unwrap(), "x86");
    }

    #[test]
    fn test_non_empty_passes_errors_through() {
        let err = FieldDataUnavailable::new("kernel", "boom");
        assert_eq!(non_empty("kernel", Err(err.clone())).unwrap_err(), err);
    }
}
