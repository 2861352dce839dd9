//! The live [`FactSource`]: sysinfo plus a few OS reads.
//!
//! Every lookup degrades to [`FieldDataUnavailable`]; nothing here can fail
//! the run. The text parsers are kept pure so they can be tested without
//! the tools installed.

use std::net::UdpSocket;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

use houndfetch_core::{Fact, FactSource, FieldDataUnavailable, MemoryUsage};
use regex::Regex;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, System};
use tracing::debug;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Any routable address; no packet is sent by a UDP connect.
const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

const OS_RELEASE: &str = "/etc/os-release";

fn lspci_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""(?:VGA|3D|Display)[^"]*" "([^"]*)" "([^"]*)""#)
            .expect("lspci pattern is valid")
    })
}

fn bracket_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]*)\][^\[]*$").expect("bracket pattern is valid"))
}

fn xrandr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\S+\s+connected\b.*?\b(\d+x\d+)\+\d+\+\d+")
            .expect("xrandr pattern is valid")
    })
}

fn pretty_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^PRETTY_NAME="?([^"\n]*)"?\s*$"#).expect("os-release pattern is valid")
    })
}

fn chipset_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*Chipset Model:[ \t]*(\S.*?)[ \t]*$")
            .expect("chipset pattern is valid")
    })
}

fn profiler_resolution_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*Resolution:[ \t]*(\d+)[ \t]*x[ \t]*(\d+)")
            .expect("profiler resolution pattern is valid")
    })
}

fn spaces_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Short vendor name for a PCI vendor string.
pub fn normalize_vendor(vendor: &str) -> &str {
    if vendor.contains("Intel") {
        "Intel"
    } else if vendor.contains("NVIDIA") {
        "NVIDIA"
    } else if vendor.contains("AMD") || vendor.contains("ATI") {
        "AMD"
    } else {
        vendor.trim()
    }
}

/// GPUs from `lspci -mm` output, as `"<vendor> <model>"`.
///
/// The model is the last bracketed part of the device name
/// (`"GA106 [GeForce RTX 3060]"` gives `GeForce RTX 3060`), or the whole
/// name when it has none.
pub fn parse_lspci(output: &str) -> Vec<String> {
    lspci_regex()
        .captures_iter(output)
        .map(|caps| {
            let vendor = normalize_vendor(&caps[1]);
            let device = &caps[2];
            let model = bracket_regex()
                .captures(device)
                .map_or(device, |m| m.get(1).map_or(device, |g| g.as_str()));
            format!("{vendor} {}", model.trim())
        })
        .collect()
}

/// Active modes (`WxH`) of connected outputs in `xrandr --current` output.
pub fn parse_xrandr(output: &str) -> Vec<String> {
    xrandr_regex()
        .captures_iter(output)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Graphics chipsets in `system_profiler SPDisplaysDataType` output.
pub fn parse_profiler_gpus(output: &str) -> Vec<String> {
    chipset_regex()
        .captures_iter(output)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Display resolutions (`WxH`) in `system_profiler SPDisplaysDataType`
/// output. Trailing qualifiers such as `Retina` are dropped.
pub fn parse_profiler_resolutions(output: &str) -> Vec<String> {
    profiler_resolution_regex()
        .captures_iter(output)
        .map(|caps| format!("{}x{}", &caps[1], &caps[2]))
        .collect()
}

/// `PRETTY_NAME` from an os-release file.
pub fn parse_os_release(contents: &str) -> Option<String> {
    pretty_name_regex()
        .captures(contents)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Final path component of a login shell.
pub fn shell_name(shell: &str) -> Option<String> {
    Path::new(shell.trim())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn env_var(what: &'static str, names: &[&str]) -> Fact<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| FieldDataUnavailable::new(what, format!("{} not set", names.join("/"))))
}

fn command_stdout(what: &'static str, program: &str, args: &[&str]) -> Fact<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| FieldDataUnavailable::new(what, format!("{program}: {e}")))?;
    if !output.status.success() {
        return Err(FieldDataUnavailable::new(
            what,
            format!("{program} exited with {}", output.status),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// macOS has neither `lspci` nor `xrandr`; one profiler report covers both.
fn uses_system_profiler() -> bool {
    std::env::consts::OS == "macos"
}

fn display_report(what: &'static str) -> Fact<String> {
    command_stdout(what, "system_profiler", &["SPDisplaysDataType"])
}

fn some_or(what: &'static str, value: Option<String>) -> Fact<String> {
    value.ok_or_else(|| FieldDataUnavailable::new(what, "not reported by the system"))
}

fn kernel_family() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

fn to_mb(bytes: u64) -> i64 {
    i64::try_from(bytes / BYTES_PER_MB).unwrap_or(i64::MAX)
}

/// Facts about the running machine.
pub struct SystemFacts {
    system: System,
}

impl std::fmt::Debug for SystemFacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemFacts").finish_non_exhaustive()
    }
}

impl Default for SystemFacts {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemFacts {
    /// Refresh the CPU and memory tables once.
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_specifics(CpuRefreshKind::everything());
        system.refresh_memory_specifics(MemoryRefreshKind::everything());
        debug!(cpus = system.cpus().len(), "system probe ready");
        Self { system }
    }
}

impl FactSource for SystemFacts {
    fn user(&self) -> Fact<String> {
        env_var("user", &["USER", "LOGNAME"])
    }

    fn host(&self) -> Fact<String> {
        some_or("host", System::host_name())
    }

    fn os_pretty_name(&self) -> Fact<String> {
        let from_release = std::fs::read_to_string(OS_RELEASE)
            .ok()
            .and_then(|contents| parse_os_release(&contents));
        some_or("os_pretty_name", from_release.or_else(System::long_os_version))
    }

    fn architecture(&self) -> Fact<String> {
        Ok(std::env::consts::ARCH.to_string())
    }

    fn kernel(&self) -> Fact<String> {
        some_or(
            "kernel",
            System::kernel_version().map(|version| format!("{} {version}", kernel_family())),
        )
    }

    fn uptime_secs(&self) -> Fact<i64> {
        Ok(i64::try_from(System::uptime()).unwrap_or(i64::MAX))
    }

    fn shell(&self) -> Fact<String> {
        let shell = env_var("shell", &["SHELL"])?;
        some_or("shell", shell_name(&shell))
    }

    fn resolutions(&self) -> Fact<Vec<String>> {
        if uses_system_profiler() {
            return display_report("resolutions").map(|out| parse_profiler_resolutions(&out));
        }
        command_stdout("resolutions", "xrandr", &["--current"]).map(|out| parse_xrandr(&out))
    }

    fn cpu(&self) -> Fact<String> {
        let cpus = self.system.cpus();
        let brand = cpus
            .first()
            .map(|cpu| spaces_regex().replace_all(cpu.brand().trim(), " ").into_owned())
            .filter(|brand| !brand.is_empty());
        some_or("cpu", brand.map(|brand| format!("{brand} ({})", cpus.len())))
    }

    fn gpus(&self) -> Fact<Vec<String>> {
        if uses_system_profiler() {
            return display_report("gpus").map(|out| parse_profiler_gpus(&out));
        }
        command_stdout("gpus", "lspci", &["-mm"]).map(|out| parse_lspci(&out))
    }

    fn memory(&self) -> Fact<MemoryUsage> {
        let total = self.system.total_memory();
        if total == 0 {
            return Err(FieldDataUnavailable::new("memory", "total memory is zero"));
        }
        Ok(MemoryUsage {
            used_mb: to_mb(self.system.used_memory()),
            total_mb: to_mb(total),
        })
    }

    fn local_ip(&self) -> Fact<String> {
        let unavailable = |e: std::io::Error| FieldDataUnavailable::new("local_ip", e.to_string());
        let socket = UdpSocket::bind("0.0.0.0:0").map_err(unavailable)?;
        socket.connect(ROUTE_PROBE_ADDR).map_err(unavailable)?;
        Ok(socket.local_addr().map_err(unavailable)?.ip().to_string())
    }

    fn remote_ip(&self) -> Fact<String> {
        Err(FieldDataUnavailable::new("remote_ip", "remote lookup is not performed"))
    }

    fn distro_id(&self) -> Fact<String> {
        Ok(System::distribution_id())
    }
}
