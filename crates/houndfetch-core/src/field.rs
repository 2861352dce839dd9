//! Fields and their line rendering.
//!
//! Each enabled field gathers its raw facts once ([`gather`]) and turns them
//! into zero or more color-templated [`Line`]s ([`render`]). A failed or empty
//! fact never aborts the pass; the field shows `n/a` instead.

use std::fmt;
use std::str::FromStr;

use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::color::{ColorId, INDEXED_COLORS};
use crate::error::{FetchError, FieldDataUnavailable};
use crate::facts::{non_empty, Fact, FactSource, MemoryUsage};
use crate::format::{format_memory, format_uptime, NOT_AVAILABLE};

/// One terminal row of template text (may contain `${...}` placeholders).
pub type Line = String;

/// Swatches per physical row of the `colors` field.
pub const SWATCHES_PER_ROW: usize = 8;

/// Glyph drawn for each color swatch.
pub const SWATCH: &str = "███";

/// A displayable field, declared in canonical stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Logo,
    UserLine,
    UserUnderline,
    Os,
    Kernel,
    Uptime,
    Shell,
    Resolution,
    Cpu,
    Gpu,
    Memory,
    LocalIp,
    RemoteIp,
    Colors,
}

impl Field {
    /// Every field in canonical order.
    pub const ALL: [Self; 14] = [
        Self::Logo,
        Self::UserLine,
        Self::UserUnderline,
        Self::Os,
        Self::Kernel,
        Self::Uptime,
        Self::Shell,
        Self::Resolution,
        Self::Cpu,
        Self::Gpu,
        Self::Memory,
        Self::LocalIp,
        Self::RemoteIp,
        Self::Colors,
    ];

    /// Configuration key for this field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::UserLine => "userline",
            Self::UserUnderline => "userunderline",
            Self::Os => "os",
            Self::Kernel => "kernel",
            Self::Uptime => "uptime",
            Self::Shell => "shell",
            Self::Resolution => "resolution",
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
            Self::Memory => "memory",
            Self::LocalIp => "localip",
            Self::RemoteIp => "remoteip",
            Self::Colors => "colors",
        }
    }

    /// Label shown before the value, if the field has one.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Os => Some("OS"),
            Self::Kernel => Some("Kernel"),
            Self::Uptime => Some("Uptime"),
            Self::Shell => Some("Shell"),
            Self::Resolution => Some("Resolution"),
            Self::Cpu => Some("CPU"),
            Self::Gpu => Some("GPU"),
            Self::Memory => Some("Memory"),
            Self::LocalIp => Some("Local IP"),
            Self::RemoteIp => Some("Remote IP"),
            Self::Logo | Self::UserLine | Self::UserUnderline | Self::Colors => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| FetchError::UnknownField(key.to_string()))
    }
}

/// Raw facts gathered for one non-logo field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldData {
    UserLine { user: Fact<String>, host: Fact<String> },
    UserUnderline { user: Fact<String>, host: Fact<String> },
    Os { name: Fact<String>, arch: Fact<String> },
    Kernel(Fact<String>),
    Uptime(Fact<i64>),
    Shell(Fact<String>),
    Resolution(Fact<Vec<String>>),
    Cpu(Fact<String>),
    Gpu(Fact<Vec<String>>),
    Memory(Fact<MemoryUsage>),
    LocalIp(Fact<String>),
    RemoteIp(Fact<String>),
    Colors,
}

impl FieldData {
    /// The field this data belongs to.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::UserLine { .. } => Field::UserLine,
            Self::UserUnderline { .. } => Field::UserUnderline,
            Self::Os { .. } => Field::Os,
            Self::Kernel(_) => Field::Kernel,
            Self::Uptime(_) => Field::Uptime,
            Self::Shell(_) => Field::Shell,
            Self::Resolution(_) => Field::Resolution,
            Self::Cpu(_) => Field::Cpu,
            Self::Gpu(_) => Field::Gpu,
            Self::Memory(_) => Field::Memory,
            Self::LocalIp(_) => Field::LocalIp,
            Self::RemoteIp(_) => Field::RemoteIp,
            Self::Colors => Field::Colors,
        }
    }
}

/// Call the collaborators `field` needs. `None` for [`Field::Logo`].
pub fn gather(field: Field, source: &dyn FactSource) -> Option<FieldData> {
    let data = match field {
        Field::Logo => return None,
        Field::UserLine => FieldData::UserLine {
            user: non_empty("user", source.user()),
            host: non_empty("host", source.host()),
        },
        Field::UserUnderline => FieldData::UserUnderline {
            user: non_empty("user", source.user()),
            host: non_empty("host", source.host()),
        },
        Field::Os => FieldData::Os {
            name: non_empty("os_pretty_name", source.os_pretty_name()),
            arch: non_empty("architecture", source.architecture()),
        },
        Field::Kernel => FieldData::Kernel(non_empty("kernel", source.kernel())),
        Field::Uptime => FieldData::Uptime(source.uptime_secs()),
        Field::Shell => FieldData::Shell(non_empty("shell", source.shell())),
        Field::Resolution => FieldData::Resolution(source.resolutions()),
        Field::Cpu => FieldData::Cpu(non_empty("cpu", source.cpu())),
        Field::Gpu => FieldData::Gpu(source.gpus()),
        Field::Memory => FieldData::Memory(source.memory()),
        Field::LocalIp => FieldData::LocalIp(non_empty("local_ip", source.local_ip())),
        Field::RemoteIp => FieldData::RemoteIp(non_empty("remote_ip", source.remote_ip())),
        Field::Colors => FieldData::Colors,
    };
    Some(data)
}

fn or_not_available(field: Field, fact: &Fact<String>) -> String {
    match fact {
        Ok(value) => value.clone(),
        Err(err) => {
            log_unavailable(field, err);
            NOT_AVAILABLE.to_string()
        }
    }
}

fn log_unavailable(field: Field, err: &FieldDataUnavailable) {
    debug!(%field, %err, "field degraded to n/a");
}

fn labeled(field: Field, value: &str) -> Line {
    match field.label() {
        Some(label) => format!("${{caccent}}{label}${{creset}}: {value}"),
        None => value.to_string(),
    }
}

fn list_lines(field: Field, fact: &Fact<Vec<String>>) -> Vec<Line> {
    let items: Vec<&str> = match fact {
        Ok(items) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .collect(),
        Err(err) => {
            log_unavailable(field, err);
            Vec::new()
        }
    };
    if items.is_empty() {
        // Enabled but empty still takes one row
        return vec![labeled(field, NOT_AVAILABLE)];
    }
    items.into_iter().map(|item| labeled(field, item)).collect()
}

/// The `colors` field: one swatch per indexed color, wrapped every
/// [`SWATCHES_PER_ROW`] swatches.
#[must_use]
pub fn color_swatches() -> Vec<Line> {
    swatch_rows(INDEXED_COLORS, SWATCHES_PER_ROW)
}

/// Swatches for colors `0..colors`, `per_row` to a row, each row reset.
#[must_use]
pub fn swatch_rows(colors: u8, per_row: usize) -> Vec<Line> {
    let swatches: Vec<String> = (0..colors)
        .map(|n| format!("{}{SWATCH}", ColorId::Indexed(n).placeholder()))
        .collect();
    swatches
        .chunks(per_row.max(1))
        .map(|row| format!("{}{}", row.concat(), ColorId::Reset.placeholder()))
        .collect()
}

/// Render gathered facts to template lines.
#[must_use]
pub fn render(data: &FieldData) -> Vec<Line> {
    let field = data.field();
    match data {
        FieldData::UserLine { user, host } => {
            let user = or_not_available(field, user);
            let host = or_not_available(field, host);
            vec![format!(
                "${{caccent}}{user}${{creset}}@${{caccent}}{host}${{creset}}"
            )]
        }
        FieldData::UserUnderline { user, host } => {
            let user = or_not_available(field, user);
            let host = or_not_available(field, host);
            let width = UnicodeWidthStr::width(user.as_str()) + UnicodeWidthStr::width(host.as_str());
            vec!["-".repeat(width)]
        }
        FieldData::Os { name, arch } => {
            let value = match (name, arch) {
                (Ok(name), Ok(arch)) => format!("{name} {arch}"),
                (Ok(name), Err(err)) => {
                    log_unavailable(field, err);
                    name.clone()
                }
                (Err(err), _) => {
                    log_unavailable(field, err);
                    NOT_AVAILABLE.to_string()
                }
            };
            vec![labeled(field, &value)]
        }
        FieldData::Kernel(fact)
        | FieldData::Shell(fact)
        | FieldData::Cpu(fact)
        | FieldData::LocalIp(fact)
        | FieldData::RemoteIp(fact) => vec![labeled(field, &or_not_available(field, fact))],
        FieldData::Uptime(fact) => {
            let value = match fact {
                Ok(secs) => format_uptime(*secs),
                Err(err) => {
                    log_unavailable(field, err);
                    NOT_AVAILABLE.to_string()
                }
            };
            vec![labeled(field, &value)]
        }
        FieldData::Resolution(fact) | FieldData::Gpu(fact) => list_lines(field, fact),
        FieldData::Memory(fact) => {
            let value = match fact {
                Ok(usage) => format_memory(*usage),
                Err(err) => {
                    log_unavailable(field, err);
                    NOT_AVAILABLE.to_string()
                }
            };
            vec![labeled(field, &value)]
        }
        FieldData::Colors => color_swatches(),
    }
}
