//! YAML configuration for houndfetch.
//!
//! XDG-compliant lookup: the first existing file among [`config_paths`]
//! wins. Problems with a file are logged and the defaults are used, so a
//! broken config never stops the display.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use houndfetch_core::logo::AUTO;
use houndfetch_core::{FetchError, Field, LogoChoice};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Directory name under the config roots.
const APP_DIR: &str = "houndfetch";
const FILE_NAME: &str = "config.yaml";

/// Disabled unless asked for: it would need a network lookup.
const OFF_BY_DEFAULT: &[Field] = &[Field::RemoteIp];

/// Settings read from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Catalog logo name or `auto`.
    pub logo: String,
    /// Logo document on disk; takes precedence over `logo`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_file: Option<PathBuf>,
    /// Per-field switches keyed by field name. Unlisted fields keep their
    /// default.
    pub fields: BTreeMap<String, bool>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            logo: AUTO.to_string(),
            logo_file: None,
            fields: BTreeMap::new(),
        }
    }
}

/// Config files to search, most specific first.
/// Order: `$XDG_CONFIG_HOME/houndfetch`, `~/.config/houndfetch`, `/etc/houndfetch`
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config.is_empty() {
            paths.push(PathBuf::from(xdg_config).join(APP_DIR).join(FILE_NAME));
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config").join(APP_DIR).join(FILE_NAME));
    }

    paths.push(PathBuf::from("/etc").join(APP_DIR).join(FILE_NAME));
    paths
}

impl FetchConfig {
    /// Load from the first existing file in [`config_paths`], or defaults.
    pub fn load() -> Self {
        Self::load_first(&config_paths())
    }

    /// Load from the first of `paths` that exists.
    pub fn load_first(paths: &[PathBuf]) -> Self {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load_or_default(path),
            None => {
                debug!("no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load `path`, logging and falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from_file(path).unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, "ignoring config file, using defaults");
            Self::default()
        })
    }

    /// Read and parse a config file.
    pub fn load_from_file(path: &Path) -> Result<Self, FetchError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse_yaml(&contents)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse YAML and validate field names.
    pub fn parse_yaml(contents: &str) -> Result<Self, FetchError> {
        // An empty document deserializes to unit, not a mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml_ng::from_str(contents).map_err(|e| FetchError::Config(e.to_string()))?;
        config.field_overrides()?;
        Ok(config)
    }

    /// The `fields` map with keys resolved to [`Field`]s.
    pub fn field_overrides(&self) -> Result<Vec<(Field, bool)>, FetchError> {
        self.fields
            .iter()
            .map(|(key, &on)| key.parse::<Field>().map(|field| (field, on)))
            .collect()
    }

    /// Enabled fields in canonical order.
    pub fn enabled_fields(&self) -> Result<Vec<Field>, FetchError> {
        let overrides = self.field_overrides()?;
        Ok(Field::ALL
            .into_iter()
            .filter(|field| {
                overrides
                    .iter()
                    .rev()
                    .find(|(f, _)| f == field)
                    .map_or_else(|| !OFF_BY_DEFAULT.contains(field), |&(_, on)| on)
            })
            .collect())
    }

    /// Switch fields on or off, later calls winning.
    pub fn set_fields(&mut self, fields: &[Field], on: bool) {
        for field in fields {
            self.fields.insert(field.key().to_string(), on);
        }
    }

    /// Where the logo comes from. A `logo_file` is read here; failing to
    /// read it is fatal, like a malformed document.
    pub fn logo_choice(&self) -> Result<LogoChoice, FetchError> {
        match &self.logo_file {
            Some(path) => {
                let document = fs::read_to_string(path)?;
                Ok(LogoChoice::Document(document))
            }
            None => Ok(LogoChoice::Named(self.logo.clone())),
        }
    }

    /// Default configuration as YAML.
    pub fn default_yaml() -> String {
        let mut yaml = String::from(
            "# houndfetch configuration file\n\
             # Location: ~/.config/houndfetch/config.yaml\n\
             \n\
             # Logo: `auto` picks one from the detected distribution.\n\
             # Set `logo_file` to a path to use your own document.\n\
             logo: auto\n\
             \n\
             # Fields, drawn top to bottom in this order\n\
             fields:\n",
        );
        for field in Field::ALL {
            let on = !OFF_BY_DEFAULT.contains(&field);
            yaml.push_str(&format!("  {}: {on}\n", field.key()));
        }
        yaml
    }
}
