//! Command-line flags and how they combine with the config file.

use std::path::PathBuf;

use clap::Parser;
use houndfetch_core::{FetchError, Field, LogoChoice};
use tracing::Level;

use crate::config::FetchConfig;

/// Show system information beside an ASCII logo
#[derive(Debug, Clone, Parser)]
#[command(name = "houndfetch", version, about, long_about = None)]
pub struct Cli {
    /// Logo to draw: a catalog name or `auto`
    #[arg(short, long, value_name = "NAME")]
    pub logo: Option<String>,

    /// Draw a logo document from this file instead of the catalog
    #[arg(long, value_name = "PATH", conflicts_with = "logo")]
    pub logo_file: Option<PathBuf>,

    /// Path to custom config file (YAML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Turn fields on (comma separated or repeated)
    #[arg(short, long, value_name = "FIELD", value_delimiter = ',', num_args = 1..)]
    pub enable: Vec<Field>,

    /// Turn fields off (comma separated or repeated)
    #[arg(short, long, value_name = "FIELD", value_delimiter = ',', num_args = 1..)]
    pub disable: Vec<Field>,

    /// Disable colors (cursor movement is kept)
    #[arg(long)]
    pub no_color: bool,

    /// Render fixed sample data instead of probing this machine
    #[arg(long)]
    pub demo: bool,

    /// List the built-in logos and exit
    #[arg(long)]
    pub list_logos: bool,

    /// Dump default configuration to stdout and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a run needs after flags and config are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub logo: LogoChoice,
    pub fields: Vec<Field>,
    pub color: bool,
    pub demo: bool,
}

impl Cli {
    /// Default filter level when `HOUNDFETCH_LOG` is unset.
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }

    /// Load the config named by `--config`, or search the usual places.
    pub fn load_config(&self) -> FetchConfig {
        match &self.config {
            Some(path) => FetchConfig::load_or_default(path),
            None => FetchConfig::load(),
        }
    }

    /// Apply flags on top of `config`. Flags win.
    pub fn merge(&self, mut config: FetchConfig) -> Result<RunOptions, FetchError> {
        if let Some(logo) = &self.logo {
            config.logo = logo.clone();
            config.logo_file = None;
        }
        if let Some(path) = &self.logo_file {
            config.logo_file = Some(path.clone());
        }
        config.set_fields(&self.enable, true);
        config.set_fields(&self.disable, false);

        Ok(RunOptions {
            logo: config.logo_choice()?,
            fields: config.enabled_fields()?,
            color: !self.no_color,
            demo: self.demo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("houndfetch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).merge(FetchConfig::default()).unwrap();
        assert_eq!(options.logo, LogoChoice::Named("auto".into()));
        assert!(options.color);
        assert!(!options.demo);
        assert!(!options.fields.contains(&Field::RemoteIp));
    }

    #[test]
    fn test_enable_and_disable_lists() {
        let cli = parse(&["--enable", "remoteip", "--disable", "logo,colors"]);
        let options = cli.merge(FetchConfig::default()).unwrap();
        assert!(options.fields.contains(&Field::RemoteIp));
        assert!(!options.fields.contains(&Field::Logo));
        assert!(!options.fields.contains(&Field::Colors));
    }

    #[test]
    fn test_disable_wins_over_enable() {
        let cli = parse(&["--enable", "gpu", "--disable", "gpu"]);
        let options = cli.merge(FetchConfig::default()).unwrap();
        assert!(!options.fields.contains(&Field::Gpu));
    }

    #[test]
    fn test_unknown_field_flag_rejected() {
        let result = Cli::try_parse_from(["houndfetch", "--enable", "battery"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_logo_flag_overrides_config_file() {
        let config = FetchConfig {
            logo_file: Some(PathBuf::from("/nonexistent/logo.txt")),
            ..FetchConfig::default()
        };
        let options = parse(&["--logo", "arch"]).merge(config).unwrap();
        assert_eq!(options.logo, LogoChoice::Named("arch".into()));
    }

    #[test]
    fn test_missing_logo_file_is_fatal() {
        let cli = parse(&["--logo-file", "/nonexistent/houndfetch-logo.txt"]);
        let err = cli.merge(FetchConfig::default()).unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }

    #[test]
    fn test_logo_and_logo_file_conflict() {
        let result = Cli::try_parse_from(["houndfetch", "--logo", "arch", "--logo-file", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["--no-color", "--demo", "-v"]);
        assert_eq!(cli.log_level(), Level::DEBUG);
        let options = cli.merge(FetchConfig::default()).unwrap();
        assert!(!options.color);
        assert!(options.demo);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
