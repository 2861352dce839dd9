//! houndfetch: system information beside an ASCII logo
//!
//! Run: cargo run -p houndfetch-cli -- --demo

use std::io;
use std::process::ExitCode;

use clap::Parser;
use houndfetch_cli::{list_logos, run, Cli, FetchConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "HOUNDFETCH_LOG";

fn init_logging(cli: &Cli) {
    let fallback = || EnvFilter::default().add_directive(cli.log_level().into());
    let filter = if cli.verbose {
        fallback()
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| fallback())
    };
    // stdout carries the frame
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.dump_config {
        print!("{}", FetchConfig::default_yaml());
        return ExitCode::SUCCESS;
    }

    let mut stdout = io::stdout().lock();

    let result = if cli.list_logos {
        list_logos(&mut stdout)
    } else {
        cli.merge(cli.load_config())
            .and_then(|options| run(&options, &mut stdout))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "houndfetch failed");
            eprintln!("houndfetch: {err}");
            ExitCode::FAILURE
        }
    }
}
