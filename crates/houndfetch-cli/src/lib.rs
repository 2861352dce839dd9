//! Command-line front end of houndfetch.
//!
//! Owns everything that touches the host: config files, flags, the live
//! system probe and stdout. Layout and coloring live in `houndfetch_core`.

pub mod cli;
pub mod config;
pub mod probe;

use std::io::Write;

use houndfetch_core::{Compositor, FactSource, FetchError, LogoCatalog, StaticFacts, TerminalWriter};

pub use cli::{Cli, RunOptions};
pub use config::FetchConfig;
pub use probe::SystemFacts;

/// Compose and write one frame.
pub fn run(options: &RunOptions, out: &mut impl Write) -> Result<(), FetchError> {
    let source: Box<dyn FactSource> = if options.demo {
        Box::new(StaticFacts::demo())
    } else {
        Box::new(SystemFacts::new())
    };
    run_with(source.as_ref(), options, out)
}

/// Compose from `source` and write to `out`.
pub fn run_with(
    source: &dyn FactSource,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<(), FetchError> {
    let frame = Compositor::new(source)
        .with_logo_choice(options.logo.clone())
        .compose(&options.fields)?;
    TerminalWriter::new()
        .with_color(options.color)
        .write_to(out, &frame)?;
    Ok(())
}

/// One built-in logo name per line.
pub fn list_logos(out: &mut impl Write) -> Result<(), FetchError> {
    for name in LogoCatalog::builtin().names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
