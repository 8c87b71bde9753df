// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line entry point: read a configuration file, run the search until
//! externally interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use sorter_search::config::{ConfigFile, Params};
use sorter_search::Evolver;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sorter-search",
    about = "Evolutionary search for small and shallow sorting networks",
    version
)]
struct Cli {
    /// Path to the configuration file.
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(1);
    });

    let config = ConfigFile::parse(&cli.config)
        .with_context(|| format!("error parsing config options from {}", cli.config.display()))?;

    // The subscriber level tracks the Verbosity key, so it must be read
    // before typed validation (which may already want to warn).
    init_tracing(config.int("Verbosity", 1));

    let params = Params::from_config(&config)?;
    let mut evolver = Evolver::new(params);
    evolver.run()
}

/// Map the `Verbosity` config key onto a tracing level: 0 errors only,
/// 1 normal progress, 2 detail, 3 and above full trace.
fn init_tracing(verbosity: u64) {
    let level = match verbosity {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
