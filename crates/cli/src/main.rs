//! # Pipeline Events CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Decoding and re-encoding of single messages
//! - Batch validation with a codec summary
//! - Sample messages for each event kind

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::debug;

use cli::{Cli, Commands};
use commands::{run_decode, run_kinds, run_sample, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(logging_config(&cli))?;

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Pipeline events CLI starting"
    );

    let result = match &cli.command {
        Commands::Decode(args) => run_decode(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Sample(args) => run_sample(args),
        Commands::Kinds(args) => run_kinds(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Map CLI verbosity flags onto the logging configuration
fn logging_config(cli: &Cli) -> ObservabilityConfig {
    let (level, ignore_env) = if cli.quiet {
        ("error", true)
    } else {
        let level = match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        (level, false)
    };

    ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: level.to_string(),
        ignore_env,
    }
}
