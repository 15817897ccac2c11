//! # sim-measures CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Experiment loading and validation
//! - Log scanning and report dispatch
//! - Graceful shutdown handling

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_list, run_measures, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: cli.metrics_port(),
        default_log_level: cli.log_level().to_string(),
    })?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "sim-measures starting"
    );

    let result = match &cli.command {
        Commands::Run(args) => run_measures(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::List(args) => run_list(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}
