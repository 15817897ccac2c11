//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// sim-measures - forwarded message measures over simulation logs
#[derive(Parser, Debug)]
#[command(
    name = "sim-measures",
    author,
    version,
    about = "Count forwarded messages in service composition simulation logs",
    long_about = "Scans the logs written by a service composition simulation and counts,\n\
                  per sampling period, how many payloads of each configured message type\n\
                  were forwarded between peers."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SIM_MEASURES_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SIM_MEASURES_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default filter when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Prometheus port requested by the command, if any
    pub fn metrics_port(&self) -> Option<u16> {
        match &self.command {
            Commands::Run(args) if args.metrics_port != 0 => Some(args.metrics_port),
            _ => None,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan log files and report the configured measures
    Run(RunArgs),

    /// Validate an experiment file without scanning
    Validate(ValidateArgs),

    /// List the builtin measures
    List(ListArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Simulation log files, scanned in order
    #[arg(required = true)]
    pub logs: Vec<PathBuf>,

    /// Experiment file (TOML or JSON)
    #[arg(short, long, env = "SIM_MEASURES_CONFIG", conflicts_with = "measure")]
    pub config: Option<PathBuf>,

    /// Measure to compute without an experiment file: NAME or NAME=MESSAGE_TYPE
    #[arg(short, long = "measure", value_name = "MEASURE")]
    pub measure: Vec<String>,

    /// Sampling period in seconds (overrides the experiment file)
    #[arg(short, long, env = "SIM_MEASURES_PERIOD")]
    pub period: Option<f64>,

    /// Simulated run length in seconds (overrides the experiment file)
    #[arg(short, long, env = "SIM_MEASURES_SIMULATION_TIME")]
    pub simulation_time: Option<f64>,

    /// Abort on the first malformed forwarding line
    #[arg(long)]
    pub strict: bool,

    /// Report format on stdout when no sink is configured
    #[arg(short, long, value_enum, default_value = "text", env = "SIM_MEASURES_FORMAT")]
    pub format: ReportFormat,

    /// Also write `.dat`/`.json` files per measure into this directory
    #[arg(short, long, env = "SIM_MEASURES_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Metrics server port (0 = disabled); the endpoint stops when the run exits
    #[arg(long, default_value = "0", env = "SIM_MEASURES_METRICS_PORT")]
    pub metrics_port: u16,

    /// Seconds the metrics endpoint stays up after the reports are written
    #[arg(long, default_value = "15", env = "SIM_MEASURES_METRICS_LINGER")]
    pub metrics_linger: u64,
}

impl RunArgs {
    /// Time to keep serving metrics before exiting, if an endpoint is up
    pub fn linger(&self) -> Option<Duration> {
        (self.metrics_port != 0 && self.metrics_linger > 0)
            .then(|| Duration::from_secs(self.metrics_linger))
    }
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the experiment file to validate
    #[arg(short, long, default_value = "experiment.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Report format on stdout
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}
