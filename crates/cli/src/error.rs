//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Experiment file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Log file not found
    #[error("Log file not found: {path}")]
    LogNotFound { path: String },

    /// Ad-hoc run without a required flag
    #[error("Missing argument: {flag}")]
    MissingArgument { flag: &'static str },

    /// Malformed `--measure` value
    #[error("Invalid measure '{spec}': expected NAME or NAME=MESSAGE_TYPE")]
    InvalidMeasureSpec { spec: String },

    /// Ctrl-C or SIGTERM before the reports were written
    #[error("Interrupted: scan cancelled before reports were written")]
    Interrupted,
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn log_not_found(path: impl Into<String>) -> Self {
        Self::LogNotFound { path: path.into() }
    }

    pub fn missing_argument(flag: &'static str) -> Self {
        Self::MissingArgument { flag }
    }

    pub fn invalid_measure_spec(spec: impl Into<String>) -> Self {
        Self::InvalidMeasureSpec { spec: spec.into() }
    }
}
