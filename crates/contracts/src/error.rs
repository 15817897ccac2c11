//! Layered error definitions
//!
//! Categorized by source: config / measure / log / sink

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Measure Errors =====
    /// No registry entry for the requested measure
    #[error("unknown measure: {name}")]
    UnknownMeasure { name: String },

    /// Registry already holds a measure with this name
    #[error("duplicate measure: {name}")]
    DuplicateMeasure { name: String },

    // ===== Log Errors =====
    /// Malformed simulation log line
    #[error("log parse error at line {line_no}: {message}")]
    LogParse { line_no: u64, message: String },

    // ===== Sink Errors =====
    /// Sink creation error
    #[error("failed to create sink '{sink_name}': {message}")]
    SinkCreation { sink_name: String, message: String },

    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unknown_measure(name: impl Into<String>) -> Self {
        Self::UnknownMeasure { name: name.into() }
    }

    pub fn duplicate_measure(name: impl Into<String>) -> Self {
        Self::DuplicateMeasure { name: name.into() }
    }

    /// Create log parse error
    ///
    /// `line_no` is 0 when the line was parsed outside of a scan.
    pub fn log_parse(line_no: u64, message: impl Into<String>) -> Self {
        Self::LogParse {
            line_no,
            message: message.into(),
        }
    }

    pub fn sink_creation(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Attach a line number to a `LogParse` error; other variants pass through.
    pub fn at_line(self, line_no: u64) -> Self {
        match self {
            Self::LogParse { message, .. } => Self::LogParse { line_no, message },
            other => other,
        }
    }
}
