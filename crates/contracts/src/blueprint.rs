//! ExperimentBlueprint - Config Loader output
//!
//! Describes one measurement run: sampling parameters, measures, report routing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete experiment description
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExperimentBlueprint {
    #[serde(default)]
    pub version: ConfigVersion,

    /// Sampling parameters shared by every measure
    #[validate(nested)]
    pub simulation: SimulationConfig,

    /// Measures to compute
    #[validate(length(min = 1, message = "at least one measure is required"), nested)]
    pub measures: Vec<MeasureConfig>,

    /// Report routing; empty means stdout only
    #[serde(default)]
    #[validate(nested)]
    pub sinks: Vec<SinkConfig>,
}

/// Period and run length, both in seconds
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimulationConfig {
    #[validate(range(exclusive_min = 0.0, message = "period must be > 0"))]
    pub period: f64,

    #[validate(range(exclusive_min = 0.0, message = "simulation_time must be > 0"))]
    pub simulation_time: f64,

    /// Abort on the first malformed forwarding line
    #[serde(default)]
    pub strict: bool,
}

/// One measure entry
///
/// A builtin measure only needs `name`; a custom one also sets `message_type`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MeasureConfig {
    #[validate(length(min = 1, message = "measure name cannot be empty"))]
    pub name: String,

    /// Message type to count; overrides the registry lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Report sink configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SinkConfig {
    #[validate(length(min = 1, message = "sink name cannot be empty"))]
    pub name: String,

    pub sink_type: SinkType,

    /// Sink-specific parameters (e.g. `base_path`, `format`)
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Per-measure `.dat` and `.json` files
    File,
    /// Print to standard output
    Stdout,
    /// Summary through tracing
    Log,
}
