//! # Config Loader
//!
//! Reads experiment files: the sampling period and run length shared by all
//! measures, the measures to compute, and where their reports go.
//!
//! A file is accepted only once the sampling parameters are usable (positive,
//! finite, at most `MAX_SAMPLES` periods) and measure and sink names are
//! unique. The measure factories themselves take any numbers.
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let experiment = ConfigLoader::load_from_path(Path::new("experiment.toml")).unwrap();
//! for measure in &experiment.measures {
//!     println!("{} every {}s", measure.name, experiment.simulation.period);
//! }
//! ```

mod parser;
mod validator;

pub use contracts::ExperimentBlueprint;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Entry point for experiment files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read an experiment file, format chosen by extension (.toml / .json)
    ///
    /// # Errors
    /// `ConfigParse` for an unknown extension or malformed content, `Io` if
    /// the file cannot be read, `ConfigValidation` for unusable values.
    pub fn load_from_path(path: &Path) -> Result<ExperimentBlueprint, ContractError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content, format)
    }

    /// Parse and check experiment text
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ExperimentBlueprint, ContractError> {
        let experiment = parser::parse(content, format)?;
        validator::validate(&experiment)?;
        Ok(experiment)
    }

    /// Re-check an experiment after command-line overrides
    pub fn validate(experiment: &ExperimentBlueprint) -> Result<(), ContractError> {
        validator::validate(experiment)
    }

    pub fn to_toml(experiment: &ExperimentBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(experiment).map_err(|e| {
            ContractError::config_parse(format!("cannot write experiment as TOML: {e}"))
        })
    }

    pub fn to_json(experiment: &ExperimentBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(experiment).map_err(|e| {
            ContractError::config_parse(format!("cannot write experiment as JSON: {e}"))
        })
    }
}
