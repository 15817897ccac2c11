//! Config parsing
//!
//! Supports TOML (primary) and JSON.

use std::path::Path;

use contracts::{ContractError, ExperimentBlueprint};

/// Config file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Format of an experiment file, from its extension
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse(format!(
                "{}: experiment file needs a .toml or .json extension",
                path.display()
            ))
        })?;
        Self::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported experiment format: .{ext}"))
        })
    }
}

pub fn parse_toml(content: &str) -> Result<ExperimentBlueprint, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse_json(content: &str) -> Result<ExperimentBlueprint, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse(content: &str, format: ConfigFormat) -> Result<ExperimentBlueprint, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::SinkType;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[simulation]
period = 10.0
simulation_time = 1000.0

[[measures]]
name = "SentFCompositionMessages"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.simulation.period, 10.0);
        assert!(!bp.simulation.strict);
        assert_eq!(bp.measures.len(), 1);
        assert!(bp.measures[0].message_type.is_none());
        assert!(bp.sinks.is_empty());
    }

    #[test]
    fn test_parse_json_with_sinks() {
        let content = r#"{
            "simulation": { "period": 5.0, "simulation_time": 60.0, "strict": true },
            "measures": [
                { "name": "Collisions", "message_type": "graphcreation.collisionbased.message.CollisionMessage" }
            ],
            "sinks": [{ "name": "out", "sink_type": "file", "params": { "base_path": "/tmp/r" } }]
        }"#;
        let bp = parse_json(content).unwrap();
        assert!(bp.simulation.strict);
        assert_eq!(bp.sinks[0].sink_type, SinkType::File);
        assert_eq!(bp.sinks[0].params.get("base_path").map(String::as_str), Some("/tmp/r"));
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_parse_toml_missing_simulation() {
        let result = parse_toml("[[measures]]\nname = \"x\"\n");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("runs/fcomposition.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigFormat::from_path(Path::new("runs/experiment")).is_err());
        let err = ConfigFormat::from_path(Path::new("experiment.yaml")).unwrap_err();
        assert!(err.to_string().contains(".yaml"), "got: {err}");
    }
}
