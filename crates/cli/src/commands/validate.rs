//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::ExperimentBlueprint;
use measures::MeasureRegistry;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    period: f64,
    simulation_time: f64,
    expected_samples: usize,
    strict: bool,
    measures: Vec<String>,
    sink_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(&args.config, &MeasureRegistry::builtin());

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(path: &Path, registry: &MeasureRegistry) -> ValidationResult {
    let config_path = path.display().to_string();

    if !path.exists() {
        return invalid(config_path, format!("File not found: {}", path.display()));
    }

    let blueprint = match config_loader::ConfigLoader::load_from_path(path) {
        Ok(blueprint) => blueprint,
        Err(e) => return invalid(config_path, e.to_string()),
    };

    // Names without message_type must resolve through the registry
    if let Some(unknown) = blueprint
        .measures
        .iter()
        .find(|m| m.message_type.is_none() && !registry.contains(&m.name))
    {
        return invalid(
            config_path,
            format!(
                "unknown measure '{}': not builtin and no message_type given",
                unknown.name
            ),
        );
    }

    let warnings = collect_warnings(&blueprint);
    let simulation = &blueprint.simulation;

    ValidationResult {
        valid: true,
        config_path,
        error: None,
        warnings: if warnings.is_empty() {
            None
        } else {
            Some(warnings)
        },
        summary: Some(ConfigSummary {
            version: format!("{:?}", blueprint.version),
            period: simulation.period,
            simulation_time: simulation.simulation_time,
            expected_samples: (simulation.simulation_time / simulation.period).ceil() as usize,
            strict: simulation.strict,
            measures: blueprint.measures.iter().map(|m| m.name.clone()).collect(),
            sink_count: blueprint.sinks.len(),
        }),
    }
}

fn invalid(config_path: String, error: String) -> ValidationResult {
    ValidationResult {
        valid: false,
        config_path,
        error: Some(error),
        warnings: None,
        summary: None,
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &ExperimentBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.sinks.is_empty() {
        warnings.push("No sinks configured - reports will be printed to stdout".to_string());
    }

    let simulation = &blueprint.simulation;
    let periods = simulation.simulation_time / simulation.period;
    if (periods - periods.round()).abs() > 1e-9 {
        warnings.push(format!(
            "simulation_time {} is not a multiple of period {} - the last sample covers a shorter period",
            simulation.simulation_time, simulation.period
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Period: {}s", summary.period);
            println!(
                "  Simulation time: {}s ({} samples)",
                summary.simulation_time, summary.expected_samples
            );
            println!("  Strict: {}", summary.strict);
            println!("  Measures: {}", summary.measures.join(", "));
            println!("  Sinks: {}", summary.sink_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_valid_config_with_warnings() {
        let file = config_file(
            r#"
[simulation]
period = 30.0
simulation_time = 100.0

[[measures]]
name = "SentFCompositionMessages"
"#,
        );

        let result = validate_config(file.path(), &MeasureRegistry::builtin());
        assert!(result.valid);
        let summary = result.summary.unwrap();
        assert_eq!(summary.expected_samples, 4);
        assert_eq!(result.warnings.unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_measure_is_invalid() {
        let file = config_file(
            r#"
[simulation]
period = 10.0
simulation_time = 100.0

[[measures]]
name = "SentNothing"
"#,
        );

        let result = validate_config(file.path(), &MeasureRegistry::builtin());
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("SentNothing"));
    }

    #[test]
    fn test_missing_file() {
        let result = validate_config(
            Path::new("/nonexistent/experiment.toml"),
            &MeasureRegistry::builtin(),
        );
        assert!(!result.valid);
        assert!(result.error.unwrap().starts_with("File not found"));
    }
}
