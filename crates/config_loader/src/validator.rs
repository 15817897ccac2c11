//! Config validation
//!
//! Rules:
//! - field ranges declared on the blueprint types (period > 0, simulation_time > 0, names not empty)
//! - period and simulation_time are finite, period <= simulation_time
//! - the run splits into at most `MAX_SAMPLES` periods
//! - measure names unique
//! - custom message types are a single dotted identifier
//! - sink names unique

use std::collections::HashSet;

use ::validator::{Validate, ValidationErrors, ValidationErrorsKind};
use contracts::{ContractError, ExperimentBlueprint, MAX_SAMPLES};

/// Validate an ExperimentBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &ExperimentBlueprint) -> Result<(), ContractError> {
    validate_fields(blueprint)?;
    validate_sampling(blueprint)?;
    validate_measure_names(blueprint)?;
    validate_message_types(blueprint)?;
    validate_sink_names(blueprint)?;
    Ok(())
}

/// Run the derived field rules
fn validate_fields(blueprint: &ExperimentBlueprint) -> Result<(), ContractError> {
    blueprint.validate().map_err(|errors| {
        let (field, message) = first_error("", &errors);
        ContractError::config_validation(field, message)
    })
}

/// Walk nested validation errors in key order and report the first leaf
fn first_error(prefix: &str, errors: &ValidationErrors) -> (String, String) {
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (key, kind) in entries {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                if let Some(err) = errs.first() {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    return (path, message);
                }
            }
            ValidationErrorsKind::Struct(inner) => return first_error(&path, inner),
            ValidationErrorsKind::List(items) => {
                if let Some((idx, inner)) = items.iter().next() {
                    return first_error(&format!("{path}[{idx}]"), inner);
                }
            }
        }
    }

    (prefix.to_string(), "invalid value".to_string())
}

/// Validate sampling parameters beyond single-field ranges
fn validate_sampling(blueprint: &ExperimentBlueprint) -> Result<(), ContractError> {
    let sim = &blueprint.simulation;

    if !sim.period.is_finite() || !sim.simulation_time.is_finite() {
        return Err(ContractError::config_validation(
            "simulation",
            "period and simulation_time must be finite",
        ));
    }

    if sim.period > sim.simulation_time {
        return Err(ContractError::config_validation(
            "simulation.period / simulation.simulation_time",
            format!(
                "period ({}) must be <= simulation_time ({})",
                sim.period, sim.simulation_time
            ),
        ));
    }

    let periods = (sim.simulation_time / sim.period).ceil();
    if periods > MAX_SAMPLES as f64 {
        return Err(ContractError::config_validation(
            "simulation.period",
            format!(
                "period ({}) splits simulation_time ({}) into {} samples, limit is {}",
                sim.period, sim.simulation_time, periods, MAX_SAMPLES
            ),
        ));
    }

    Ok(())
}

fn validate_measure_names(blueprint: &ExperimentBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for measure in &blueprint.measures {
        if !seen.insert(measure.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("measures[name={}]", measure.name),
                "duplicate measure name",
            ));
        }
    }
    Ok(())
}

fn validate_message_types(blueprint: &ExperimentBlueprint) -> Result<(), ContractError> {
    for measure in &blueprint.measures {
        let Some(message_type) = &measure.message_type else {
            continue;
        };

        let well_formed = !message_type.is_empty()
            && message_type
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(is_identifier_char));

        if !well_formed {
            return Err(ContractError::config_validation(
                format!("measures[{}].message_type", measure.name),
                format!("'{message_type}' is not a qualified message type name"),
            ));
        }
    }
    Ok(())
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn validate_sink_names(blueprint: &ExperimentBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for sink in &blueprint.sinks {
        if !seen.insert(sink.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
    }
    Ok(())
}
