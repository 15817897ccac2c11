//! `run` command implementation.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::future::Future;
use tracing::{info, warn};

use config_loader::ConfigLoader;
use contracts::{
    ConfigVersion, ExperimentBlueprint, MeasureConfig, SimulationConfig, SinkConfig, SinkType,
};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_measures(args: &RunArgs) -> Result<()> {
    let blueprint = build_blueprint(args)?;

    if let Some(missing) = args.logs.iter().find(|path| !path.exists()) {
        return Err(CliError::log_not_found(missing.display().to_string()).into());
    }

    info!(
        period = blueprint.simulation.period,
        simulation_time = blueprint.simulation.simulation_time,
        strict = blueprint.simulation.strict,
        measures = blueprint.measures.len(),
        sinks = blueprint.sinks.len(),
        logs = args.logs.len(),
        "Configuration loaded"
    );

    let pipeline = Pipeline::new(PipelineConfig {
        blueprint,
        logs: args.logs.clone(),
    });

    let run = async { pipeline.run().await.context("Measurement run failed") };
    let stats = run_until_shutdown(run, setup_shutdown_signal()).await?;

    info!(
        lines = stats.scan.lines,
        events = stats.scan.events,
        parse_errors = stats.scan.parse_errors,
        duration_secs = stats.duration.as_secs_f64(),
        "Measurement run completed"
    );
    if stats.sink_failures() > 0 {
        warn!(failures = stats.sink_failures(), "Some reports were not written");
    }
    stats.print_summary();

    if let Some(linger) = args.linger() {
        info!(
            port = args.metrics_port,
            secs = linger.as_secs(),
            "Keeping metrics endpoint up for a final scrape"
        );
        tokio::select! {
            _ = tokio::time::sleep(linger) => {}
            _ = setup_shutdown_signal() => {}
        }
    }

    Ok(())
}

/// Drive `run` to completion unless `shutdown` fires first
///
/// # Errors
/// `CliError::Interrupted` on shutdown, otherwise whatever `run` returns.
async fn run_until_shutdown<T>(
    run: impl Future<Output = Result<T>>,
    shutdown: impl Future<Output = ()>,
) -> Result<T> {
    tokio::select! {
        result = run => result,
        _ = shutdown => {
            warn!("Received shutdown signal, scan cancelled");
            Err(CliError::Interrupted.into())
        }
    }
}

/// Experiment file or ad-hoc flags, with command-line overrides applied
fn build_blueprint(args: &RunArgs) -> Result<ExperimentBlueprint> {
    let mut blueprint = match &args.config {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()).into());
            }
            info!(config = %path.display(), "Loading configuration");
            ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => ad_hoc_blueprint(args)?,
    };

    if let Some(period) = args.period {
        blueprint.simulation.period = period;
    }
    if let Some(simulation_time) = args.simulation_time {
        blueprint.simulation.simulation_time = simulation_time;
    }
    if args.strict {
        blueprint.simulation.strict = true;
    }

    if blueprint.sinks.is_empty() {
        blueprint.sinks.push(SinkConfig {
            name: "stdout".to_string(),
            sink_type: SinkType::Stdout,
            params: HashMap::from([("format".to_string(), args.format.as_str().to_string())]),
        });
    }
    if let Some(dir) = &args.output {
        blueprint.sinks.push(SinkConfig {
            name: "output".to_string(),
            sink_type: SinkType::File,
            params: HashMap::from([("base_path".to_string(), dir.display().to_string())]),
        });
    }

    ConfigLoader::validate(&blueprint).context("Invalid configuration")?;
    Ok(blueprint)
}

fn ad_hoc_blueprint(args: &RunArgs) -> Result<ExperimentBlueprint, CliError> {
    if args.measure.is_empty() {
        return Err(CliError::missing_argument("--config or --measure"));
    }
    let period = args
        .period
        .ok_or_else(|| CliError::missing_argument("--period"))?;
    let simulation_time = args
        .simulation_time
        .ok_or_else(|| CliError::missing_argument("--simulation-time"))?;

    let measures = args
        .measure
        .iter()
        .map(|spec| parse_measure_spec(spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExperimentBlueprint {
        version: ConfigVersion::default(),
        simulation: SimulationConfig {
            period,
            simulation_time,
            strict: args.strict,
        },
        measures,
        sinks: Vec::new(),
    })
}

/// `NAME` or `NAME=MESSAGE_TYPE`
fn parse_measure_spec(spec: &str) -> Result<MeasureConfig, CliError> {
    let (name, message_type) = match spec.split_once('=') {
        Some((name, message_type)) => {
            let message_type = message_type.trim();
            if message_type.is_empty() {
                return Err(CliError::invalid_measure_spec(spec));
            }
            (name.trim(), Some(message_type.to_string()))
        }
        None => (spec.trim(), None),
    };

    if name.is_empty() {
        return Err(CliError::invalid_measure_spec(spec));
    }

    Ok(MeasureConfig {
        name: name.to_string(),
        message_type,
        description: None,
    })
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
