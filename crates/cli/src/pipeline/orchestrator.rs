//! Pipeline orchestrator - scan logs, build reports, dispatch them.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{ExperimentBlueprint, ScanStats};
use measures::{LogScanner, MeasureRegistry, MeasureSet};
use reporter::Reporter;
use tracing::info;

use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Validated experiment, sinks included
    pub blueprint: ExperimentBlueprint,

    /// Log files, scanned in order into the same measures
    pub logs: Vec<PathBuf>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
    registry: MeasureRegistry,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            registry: MeasureRegistry::builtin(),
        }
    }

    /// Run the pipeline to completion
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;

        let mut measures = MeasureSet::from_blueprint(blueprint, &self.registry)
            .context("Failed to build measures")?;
        info!(measures = measures.len(), "Measures ready");

        let scanner = LogScanner::strict(blueprint.simulation.strict);
        let mut scan = ScanStats::default();

        for path in &self.config.logs {
            info!(path = %path.display(), "Scanning log file");
            let stats = scanner
                .scan_file(path, &mut measures)
                .await
                .with_context(|| format!("Failed to scan {}", path.display()))?;
            observability::record_scan_stats(&stats);
            scan.merge(&stats);
        }

        let reports = measures.reports();

        let reporter =
            Reporter::from_configs(&blueprint.sinks).context("Failed to create report sinks")?;
        let active_sinks = reporter.sink_count();
        reporter.dispatch(&reports).await;
        let sinks = reporter.shutdown().await;

        Ok(PipelineStats {
            scan,
            reports,
            sinks,
            active_sinks,
            duration: start_time.elapsed(),
        })
    }
}
