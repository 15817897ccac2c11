//! Reporter - fan-out of measure reports to sinks

use std::sync::Arc;

use tracing::{info, instrument, warn};

use contracts::{MeasureReport, SinkConfig, SinkType};

use crate::error::ReporterError;
use crate::handle::{DeliveryStats, SinkHandle};
use crate::sinks::{FileSink, LogSink, StdoutSink};

/// Per-sink queue length
const QUEUE_CAPACITY: usize = 16;

/// Delivers every report to every sink
pub struct Reporter {
    handles: Vec<SinkHandle>,
}

impl Reporter {
    /// Start one worker per sink config
    #[instrument(
        name = "reporter_from_configs",
        skip(configs),
        fields(sink_count = configs.len())
    )]
    pub fn from_configs(configs: &[SinkConfig]) -> Result<Self, ReporterError> {
        let handles = configs
            .iter()
            .map(create_sink_handle)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { handles })
    }

    /// Create a reporter with custom sink handles
    pub fn with_handles(handles: Vec<SinkHandle>) -> Self {
        Self { handles }
    }

    pub fn sink_count(&self) -> usize {
        self.handles.len()
    }

    /// Hand every report to every sink
    ///
    /// A closed sink is logged and skipped; returns the number of
    /// reports queued in total.
    #[instrument(name = "reporter_dispatch", skip(self, reports), fields(reports = reports.len()))]
    pub async fn dispatch(&self, reports: &[MeasureReport]) -> usize {
        let mut queued = 0;

        for report in reports {
            observability::record_measure_report(report);
            let report = Arc::new(report.clone());

            for handle in &self.handles {
                match handle.send(Arc::clone(&report)).await {
                    Ok(()) => queued += 1,
                    Err(e) => warn!(error = %e, "Report not delivered"),
                }
            }
        }

        queued
    }

    /// Wait for all sinks to finish and collect their delivery counts
    #[instrument(name = "reporter_shutdown", skip(self))]
    pub async fn shutdown(self) -> Vec<(String, DeliveryStats)> {
        let mut results = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            let name = handle.name().to_string();
            results.push((name, handle.shutdown().await));
        }

        let failures: u64 = results.iter().map(|(_, m)| m.failed).sum();
        info!(sinks = results.len(), failures, "Reporter shutdown complete");
        results
    }
}

#[instrument(
    name = "reporter_create_sink_handle",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
fn create_sink_handle(config: &SinkConfig) -> Result<SinkHandle, ReporterError> {
    match config.sink_type {
        SinkType::Log => Ok(SinkHandle::spawn(LogSink::new(&config.name), QUEUE_CAPACITY)),
        SinkType::Stdout => {
            let sink = StdoutSink::from_params(&config.name, &config.params)
                .map_err(|e| ReporterError::sink_creation(&config.name, e))?;
            Ok(SinkHandle::spawn(sink, QUEUE_CAPACITY))
        }
        SinkType::File => {
            let sink = FileSink::from_params(&config.name, &config.params)
                .map_err(|e| ReporterError::sink_creation(&config.name, e.to_string()))?;
            Ok(SinkHandle::spawn(sink, QUEUE_CAPACITY))
        }
    }
}

/// Convenience function to create a reporter from sink configs
pub fn create_reporter(configs: &[SinkConfig]) -> Result<Reporter, ReporterError> {
    Reporter::from_configs(configs)
}
