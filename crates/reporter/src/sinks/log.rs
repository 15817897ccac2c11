//! LogSink - logs report summaries via tracing

use contracts::{ContractError, MeasureReport, ReportSink};
use tracing::{info, instrument};

/// Sink that logs report summaries
pub struct LogSink {
    name: String,
}

impl LogSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_report_summary(&self, report: &MeasureReport) {
        info!(
            sink = %self.name,
            measure = %report.name,
            message_type = %report.descriptor.message_type_key(),
            total = report.total,
            out_of_range = report.out_of_range,
            periods = report.samples.len(),
            mean_per_period = report.stats.mean,
            fan_out = report.mean_fan_out(),
            "MeasureReport received"
        );
    }
}

impl ReportSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, report),
        fields(sink = %self.name, measure = %report.name)
    )]
    async fn write(&mut self, report: &MeasureReport) -> Result<(), ContractError> {
        self.log_report_summary(report);
        Ok(())
    }

    #[instrument(name = "log_sink_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}
