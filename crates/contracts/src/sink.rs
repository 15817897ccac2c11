//! ReportSink trait - Reporter output interface
//!
//! Defines the abstract interface for report sinks.

use crate::{ContractError, MeasureReport};

/// Report output trait
///
/// All sink implementations must implement this trait.
#[trait_variant::make(ReportSink: Send)]
pub trait LocalReportSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one measure report
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, report: &MeasureReport) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
