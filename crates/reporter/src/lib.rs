//! # Reporter
//!
//! Report output module.
//!
//! Responsibilities:
//! - Consume `MeasureReport`s at the end of a run
//! - Fan-out to multiple sinks
//! - Isolate failing sinks from the others

pub mod error;
pub mod handle;
pub mod reporter;
pub mod sinks;

pub use contracts::{MeasureReport, ReportSink};
pub use error::ReporterError;
pub use handle::{DeliveryStats, SinkHandle};
pub use reporter::{create_reporter, Reporter};
pub use sinks::{render_text, FileSink, LogSink, OutputFormat, StdoutSink};
