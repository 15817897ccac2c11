//! Measure trait - one named counter over log events

use crate::{LogEvent, MeasureDescriptor, MeasureReport};

/// A measure consumes every event of a run and produces one report.
///
/// Implementations must not share mutable state between instances.
pub trait Measure: Send {
    /// Measure name (used for reports and file names)
    fn name(&self) -> &str;

    fn descriptor(&self) -> &MeasureDescriptor;

    /// Feed one event. Events that do not concern the measure are ignored.
    fn observe(&mut self, event: &LogEvent);

    /// Snapshot of what has been observed so far
    fn report(&self) -> MeasureReport;
}
