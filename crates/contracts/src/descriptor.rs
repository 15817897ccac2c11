//! MeasureDescriptor - the configuration a measure is bound to

use serde::{Deserialize, Serialize};

use crate::MessageTypeKey;

/// Most samples a single report may carry.
///
/// Configurations whose run splits into more periods are rejected at load
/// time. Measures built directly count events past this many periods as out
/// of range.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Message type, sampling period and run length of one measure.
///
/// The key is fixed at construction: there is no setter, and the field is
/// private so it cannot be reassigned through a `&mut` borrow either.
/// Numeric parameters are stored exactly as given, zero and negative values
/// included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureDescriptor {
    message_type_key: MessageTypeKey,
    /// Sampling period (seconds)
    period: f64,
    /// Total simulated duration (seconds)
    simulation_time: f64,
}

impl MeasureDescriptor {
    pub fn new(message_type_key: impl Into<MessageTypeKey>, period: f64, simulation_time: f64) -> Self {
        Self {
            message_type_key: message_type_key.into(),
            period,
            simulation_time,
        }
    }

    #[inline]
    pub fn message_type_key(&self) -> &MessageTypeKey {
        &self.message_type_key
    }

    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    #[inline]
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    /// Upper time bound for counted events, if the run length is known.
    pub fn horizon(&self) -> Option<f64> {
        (self.simulation_time > 0.0).then_some(self.simulation_time)
    }

    /// Number of periods covering the whole run, if both parameters are positive
    /// and their ratio is finite. Not bounded by [`MAX_SAMPLES`].
    pub fn expected_samples(&self) -> Option<usize> {
        let periods = self.simulation_time / self.period;
        if self.period > 0.0 && self.simulation_time > 0.0 && periods.is_finite() {
            Some((periods.ceil() as usize).max(1))
        } else {
            None
        }
    }
}
