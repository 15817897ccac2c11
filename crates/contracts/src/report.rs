//! MeasureReport - Measure output

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::MeasureDescriptor;

/// Count of matching events inside one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// End of the period (seconds)
    pub time: f64,
    pub count: u64,
}

/// Summary statistics over per-period counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl fmt::Display for SampleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Final result of one measure over a scanned run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureReport {
    /// Measure name (e.g. `SentFCompositionMessages`)
    pub name: String,

    pub descriptor: MeasureDescriptor,

    /// Matching events inside the time horizon
    pub total: u64,

    /// Matching events outside `[0, simulation_time]`
    pub out_of_range: u64,

    /// Sum of destination set sizes over counted events
    pub total_destinations: u64,

    /// One entry per period, in time order
    pub samples: Vec<Sample>,

    /// Counted events per forwarding peer
    #[serde(default)]
    pub by_peer: BTreeMap<String, u64>,

    pub stats: SampleStats,
}

impl MeasureReport {
    /// Running total at the end of each period
    pub fn cumulative(&self) -> Vec<Sample> {
        let mut acc = 0;
        self.samples
            .iter()
            .map(|s| {
                acc += s.count;
                Sample {
                    time: s.time,
                    count: acc,
                }
            })
            .collect()
    }

    /// Average destinations per counted event
    pub fn mean_fan_out(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.total_destinations as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(counts: &[u64]) -> MeasureReport {
        MeasureReport {
            name: "m".into(),
            descriptor: MeasureDescriptor::new("a.Msg", 10.0, 10.0 * counts.len() as f64),
            total: counts.iter().sum(),
            out_of_range: 0,
            total_destinations: 0,
            samples: counts
                .iter()
                .enumerate()
                .map(|(i, &count)| Sample {
                    time: 10.0 * (i + 1) as f64,
                    count,
                })
                .collect(),
            by_peer: BTreeMap::new(),
            stats: SampleStats::default(),
        }
    }

    #[test]
    fn test_cumulative() {
        let r = report(&[2, 0, 3]);
        let counts: Vec<u64> = r.cumulative().iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![2, 2, 5]);
        assert_eq!(r.cumulative()[2].time, 30.0);
    }

    #[test]
    fn test_mean_fan_out_empty() {
        assert_eq!(report(&[]).mean_fan_out(), 0.0);
    }
}
