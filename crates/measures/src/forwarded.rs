//! Generic forwarded-message counter.

use std::collections::BTreeMap;

use contracts::{
    LogEvent, Measure, MeasureDescriptor, MeasureReport, MessageTypeKey, Sample, MAX_SAMPLES,
};
use observability::RunningStats;
use tracing::trace;

/// Counts forwarded payloads of one message type, sampled per period.
///
/// Construction never validates: a zero or negative `period` collapses all
/// events into a single sample, a zero or negative `simulation_time` removes
/// the time horizon. Events falling past [`MAX_SAMPLES`] periods are counted
/// as out of range.
#[derive(Debug, Clone)]
pub struct ForwardedMessages {
    name: String,
    descriptor: MeasureDescriptor,
    /// Period index -> count (sparse)
    buckets: BTreeMap<usize, u64>,
    total: u64,
    out_of_range: u64,
    total_destinations: u64,
    by_peer: BTreeMap<String, u64>,
    /// Latest counted event time
    last_time: Option<f64>,
}

impl ForwardedMessages {
    pub fn new(
        name: impl Into<String>,
        message_type_key: impl Into<MessageTypeKey>,
        period: f64,
        simulation_time: f64,
    ) -> Self {
        Self::from_descriptor(
            name,
            MeasureDescriptor::new(message_type_key, period, simulation_time),
        )
    }

    pub fn from_descriptor(name: impl Into<String>, descriptor: MeasureDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            buckets: BTreeMap::new(),
            total: 0,
            out_of_range: 0,
            total_destinations: 0,
            by_peer: BTreeMap::new(),
            last_time: None,
        }
    }

    #[inline]
    pub fn message_type_key(&self) -> &MessageTypeKey {
        self.descriptor.message_type_key()
    }

    #[inline]
    pub fn period(&self) -> f64 {
        self.descriptor.period()
    }

    #[inline]
    pub fn simulation_time(&self) -> f64 {
        self.descriptor.simulation_time()
    }

    /// Matching events counted so far
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Period index for a time inside the horizon, `None` past the sample cap
    fn bucket_index(&self, time: f64) -> Option<usize> {
        let period = self.descriptor.period();
        if period <= 0.0 {
            return Some(0);
        }

        let mut index = (time / period).floor();
        if let Some(samples) = self.descriptor.expected_samples() {
            // An event at exactly simulation_time closes the last period
            index = index.min(samples.saturating_sub(1) as f64);
        }
        (index < MAX_SAMPLES as f64).then_some(index as usize)
    }

    fn sample_count(&self) -> usize {
        if let Some(samples) = self.descriptor.expected_samples() {
            return samples.min(MAX_SAMPLES);
        }
        if self.descriptor.period() <= 0.0 {
            return 1;
        }
        self.buckets
            .keys()
            .next_back()
            .and_then(|last| last.checked_add(1))
            .map_or(1, |count| count.min(MAX_SAMPLES))
    }

    fn sample_time(&self, index: usize) -> f64 {
        let period = self.descriptor.period();
        let horizon = self.descriptor.horizon();

        if period <= 0.0 {
            return horizon.or(self.last_time).unwrap_or(0.0);
        }

        let end = (index + 1) as f64 * period;
        match horizon {
            Some(h) => end.min(h),
            None => end,
        }
    }

    fn samples(&self) -> Vec<Sample> {
        (0..self.sample_count())
            .map(|index| Sample {
                time: self.sample_time(index),
                count: self.buckets.get(&index).copied().unwrap_or(0),
            })
            .collect()
    }
}

impl Measure for ForwardedMessages {
    fn name(&self) -> &str {
        &self.name
    }

    fn descriptor(&self) -> &MeasureDescriptor {
        &self.descriptor
    }

    fn observe(&mut self, event: &LogEvent) {
        let LogEvent::Forwarded(event) = event else {
            return;
        };
        if event.message_type != *self.descriptor.message_type_key() {
            return;
        }

        let in_range = event.time >= 0.0
            && self
                .descriptor
                .horizon()
                .map_or(true, |horizon| event.time <= horizon);
        let Some(index) = in_range.then(|| self.bucket_index(event.time)).flatten() else {
            trace!(measure = %self.name, time = event.time, "event outside simulation time");
            self.out_of_range += 1;
            return;
        };

        *self.buckets.entry(index).or_insert(0) += 1;
        *self.by_peer.entry(event.peer.clone()).or_insert(0) += 1;
        self.total += 1;
        self.total_destinations += event.destinations.len() as u64;
        self.last_time = Some(self.last_time.map_or(event.time, |t| t.max(event.time)));
    }

    fn report(&self) -> MeasureReport {
        let samples = self.samples();
        let stats: RunningStats = samples.iter().map(|s| s.count as f64).collect();

        MeasureReport {
            name: self.name.clone(),
            descriptor: self.descriptor.clone(),
            total: self.total,
            out_of_range: self.out_of_range,
            total_destinations: self.total_destinations,
            samples,
            by_peer: self.by_peer.clone(),
            stats: stats.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ForwardedEvent;

    const KEY: &str = "graphsearch.forward.message.FCompositionMessage";

    fn event(message_type: &str, peer: &str, destinations: usize, time: f64) -> LogEvent {
        LogEvent::Forwarded(ForwardedEvent {
            peer: peer.to_string(),
            message_type: message_type.into(),
            destinations: (0..destinations).map(|i| format!("S{i}:{i}")).collect(),
            time,
        })
    }

    fn counts(report: &MeasureReport) -> Vec<u64> {
        report.samples.iter().map(|s| s.count).collect()
    }

    #[test]
    fn test_counts_only_its_message_type() {
        let mut m = ForwardedMessages::new("m", KEY, 10.0, 30.0);
        m.observe(&event(KEY, "1", 2, 1.0));
        m.observe(&event("graphsearch.backward.message.BCompositionMessage", "1", 2, 1.0));
        m.observe(&event(KEY, "2", 1, 15.0));

        let report = m.report();
        assert_eq!(report.total, 2);
        assert_eq!(report.total_destinations, 3);
        assert_eq!(counts(&report), vec![1, 1, 0]);
        assert_eq!(report.by_peer.get("1"), Some(&1));
        assert_eq!(report.by_peer.get("2"), Some(&1));
    }

    #[test]
    fn test_sample_labels_are_period_ends() {
        let m = ForwardedMessages::new("m", KEY, 30.0, 100.0);
        let times: Vec<f64> = m.report().samples.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![30.0, 60.0, 90.0, 100.0]);
    }

    #[test]
    fn test_event_at_simulation_end_joins_last_period() {
        let mut m = ForwardedMessages::new("m", KEY, 10.0, 30.0);
        m.observe(&event(KEY, "1", 0, 30.0));
        assert_eq!(counts(&m.report()), vec![0, 0, 1]);
    }

    #[test]
    fn test_out_of_range_events() {
        let mut m = ForwardedMessages::new("m", KEY, 10.0, 30.0);
        m.observe(&event(KEY, "1", 0, 30.001));
        m.observe(&event(KEY, "1", 0, -0.5));

        let report = m.report();
        assert_eq!(report.total, 0);
        assert_eq!(report.out_of_range, 2);
        assert!(report.by_peer.is_empty());
    }

    #[test]
    fn test_zero_period_collapses_to_one_sample() {
        let mut m = ForwardedMessages::new("m", KEY, 0.0, 100.0);
        m.observe(&event(KEY, "1", 0, 5.0));
        m.observe(&event(KEY, "1", 0, 95.0));

        let report = m.report();
        assert_eq!(report.samples.len(), 1);
        assert_eq!(report.samples[0].count, 2);
        assert_eq!(report.samples[0].time, 100.0);
    }

    #[test]
    fn test_zero_simulation_time_has_no_horizon() {
        let mut m = ForwardedMessages::new("m", KEY, 10.0, 0.0);
        m.observe(&event(KEY, "1", 0, 5.0));
        m.observe(&event(KEY, "1", 0, 42.0));

        let report = m.report();
        assert_eq!(report.out_of_range, 0);
        assert_eq!(counts(&report), vec![1, 0, 0, 0, 1]);
        assert_eq!(report.samples[4].time, 50.0);
    }

    #[test]
    fn test_both_zero() {
        let mut m = ForwardedMessages::new("m", KEY, 0.0, 0.0);
        assert_eq!(m.report().samples, vec![Sample { time: 0.0, count: 0 }]);

        m.observe(&event(KEY, "1", 0, 7.5));
        assert_eq!(m.report().samples, vec![Sample { time: 7.5, count: 1 }]);
    }

    #[test]
    fn test_far_event_without_horizon_is_out_of_range() {
        let mut m = ForwardedMessages::new("m", KEY, 1.0, 0.0);
        m.observe(&event(KEY, "1", 0, 1e20));
        m.observe(&event(KEY, "1", 0, 1e10));
        m.observe(&event(KEY, "1", 0, 2.5));

        let report = m.report();
        assert_eq!(report.total, 1);
        assert_eq!(report.out_of_range, 2);
        assert_eq!(counts(&report), vec![0, 0, 1]);
    }

    #[test]
    fn test_last_period_below_cap_is_counted() {
        let mut m = ForwardedMessages::new("m", KEY, 1.0, 0.0);
        m.observe(&event(KEY, "1", 0, MAX_SAMPLES as f64 - 0.5));
        m.observe(&event(KEY, "1", 0, MAX_SAMPLES as f64));

        let report = m.report();
        assert_eq!(report.out_of_range, 1);
        assert_eq!(report.samples.len(), MAX_SAMPLES);
        assert_eq!(report.samples[MAX_SAMPLES - 1].count, 1);
    }

    #[test]
    fn test_tiny_period_with_horizon_is_capped() {
        let mut m = ForwardedMessages::new("m", KEY, 1e-9, 1000.0);
        m.observe(&event(KEY, "1", 0, 1e-4));
        m.observe(&event(KEY, "1", 0, 500.0));

        let report = m.report();
        assert_eq!(report.total, 1);
        assert_eq!(report.out_of_range, 1);
        assert_eq!(report.samples.len(), MAX_SAMPLES);
    }

    #[test]
    fn test_stats_over_periods() {
        let mut m = ForwardedMessages::new("m", KEY, 10.0, 20.0);
        for t in [1.0, 2.0, 3.0, 11.0] {
            m.observe(&event(KEY, "1", 0, t));
        }

        let stats = m.report().stats;
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert!((stats.mean - 2.0).abs() < 1e-10);
    }
}
