//! Measurement metrics
//!
//! Records scan progress and measure results through the `metrics` facade.

use contracts::{MeasureReport, SampleStats, ScanStats};
use metrics::{counter, gauge, histogram};

/// Record one finished log scan
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_scan_stats;
///
/// let stats = LogScanner::new().scan_reader(reader, &mut measures)?;
/// record_scan_stats(&stats);
/// ```
pub fn record_scan_stats(stats: &ScanStats) {
    counter!("sim_measures_files_total").increment(stats.files);
    counter!("sim_measures_lines_total").increment(stats.lines);
    counter!("sim_measures_lines_ignored_total").increment(stats.ignored);

    if stats.parse_errors > 0 {
        counter!("sim_measures_parse_errors_total").increment(stats.parse_errors);
    }

    for (message_type, count) in &stats.by_message_type {
        counter!(
            "sim_measures_events_total",
            "message_type" => message_type.clone()
        )
        .increment(*count);
    }
}

/// Record a malformed event line as it is encountered
pub fn record_parse_error() {
    counter!("sim_measures_parse_errors_seen_total").increment(1);
}

/// Record the outcome of one measure
pub fn record_measure_report(report: &MeasureReport) {
    gauge!("sim_measures_measure_total", "measure" => report.name.clone()).set(report.total as f64);
    gauge!(
        "sim_measures_measure_out_of_range",
        "measure" => report.name.clone()
    )
    .set(report.out_of_range as f64);

    for sample in &report.samples {
        histogram!(
            "sim_measures_period_count",
            "measure" => report.name.clone()
        )
        .record(sample.count as f64);
    }
}

/// Record a report delivery to a sink
pub fn record_report_dispatched(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "sim_measures_reports_dispatched_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Freeze into the report representation
    pub fn summary(&self) -> SampleStats {
        SampleStats {
            count: self.count,
            min: self.min,
            max: self.max,
            mean: self.mean(),
            std_dev: self.std_dev(),
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::default();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}
