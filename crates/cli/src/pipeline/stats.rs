//! Pipeline statistics.

use std::time::Duration;

use contracts::{MeasureReport, ScanStats};
use reporter::DeliveryStats;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Merged over all scanned files
    pub scan: ScanStats,

    /// One report per measure, in configuration order
    pub reports: Vec<MeasureReport>,

    /// Delivery counts per sink
    pub sinks: Vec<(String, DeliveryStats)>,

    pub active_sinks: usize,

    pub duration: Duration,
}

impl PipelineStats {
    /// Scanned lines per second
    pub fn lines_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.scan.lines as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    pub fn sink_failures(&self) -> u64 {
        self.sinks.iter().map(|(_, m)| m.failed).sum()
    }

    /// Print a summary on stderr; stdout carries the reports
    pub fn print_summary(&self) {
        eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
        eprintln!("║                     Measurement Summary                      ║");
        eprintln!("╚══════════════════════════════════════════════════════════════╝\n");

        eprintln!("📊 Scan");
        eprintln!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        eprintln!("   ├─ Files: {}", self.scan.files);
        eprintln!("   ├─ Lines: {} ({:.0}/s)", self.scan.lines, self.lines_per_sec());
        eprintln!("   ├─ Forwarding events: {}", self.scan.events);
        eprintln!("   ├─ Ignored lines: {}", self.scan.ignored);
        eprintln!("   └─ Parse errors: {}", self.scan.parse_errors);

        eprintln!("\n📈 Measures");
        for (i, report) in self.reports.iter().enumerate() {
            let prefix = if i + 1 == self.reports.len() { "└─" } else { "├─" };
            eprintln!(
                "   {} {}: {} forwarded ({} out of range)",
                prefix, report.name, report.total, report.out_of_range
            );
        }

        eprintln!("\n📤 Sinks ({})", self.active_sinks);
        for (i, (name, delivered)) in self.sinks.iter().enumerate() {
            let prefix = if i + 1 == self.sinks.len() { "└─" } else { "├─" };
            eprintln!(
                "   {} {}: {} written, {} failed",
                prefix, name, delivered.written, delivered.failed
            );
        }

        eprintln!();
    }
}
