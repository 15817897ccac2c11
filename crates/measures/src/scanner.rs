//! Log scanner
//!
//! Reads simulation logs line by line and feeds parsed events to a
//! [`MeasureSet`].

use std::io::BufRead;
use std::path::Path;

use contracts::{ContractError, LogEvent, ScanStats};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};

use crate::{parse_line, MeasureSet};

/// Line-oriented log scanner
#[derive(Debug, Clone, Copy, Default)]
pub struct LogScanner {
    /// Abort on the first malformed forwarding line
    strict: bool,
}

impl LogScanner {
    /// Lenient scanner: malformed lines are logged and counted
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Scan an in-memory or blocking reader
    ///
    /// # Errors
    /// - IO failure while reading
    /// - `LogParse` in strict mode
    pub fn scan_reader<R: BufRead>(
        &self,
        reader: R,
        measures: &mut MeasureSet,
    ) -> Result<ScanStats, ContractError> {
        let mut stats = ScanStats {
            files: 1,
            ..Default::default()
        };

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            self.process_line(idx as u64 + 1, &line, measures, &mut stats)?;
        }

        Ok(stats)
    }

    /// Scan a log file without blocking the runtime
    ///
    /// # Errors
    /// - File open/read failure (including invalid UTF-8)
    /// - `LogParse` in strict mode
    #[instrument(name = "scan_file", skip(self, measures), fields(path = %path.display()))]
    pub async fn scan_file(
        &self,
        path: &Path,
        measures: &mut MeasureSet,
    ) -> Result<ScanStats, ContractError> {
        let file = File::open(path).await?;
        let mut lines = BufReader::new(file).lines();

        let mut stats = ScanStats {
            files: 1,
            ..Default::default()
        };
        let mut line_no = 0u64;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            self.process_line(line_no, &line, measures, &mut stats)?;
        }

        info!(
            lines = stats.lines,
            events = stats.events,
            parse_errors = stats.parse_errors,
            "Log file scanned"
        );

        Ok(stats)
    }

    fn process_line(
        &self,
        line_no: u64,
        line: &str,
        measures: &mut MeasureSet,
        stats: &mut ScanStats,
    ) -> Result<(), ContractError> {
        stats.lines += 1;

        match parse_line(line) {
            Ok(Some(event)) => {
                stats.events += 1;
                if let LogEvent::Forwarded(forwarded) = &event {
                    *stats
                        .by_message_type
                        .entry(forwarded.message_type.to_string())
                        .or_insert(0) += 1;
                }
                measures.observe(&event);
            }
            Ok(None) => stats.ignored += 1,
            Err(e) => {
                let e = e.at_line(line_no);
                if self.strict {
                    return Err(e);
                }
                warn!(line_no, error = %e, "Skipping malformed log line");
                observability::record_parse_error();
                stats.parse_errors += 1;
            }
        }

        if line_no % 100_000 == 0 {
            debug!(line_no, events = stats.events, "Scan progress");
        }

        Ok(())
    }
}
