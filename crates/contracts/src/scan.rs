//! ScanStats - log scanning counters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Counters gathered while scanning simulation logs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Log files scanned
    pub files: u64,

    /// Lines read
    pub lines: u64,

    /// Lines recognized as events
    pub events: u64,

    /// Lines that are not events
    pub ignored: u64,

    /// Event lines that could not be parsed
    pub parse_errors: u64,

    /// Events per message type, whether measured or not
    pub by_message_type: BTreeMap<String, u64>,
}

impl ScanStats {
    /// Fold another scan into this one
    pub fn merge(&mut self, other: &ScanStats) {
        self.files += other.files;
        self.lines += other.lines;
        self.events += other.events;
        self.ignored += other.ignored;
        self.parse_errors += other.parse_errors;
        for (message_type, count) in &other.by_message_type {
            *self.by_message_type.entry(message_type.clone()).or_insert(0) += count;
        }
    }
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Scan Summary ===")?;
        writeln!(f, "Files: {}", self.files)?;
        writeln!(f, "Lines: {}", self.lines)?;
        writeln!(f, "Events: {}", self.events)?;
        writeln!(f, "Ignored lines: {}", self.ignored)?;
        writeln!(f, "Parse errors: {}", self.parse_errors)?;

        if !self.by_message_type.is_empty() {
            writeln!(f, "Forwarded message types:")?;
            for (message_type, count) in &self.by_message_type {
                writeln!(f, "  {}: {}", message_type, count)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut a = ScanStats {
            files: 1,
            lines: 10,
            events: 4,
            ignored: 6,
            parse_errors: 0,
            by_message_type: BTreeMap::from([("x.A".to_string(), 4)]),
        };
        let b = ScanStats {
            files: 1,
            lines: 5,
            events: 3,
            ignored: 1,
            parse_errors: 1,
            by_message_type: BTreeMap::from([("x.A".to_string(), 1), ("x.B".to_string(), 2)]),
        };

        a.merge(&b);

        assert_eq!(a.files, 2);
        assert_eq!(a.lines, 15);
        assert_eq!(a.parse_errors, 1);
        assert_eq!(a.by_message_type.get("x.A"), Some(&5));
        assert_eq!(a.by_message_type.get("x.B"), Some(&2));
    }

    #[test]
    fn test_display() {
        let stats = ScanStats {
            lines: 100,
            ..Default::default()
        };
        let output = format!("{}", stats);
        assert!(output.contains("Lines: 100"));
        assert!(!output.contains("Forwarded message types"));
    }
}
