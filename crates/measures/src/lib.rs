//! # Measures
//!
//! Forwarded-message measures over simulation logs.
//!
//! Responsibilities:
//! - Parse forwarding lines into `LogEvent`s
//! - Count matching events per sampling period (`ForwardedMessages`)
//! - Map measure names to message types (`MeasureRegistry`)
//! - Drive a `MeasureSet` over log files (`LogScanner`)
//!
//! # Example
//!
//! ```
//! use measures::{parse_line, sent_fcomposition_messages, Measure};
//!
//! let mut measure = sent_fcomposition_messages(10.0, 100.0);
//! let line = "DEBUG Creator  - Peer 3 forwarding graphsearch.forward.message.FCompositionMessage to [S1:1] 12,500";
//! if let Some(event) = parse_line(line).unwrap() {
//!     measure.observe(&event);
//! }
//! assert_eq!(measure.report().total, 1);
//! ```

mod forwarded;
mod parser;
mod registry;
mod scanner;
mod set;

pub use contracts::{LogEvent, Measure, MeasureDescriptor, MeasureReport, ScanStats};
pub use forwarded::ForwardedMessages;
pub use parser::{parse_line, parse_timestamp};
pub use registry::{
    sent_fcomposition_messages, MeasureEntry, MeasureRegistry, FCOMPOSITION_MESSAGE,
    SENT_FCOMPOSITION_MESSAGES,
};
pub use scanner::LogScanner;
pub use set::MeasureSet;
