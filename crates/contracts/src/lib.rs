//! # Contracts
//!
//! Shared interface contracts between the measurement crates.
//! Every business crate depends on this crate only; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Uses simulation time (seconds since the run started, f64) as the only clock
//! - The simulator writes it with a comma decimal separator (`12,345`)

mod blueprint;
mod descriptor;
mod error;
mod event;
mod measure;
mod message_type;
mod report;
mod scan;
mod sink;

pub use blueprint::*;
pub use descriptor::{MeasureDescriptor, MAX_SAMPLES};
pub use error::*;
pub use event::*;
pub use measure::Measure;
pub use message_type::MessageTypeKey;
pub use report::*;
pub use scan::ScanStats;
pub use sink::*;
