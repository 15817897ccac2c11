//! Sink implementations
//!
//! Contains StdoutSink, FileSink, and LogSink.

mod file;
mod log;
mod stdout;

pub use self::file::{FileSink, FileSinkConfig};
pub use self::log::LogSink;
pub use self::stdout::{render_text, OutputFormat, StdoutSink};
