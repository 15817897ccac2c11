//! LogEvent - parsed simulation log records

use serde::{Deserialize, Serialize};

use crate::MessageTypeKey;

/// Event recovered from one simulation log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum LogEvent {
    /// A peer forwarded a payload to one or more neighbors
    Forwarded(ForwardedEvent),
}

impl LogEvent {
    /// Simulation time of the event (seconds)
    pub fn time(&self) -> f64 {
        match self {
            LogEvent::Forwarded(event) => event.time,
        }
    }
}

/// `Peer <peer> forwarding <message_type> to <destinations> <time>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardedEvent {
    /// Forwarding peer
    pub peer: String,

    /// Payload type
    pub message_type: MessageTypeKey,

    /// Services the payload was addressed to (`<service>:<peer>` ids)
    #[serde(default)]
    pub destinations: Vec<String>,

    /// Simulation time (seconds)
    pub time: f64,
}
