//! MessageTypeKey - shared message type name

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Fully-qualified message type name as written by the simulator,
/// e.g. `graphsearch.forward.message.FCompositionMessage`.
///
/// Created once per measure and cloned into every event and report that
/// mentions it, so the name is held behind an `Arc`.
///
/// # Examples
/// ```
/// use contracts::MessageTypeKey;
///
/// let key: MessageTypeKey = "graphsearch.forward.message.FCompositionMessage".into();
/// assert_eq!(key, "graphsearch.forward.message.FCompositionMessage");
/// assert_eq!(key.to_string(), key.as_str());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTypeKey(Arc<str>);

impl MessageTypeKey {
    #[inline]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageTypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MessageTypeKey {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for MessageTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Parsed log lines compare against the measure's key as plain text
impl PartialEq<str> for MessageTypeKey {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for MessageTypeKey {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for MessageTypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MessageTypeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
