//! Measure registry
//!
//! Named measures are rows in a lookup table (name -> message type), all
//! served by the same [`ForwardedMessages`] counter.

use std::collections::BTreeMap;

use contracts::{ContractError, MeasureConfig, MessageTypeKey};
use serde::Serialize;

use crate::ForwardedMessages;

/// Message type counted by `SentFCompositionMessages`
pub const FCOMPOSITION_MESSAGE: &str = "graphsearch.forward.message.FCompositionMessage";

pub const SENT_FCOMPOSITION_MESSAGES: &str = "SentFCompositionMessages";

/// (name, message type, description)
///
/// Only graph search payloads are logged as forwarded, so every row names a
/// `graphsearch.` message type.
const BUILTIN_MEASURES: &[(&str, &str, &str)] = &[
    (
        SENT_FCOMPOSITION_MESSAGES,
        FCOMPOSITION_MESSAGE,
        "Forwarded forward composition search messages",
    ),
    (
        "SentBCompositionMessages",
        "graphsearch.backward.message.BCompositionMessage",
        "Forwarded backward composition search messages",
    ),
    (
        "SentCompositionModificationMessages",
        "graphsearch.forward.message.CompositionModificationMessage",
        "Forwarded composition modification messages",
    ),
    (
        "SentInvalidCompositionsMessages",
        "graphsearch.forward.message.InvalidCompositionsMessage",
        "Forwarded invalid composition notifications",
    ),
    (
        "SentCompositionNotificationMessages",
        "graphsearch.bidirectionalsearch.message.CompositionNotificationMessage",
        "Forwarded bidirectional composition notifications",
    ),
    (
        "SentShortestPathNotificationMessages",
        "graphsearch.bidirectionalsearch.message.ShortestPathNotificationMessage",
        "Forwarded shortest path notifications",
    ),
];

/// Total `graphsearch.forward.message.FCompositionMessage` payloads forwarded
/// during a run, sampled every `period` seconds.
///
/// Arguments are passed through unchanged.
///
/// # Examples
/// ```
/// use measures::sent_fcomposition_messages;
///
/// let m = sent_fcomposition_messages(10.0, 1000.0);
/// assert_eq!(m.message_type_key(), "graphsearch.forward.message.FCompositionMessage");
/// assert_eq!(m.period(), 10.0);
/// assert_eq!(m.simulation_time(), 1000.0);
/// ```
pub fn sent_fcomposition_messages(period: f64, simulation_time: f64) -> ForwardedMessages {
    ForwardedMessages::new(
        SENT_FCOMPOSITION_MESSAGES,
        FCOMPOSITION_MESSAGE,
        period,
        simulation_time,
    )
}

/// One row of the registry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureEntry {
    pub name: String,
    pub message_type: MessageTypeKey,
    pub description: String,
}

/// Lookup table from measure names to message types
#[derive(Debug, Clone, Default)]
pub struct MeasureRegistry {
    entries: BTreeMap<String, MeasureEntry>,
}

impl MeasureRegistry {
    /// Registry without entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the builtin simulator message types
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (name, message_type, description) in BUILTIN_MEASURES {
            registry.entries.insert(
                name.to_string(),
                MeasureEntry {
                    name: name.to_string(),
                    message_type: MessageTypeKey::new(message_type),
                    description: description.to_string(),
                },
            );
        }
        registry
    }

    /// Add a measure
    ///
    /// # Errors
    /// `DuplicateMeasure` if the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        message_type: impl Into<MessageTypeKey>,
        description: impl Into<String>,
    ) -> Result<(), ContractError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(ContractError::duplicate_measure(name));
        }

        self.entries.insert(
            name.clone(),
            MeasureEntry {
                name,
                message_type: message_type.into(),
                description: description.into(),
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MeasureEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = &MeasureEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the counter registered under `name`
    ///
    /// # Errors
    /// `UnknownMeasure` if `name` is not registered.
    pub fn create(
        &self,
        name: &str,
        period: f64,
        simulation_time: f64,
    ) -> Result<ForwardedMessages, ContractError> {
        let entry = self
            .get(name)
            .ok_or_else(|| ContractError::unknown_measure(name))?;

        Ok(ForwardedMessages::new(
            entry.name.clone(),
            entry.message_type.clone(),
            period,
            simulation_time,
        ))
    }

    /// Build the counter for a config entry
    ///
    /// An explicit `message_type` wins over the registry; otherwise the name
    /// must be registered.
    pub fn resolve(
        &self,
        config: &MeasureConfig,
        period: f64,
        simulation_time: f64,
    ) -> Result<ForwardedMessages, ContractError> {
        match &config.message_type {
            Some(message_type) => Ok(ForwardedMessages::new(
                config.name.clone(),
                message_type.as_str(),
                period,
                simulation_time,
            )),
            None => self.create(&config.name, period, simulation_time),
        }
    }
}
