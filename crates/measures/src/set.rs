//! MeasureSet - the measures of one run

use contracts::{ContractError, ExperimentBlueprint, LogEvent, Measure, MeasureReport};
use tracing::debug;

use crate::MeasureRegistry;

/// Owns the measures of a run and fans every event out to them.
#[derive(Default)]
pub struct MeasureSet {
    measures: Vec<Box<dyn Measure>>,
}

impl MeasureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every measure named in the blueprint
    ///
    /// # Errors
    /// `UnknownMeasure` for a name without registry entry or `message_type`.
    pub fn from_blueprint(
        blueprint: &ExperimentBlueprint,
        registry: &MeasureRegistry,
    ) -> Result<Self, ContractError> {
        let sim = &blueprint.simulation;
        let mut set = Self::new();

        for config in &blueprint.measures {
            let measure = registry.resolve(config, sim.period, sim.simulation_time)?;
            debug!(
                measure = %config.name,
                message_type = %measure.message_type_key(),
                "Measure registered"
            );
            set.push(measure);
        }

        Ok(set)
    }

    pub fn push(&mut self, measure: impl Measure + 'static) {
        self.measures.push(Box::new(measure));
    }

    pub fn observe(&mut self, event: &LogEvent) {
        for measure in &mut self.measures {
            measure.observe(event);
        }
    }

    /// Reports in insertion order
    pub fn reports(&self) -> Vec<MeasureReport> {
        self.measures.iter().map(|m| m.report()).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.measures.iter().map(|m| m.name())
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}

impl std::fmt::Debug for MeasureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureSet")
            .field("measures", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
