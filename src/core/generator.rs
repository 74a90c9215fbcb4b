//! Cyclic event generator
//!
//! Walks the encounter sequence forever, wrapping back to the first row
//! after the last one, joining each row against the patient reference
//! map and deriving a finished event per step. The sequence is
//! materialized once at construction; iteration state is just a cursor.

use crate::core::derive::derive_event;
use crate::core::faults::FaultInjector;
use crate::domain::{EncounterEvent, PatientRef, RawEncounter, Result, VitalstreamError};
use std::collections::HashMap;

/// Infinite generator of derived encounter events
///
/// Construction fails on an empty encounter sequence; afterwards
/// [`next_event`](Self::next_event) never fails and never ends.
pub struct EventGenerator {
    patients: HashMap<String, PatientRef>,
    encounters: Vec<RawEncounter>,
    cursor: usize,
    injector: FaultInjector,
}

impl EventGenerator {
    /// Creates a generator over a materialized encounter sequence
    ///
    /// # Errors
    ///
    /// Returns [`VitalstreamError::Configuration`] if the encounter
    /// sequence is empty.
    pub fn new(
        patients: HashMap<String, PatientRef>,
        encounters: Vec<RawEncounter>,
        injector: FaultInjector,
    ) -> Result<Self> {
        if encounters.is_empty() {
            return Err(VitalstreamError::Configuration(
                "No encounters found in the encounters file".to_string(),
            ));
        }

        Ok(Self {
            patients,
            encounters,
            cursor: 0,
            injector,
        })
    }

    /// Number of distinct encounters in one full cycle
    pub fn cycle_len(&self) -> usize {
        self.encounters.len()
    }

    /// Derives the next event and advances the cursor
    ///
    /// The cursor wraps modulo the sequence length, so the generator
    /// revisits the first encounter after the last one. An encounter
    /// whose patient identifier is missing or unmatched joins against
    /// the empty reference rather than failing.
    pub fn next_event(&mut self) -> EncounterEvent {
        let encounter = &self.encounters[self.cursor];
        self.cursor = (self.cursor + 1) % self.encounters.len();

        let empty = PatientRef::default();
        let patient = self.patients.get(&encounter.patient).unwrap_or(&empty);

        let mut event = derive_event(encounter, patient);
        self.injector.apply(&mut event);
        event
    }
}
