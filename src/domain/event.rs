//! Derived encounter event
//!
//! The fully joined, transformed, possibly fault-injected record that is
//! serialized and sent downstream. Created fresh per generator step and
//! discarded after publishing.

use serde::Serialize;

/// A derived encounter event ready for publishing
///
/// Serializes to a flat JSON object: absent values encode as `null`,
/// numbers as numbers. Field names are the wire contract consumed by
/// downstream cleaning jobs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EncounterEvent {
    pub encounter_id: String,
    pub patient_id: String,
    /// Gender from the joined patient reference; `None` when the
    /// patient was unmatched or the field was empty
    pub gender: Option<String>,
    /// Age in whole years at encounter start; `None` when either date
    /// failed to parse. Fault injection may overwrite this with an
    /// impossible sentinel.
    pub age: Option<u32>,
    /// Encounter class from the source row
    pub department: String,
    /// Raw encounter start timestamp; fault injection may overwrite
    /// this with the current wall-clock instant
    pub admission_time: String,
    pub discharge_time: String,
    pub organization_id: String,
    pub provider_id: String,
    pub payer_id: String,
    pub base_encounter_cost: Option<f64>,
    pub total_claim_cost: Option<f64>,
    pub payer_coverage: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> EncounterEvent {
        EncounterEvent {
            encounter_id: "E1".to_string(),
            patient_id: "P1".to_string(),
            gender: Some("F".to_string()),
            age: Some(42),
            department: "wellness".to_string(),
            admission_time: "2020-02-16T00:00:00Z".to_string(),
            discharge_time: "2020-02-16T01:00:00Z".to_string(),
            organization_id: "O1".to_string(),
            provider_id: "PR1".to_string(),
            payer_id: "PY1".to_string(),
            base_encounter_cost: Some(100.0),
            total_claim_cost: None,
            payer_coverage: None,
        }
    }

    #[test]
    fn test_serializes_flat_with_nulls() {
        let json = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(json["encounter_id"], "E1");
        assert_eq!(json["age"], 42);
        assert_eq!(json["base_encounter_cost"], 100.0);
        assert!(json["total_claim_cost"].is_null());
        assert!(json["payer_coverage"].is_null());
    }

    #[test]
    fn test_absent_age_serializes_null() {
        let mut event = sample_event();
        event.age = None;
        event.gender = None;
        let json = serde_json::to_value(event).unwrap();
        assert!(json["age"].is_null());
        assert!(json["gender"].is_null());
    }
}
