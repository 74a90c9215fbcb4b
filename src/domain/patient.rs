//! Patient reference record
//!
//! The demographic attributes the pipeline needs from the patient table.
//! Loaded once at startup into a map keyed by patient identifier and
//! read-only afterwards.

/// Demographic reference data for a single patient
///
/// Every field is a raw string taken from the source CSV and may be
/// empty. `Default` yields the all-empty reference, which is what an
/// encounter joins against when its patient identifier is missing or
/// unmatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientRef {
    /// Raw birth date string, format varies across Synthea exports
    pub birthdate_raw: String,
    pub gender: String,
    pub race: String,
    pub ethnicity: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}
