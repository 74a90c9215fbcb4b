//! Raw encounter record
//!
//! One row of the encounter table, untransformed. All fields are raw
//! strings; parsing and coercion happen during field derivation.

/// A single raw encounter row from the source CSV
///
/// Cost fields are strings that may be empty or invalid; timestamps are
/// strings in mixed formats. The `patient` foreign key may reference a
/// patient that does not exist in the reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEncounter {
    pub id: String,
    pub patient: String,
    pub start: String,
    pub stop: String,
    pub organization: String,
    pub provider: String,
    pub payer: String,
    pub encounter_class: String,
    pub base_encounter_cost: String,
    pub total_claim_cost: String,
    pub payer_coverage: String,
}
