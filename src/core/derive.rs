//! Field derivation
//!
//! Pure transforms that turn a raw encounter row plus its patient
//! reference into a derived event: multi-format date parsing, age at
//! encounter, and numeric coercion of cost fields.
//!
//! Source datasets mix date formats inconsistently, so every parse here
//! falls back to "absent" instead of failing; downstream age
//! computation already tolerates missing inputs.

use crate::domain::{EncounterEvent, PatientRef, RawEncounter};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Format patterns tried in order for patient birth dates
///
/// Synthea exports use the US slash format (`2/17/2019`) most often,
/// with ISO dates and full UTC timestamps appearing in some datasets.
const BIRTH_DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%Y-%m-%dT%H:%M:%SZ"];

/// Format patterns tried in order for encounter start timestamps
///
/// Encounter START is usually a full UTC timestamp (`2019-02-17T05:07:38Z`).
const ENCOUNTER_START_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%SZ", "%m/%d/%Y", "%Y-%m-%d"];

/// Parses a raw birth date string, or `None` if no format matches
pub fn parse_birth_date(raw: &str) -> Option<NaiveDateTime> {
    parse_first_match(raw, &BIRTH_DATE_FORMATS)
}

/// Parses a raw encounter start string, or `None` if no format matches
pub fn parse_encounter_start(raw: &str) -> Option<NaiveDateTime> {
    parse_first_match(raw, &ENCOUNTER_START_FORMATS)
}

/// Tries each format in order and returns the first successful parse
///
/// Date-only formats resolve to midnight so both parse contracts share
/// one return type; only (year, month, day) feed the age computation.
fn parse_first_match(raw: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }
    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Computes age in whole years at the encounter start
///
/// Calendar year difference, minus one when the encounter's
/// (month, day) precedes the birth (month, day) within that year,
/// clamped to zero. Calendar-naive by design; the figure is
/// illustrative, not clinical.
pub fn age_at_encounter(
    birth: Option<NaiveDateTime>,
    start: Option<NaiveDateTime>,
) -> Option<u32> {
    let birth = birth?;
    let start = start?;

    let mut years = start.year() - birth.year();
    if (start.month(), start.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    Some(years.max(0) as u32)
}

/// Coerces an optional decimal string to a float, or `None` when the
/// string is empty or not a valid number
pub fn parse_cost(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Assembles a derived event from a raw encounter joined with its
/// patient reference
///
/// The reference may be the empty default when the encounter's patient
/// identifier is missing or unmatched; all derived fields then resolve
/// to absent.
pub fn derive_event(encounter: &RawEncounter, patient: &PatientRef) -> EncounterEvent {
    let birth = parse_birth_date(&patient.birthdate_raw);
    let start = parse_encounter_start(&encounter.start);

    EncounterEvent {
        encounter_id: encounter.id.clone(),
        patient_id: encounter.patient.clone(),
        gender: (!patient.gender.is_empty()).then(|| patient.gender.clone()),
        age: age_at_encounter(birth, start),
        department: encounter.encounter_class.clone(),
        admission_time: encounter.start.clone(),
        discharge_time: encounter.stop.clone(),
        organization_id: encounter.organization.clone(),
        provider_id: encounter.provider.clone(),
        payer_id: encounter.payer.clone(),
        base_encounter_cost: parse_cost(&encounter.base_encounter_cost),
        total_claim_cost: parse_cost(&encounter.total_claim_cost),
        payer_coverage: parse_cost(&encounter.payer_coverage),
    }
}
