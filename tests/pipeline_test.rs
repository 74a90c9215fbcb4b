//! End-to-end pipeline tests over real CSV fixtures
//!
//! Covers the load → join → derive path and the cyclic generator
//! semantics, with fault injection disabled so derived values are
//! deterministic.

use std::io::Write;
use tempfile::NamedTempFile;
use vitalstream::config::FaultConfig;
use vitalstream::core::{EventGenerator, FaultInjector};
use vitalstream::domain::{Result, VitalstreamError};
use vitalstream::ingest::{load_patients, read_encounters};

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn disabled_injector() -> FaultInjector {
    FaultInjector::new(FaultConfig {
        enabled: false,
        ..FaultConfig::default()
    })
}

fn generator_from(patients_csv: &str, encounters_csv: &str) -> Result<EventGenerator> {
    let patients_file = write_csv(patients_csv);
    let encounters_file = write_csv(encounters_csv);

    let patients = load_patients(patients_file.path(), b',')?;
    let encounters = read_encounters(encounters_file.path(), b',')?.collect::<Result<Vec<_>>>()?;
    EventGenerator::new(patients, encounters, disabled_injector())
}

const PATIENTS: &str = "Id,BIRTHDATE,GENDER,RACE,ETHNICITY,CITY,STATE,ZIP\n\
     P1,2/17/2019,F,white,nonhispanic,Boston,MA,02108\n";

const ENCOUNTER_HEADER: &str = "Id,START,STOP,PATIENT,ORGANIZATION,PROVIDER,PAYER,ENCOUNTERCLASS,BASE_ENCOUNTER_COST,TOTAL_CLAIM_COST,PAYER_COVERAGE\n";

#[test]
fn test_undistorted_event_one_day_before_first_birthday() {
    let encounters = format!(
        "{ENCOUNTER_HEADER}E1,2020-02-16T00:00:00Z,2020-02-16T01:00:00Z,P1,O1,PR1,PY1,wellness,100.0,,\n"
    );
    let mut generator = generator_from(PATIENTS, &encounters).unwrap();

    let event = generator.next_event();
    assert_eq!(event.encounter_id, "E1");
    assert_eq!(event.patient_id, "P1");
    assert_eq!(event.age, Some(0));
    assert_eq!(event.department, "wellness");
    assert_eq!(event.gender, Some("F".to_string()));
    assert_eq!(event.admission_time, "2020-02-16T00:00:00Z");
    assert_eq!(event.base_encounter_cost, Some(100.0));
    assert_eq!(event.total_claim_cost, None);
    assert_eq!(event.payer_coverage, None);
}

#[test]
fn test_event_serializes_numbers_and_nulls() {
    let encounters = format!(
        "{ENCOUNTER_HEADER}E1,2020-02-16T00:00:00Z,,P1,,,,wellness,100.0,not-a-number,\n"
    );
    let mut generator = generator_from(PATIENTS, &encounters).unwrap();

    let json = serde_json::to_value(generator.next_event()).unwrap();
    assert_eq!(json["base_encounter_cost"], 100.0);
    assert!(json["total_claim_cost"].is_null());
    assert!(json["payer_coverage"].is_null());
    assert_eq!(json["age"], 0);
    assert_eq!(json["department"], "wellness");
}

#[test]
fn test_generator_wraps_cyclically() {
    let encounters = format!(
        "{ENCOUNTER_HEADER}\
         E1,2020-01-01T00:00:00Z,,P1,,,,wellness,,,\n\
         E2,2020-01-02T00:00:00Z,,P1,,,,ambulatory,,,\n\
         E3,2020-01-03T00:00:00Z,,P1,,,,emergency,,,\n"
    );
    let mut generator = generator_from(PATIENTS, &encounters).unwrap();
    let n = generator.cycle_len();
    assert_eq!(n, 3);

    // The kth output and the (k + N)th, (k + 2N)th outputs revisit the
    // same underlying encounter
    let ids: Vec<String> = (0..3 * n).map(|_| generator.next_event().encounter_id).collect();
    for k in 0..n {
        assert_eq!(ids[k], ids[k + n]);
        assert_eq!(ids[k], ids[k + 2 * n]);
    }
}

#[test]
fn test_unknown_patient_yields_absent_fields_not_error() {
    let encounters = format!(
        "{ENCOUNTER_HEADER}E1,2020-02-16T00:00:00Z,,UNKNOWN,,,,urgentcare,50.0,,\n"
    );
    let mut generator = generator_from(PATIENTS, &encounters).unwrap();

    let event = generator.next_event();
    assert_eq!(event.gender, None);
    assert_eq!(event.age, None);
    assert_eq!(event.department, "urgentcare");
    assert_eq!(event.base_encounter_cost, Some(50.0));
}

#[test]
fn test_unparseable_dates_yield_absent_age() {
    let patients = "Id,BIRTHDATE,GENDER\nP1,seventeenth of february,F\n";
    let encounters = format!("{ENCOUNTER_HEADER}E1,2020-02-16T00:00:00Z,,P1,,,,wellness,,,\n");
    let mut generator = generator_from(patients, &encounters).unwrap();

    let event = generator.next_event();
    assert_eq!(event.age, None);
    assert_eq!(event.gender, Some("F".to_string()));
}

#[test]
fn test_empty_encounter_file_is_configuration_error() {
    let result = generator_from(PATIENTS, ENCOUNTER_HEADER);
    assert!(matches!(result, Err(VitalstreamError::Configuration(_))));
}
