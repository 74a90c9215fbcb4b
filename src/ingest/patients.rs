//! Patient reference loader
//!
//! Reads the patient table once at startup into a map keyed by patient
//! identifier. Rows without an identifier are skipped, missing columns
//! default to the empty string, and field contents are not validated;
//! only an unreadable file is an error.

use crate::domain::{PatientRef, Result, VitalstreamError};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

const COL_ID: &str = "Id";
const COL_BIRTHDATE: &str = "BIRTHDATE";
const COL_GENDER: &str = "GENDER";
const COL_RACE: &str = "RACE";
const COL_ETHNICITY: &str = "ETHNICITY";
const COL_CITY: &str = "CITY";
const COL_STATE: &str = "STATE";
const COL_ZIP: &str = "ZIP";

/// Loads the patient table into a map keyed by patient identifier
///
/// # Errors
///
/// Returns [`VitalstreamError::Ingest`] if the file cannot be opened or
/// a row cannot be read.
pub fn load_patients(
    path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<HashMap<String, PatientRef>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            VitalstreamError::Ingest(format!(
                "Failed to open patients file {}: {}",
                path.display(),
                e
            ))
        })?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let id_col = column(COL_ID);
    let birthdate_col = column(COL_BIRTHDATE);
    let gender_col = column(COL_GENDER);
    let race_col = column(COL_RACE);
    let ethnicity_col = column(COL_ETHNICITY);
    let city_col = column(COL_CITY);
    let state_col = column(COL_STATE);
    let zip_col = column(COL_ZIP);

    let mut patients = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let field =
            |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("").to_string();

        let id = field(id_col);
        if id.is_empty() {
            continue;
        }

        patients.insert(
            id,
            PatientRef {
                birthdate_raw: field(birthdate_col),
                gender: field(gender_col),
                race: field(race_col),
                ethnicity: field(ethnicity_col),
                city: field(city_col),
                state: field(state_col),
                zip: field(zip_col),
            },
        );
    }

    Ok(patients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_patients_keyed_by_id() {
        let file = write_csv(
            "Id,BIRTHDATE,GENDER,RACE,ETHNICITY,CITY,STATE,ZIP\n\
             P1,2/17/2019,F,white,nonhispanic,Boston,MA,02108\n\
             P2,1980-05-04,M,asian,hispanic,Salem,MA,01970\n",
        );

        let patients = load_patients(file.path(), b',').unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients["P1"].birthdate_raw, "2/17/2019");
        assert_eq!(patients["P1"].gender, "F");
        assert_eq!(patients["P2"].city, "Salem");
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let file = write_csv(
            "Id,BIRTHDATE,GENDER\n\
             ,2/17/2019,F\n\
             P2,1980-05-04,M\n",
        );

        let patients = load_patients(file.path(), b',').unwrap();
        assert_eq!(patients.len(), 1);
        assert!(patients.contains_key("P2"));
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let file = write_csv("Id,BIRTHDATE\nP1,2/17/2019\n");

        let patients = load_patients(file.path(), b',').unwrap();
        assert_eq!(patients["P1"].gender, "");
        assert_eq!(patients["P1"].zip, "");
    }

    #[test]
    fn test_missing_file_is_terminal() {
        let result = load_patients("/nonexistent/patients.csv", b',');
        assert!(matches!(result, Err(VitalstreamError::Ingest(_))));
    }
}
