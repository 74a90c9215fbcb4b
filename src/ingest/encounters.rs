//! Encounter source
//!
//! Produces the encounter table as a lazy sequence of raw rows in file
//! order. The caller decides how much to materialize; the generator
//! collects the whole sequence once at startup.

use crate::domain::{RawEncounter, Result, VitalstreamError};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::path::Path;

const COL_ID: &str = "Id";
const COL_START: &str = "START";
const COL_STOP: &str = "STOP";
const COL_PATIENT: &str = "PATIENT";
const COL_ORGANIZATION: &str = "ORGANIZATION";
const COL_PROVIDER: &str = "PROVIDER";
const COL_PAYER: &str = "PAYER";
const COL_ENCOUNTER_CLASS: &str = "ENCOUNTERCLASS";
const COL_BASE_ENCOUNTER_COST: &str = "BASE_ENCOUNTER_COST";
const COL_TOTAL_CLAIM_COST: &str = "TOTAL_CLAIM_COST";
const COL_PAYER_COVERAGE: &str = "PAYER_COVERAGE";

/// Column positions resolved from the header row
///
/// Absent columns resolve to `None` and read back as empty strings.
#[derive(Debug, Clone)]
struct EncounterColumns {
    id: Option<usize>,
    start: Option<usize>,
    stop: Option<usize>,
    patient: Option<usize>,
    organization: Option<usize>,
    provider: Option<usize>,
    payer: Option<usize>,
    encounter_class: Option<usize>,
    base_encounter_cost: Option<usize>,
    total_claim_cost: Option<usize>,
    payer_coverage: Option<usize>,
}

impl EncounterColumns {
    fn from_headers(headers: &StringRecord) -> Self {
        let column = |name: &str| headers.iter().position(|h| h == name);
        Self {
            id: column(COL_ID),
            start: column(COL_START),
            stop: column(COL_STOP),
            patient: column(COL_PATIENT),
            organization: column(COL_ORGANIZATION),
            provider: column(COL_PROVIDER),
            payer: column(COL_PAYER),
            encounter_class: column(COL_ENCOUNTER_CLASS),
            base_encounter_cost: column(COL_BASE_ENCOUNTER_COST),
            total_claim_cost: column(COL_TOTAL_CLAIM_COST),
            payer_coverage: column(COL_PAYER_COVERAGE),
        }
    }

    fn extract(&self, record: &StringRecord) -> RawEncounter {
        let field =
            |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("").to_string();
        RawEncounter {
            id: field(self.id),
            patient: field(self.patient),
            start: field(self.start),
            stop: field(self.stop),
            organization: field(self.organization),
            provider: field(self.provider),
            payer: field(self.payer),
            encounter_class: field(self.encounter_class),
            base_encounter_cost: field(self.base_encounter_cost),
            total_claim_cost: field(self.total_claim_cost),
            payer_coverage: field(self.payer_coverage),
        }
    }
}

/// Lazy iterator over raw encounter rows in file order
pub struct EncounterReader {
    records: StringRecordsIntoIter<File>,
    columns: EncounterColumns,
}

impl Iterator for EncounterReader {
    type Item = Result<RawEncounter>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|r| self.columns.extract(&r))
                .map_err(VitalstreamError::from),
        )
    }
}

/// Opens the encounter table as a lazy sequence of raw rows
///
/// # Errors
///
/// Returns [`VitalstreamError::Ingest`] if the file cannot be opened.
/// Malformed rows surface as errors from the returned iterator.
pub fn read_encounters(path: impl AsRef<Path>, delimiter: u8) -> Result<EncounterReader> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            VitalstreamError::Ingest(format!(
                "Failed to open encounters file {}: {}",
                path.display(),
                e
            ))
        })?;

    let columns = EncounterColumns::from_headers(reader.headers()?);

    Ok(EncounterReader {
        records: reader.into_records(),
        columns,
    })
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
    fn test_reads_rows_in_file_order() {
        let file = write_csv(
            "Id,START,STOP,PATIENT,ORGANIZATION,PROVIDER,PAYER,ENCOUNTERCLASS,BASE_ENCOUNTER_COST,TOTAL_CLAIM_COST,PAYER_COVERAGE\n\
             E1,2020-02-16T00:00:00Z,2020-02-16T01:00:00Z,P1,O1,PR1,PY1,wellness,100.0,150.0,50.0\n\
             E2,2021-03-01T09:00:00Z,2021-03-01T10:00:00Z,P2,O1,PR2,PY1,ambulatory,85.5,,\n",
        );

        let encounters: Vec<RawEncounter> = read_encounters(file.path(), b',')
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(encounters.len(), 2);
        assert_eq!(encounters[0].id, "E1");
        assert_eq!(encounters[0].encounter_class, "wellness");
        assert_eq!(encounters[0].base_encounter_cost, "100.0");
        assert_eq!(encounters[1].id, "E2");
        assert_eq!(encounters[1].total_claim_cost, "");
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let file = write_csv("Id,PATIENT,START\nE1,P1,2020-02-16T00:00:00Z\n");

        let encounters: Vec<RawEncounter> = read_encounters(file.path(), b',')
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(encounters[0].id, "E1");
        assert_eq!(encounters[0].payer, "");
        assert_eq!(encounters[0].payer_coverage, "");
    }

    #[test]
    fn test_empty_file_yields_no_rows() {
        let file = write_csv("Id,PATIENT,START\n");

        let encounters: Vec<RawEncounter> = read_encounters(file.path(), b',')
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert!(encounters.is_empty());
    }

    #[test]
    fn test_missing_file_is_terminal() {
        let result = read_encounters("/nonexistent/encounters.csv", b',');
        assert!(matches!(result, Err(VitalstreamError::Ingest(_))));
    }
}
