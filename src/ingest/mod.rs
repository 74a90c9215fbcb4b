//! Source data ingestion
//!
//! CSV readers for the two source tables. Both run once at startup:
//! the patient table becomes an in-memory reference map, the encounter
//! table a lazy row sequence the generator materializes.

pub mod encounters;
pub mod patients;

pub use encounters::{read_encounters, EncounterReader};
pub use patients::load_patients;
