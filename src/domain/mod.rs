//! Domain models and types for vitalstream.
//!
//! The domain layer provides:
//! - **Source records** ([`PatientRef`], [`RawEncounter`])
//! - **The derived wire record** ([`EncounterEvent`])
//! - **Error types** ([`VitalstreamError`])
//! - **Result type alias** ([`Result`])
//!
//! All fallible operations in the crate return [`Result<T>`]; parse
//! failures on individual fields are deliberately *not* errors (they
//! resolve to `None`), so the error type only covers terminal
//! conditions: bad configuration, unreadable input, failed publishes.

pub mod encounter;
pub mod errors;
pub mod event;
pub mod patient;
pub mod result;

pub use encounter::RawEncounter;
pub use errors::VitalstreamError;
pub use event::EncounterEvent;
pub use patient::PatientRef;
pub use result::Result;
