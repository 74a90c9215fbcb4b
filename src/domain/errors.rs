//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types
//! beyond what a caller needs to react to.

use thiserror::Error;

/// Main vitalstream error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum VitalstreamError {
    /// Configuration-related errors (bad TOML, invalid values, empty dataset)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Source data ingestion errors (unreadable files, malformed CSV)
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Publish errors from the event stream producer
    #[error("Publish error: {0}")]
    Publish(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for VitalstreamError {
    fn from(err: std::io::Error) -> Self {
        VitalstreamError::Io(err.to_string())
    }
}

impl From<csv::Error> for VitalstreamError {
    fn from(err: csv::Error) -> Self {
        VitalstreamError::Ingest(err.to_string())
    }
}

impl From<serde_json::Error> for VitalstreamError {
    fn from(err: serde_json::Error) -> Self {
        VitalstreamError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for VitalstreamError {
    fn from(err: toml::de::Error) -> Self {
        VitalstreamError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<rdkafka::error::KafkaError> for VitalstreamError {
    fn from(err: rdkafka::error::KafkaError) -> Self {
        VitalstreamError::Publish(err.to_string())
    }
}
