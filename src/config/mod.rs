//! Configuration management for vitalstream.
//!
//! TOML-based configuration loading, parsing, and validation with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VITALSTREAM_*` environment overrides
//! - Default values matching the historical producer
//! - Credential protection via [`SecretString`]
//!
//! # Example Configuration
//!
//! ```toml
//! [data]
//! patients_file = "./data/synthea_data/patients.csv"
//! encounters_file = "./data/synthea_data/encounters.csv"
//!
//! [stream]
//! namespace = "mynamespace.servicebus.windows.net"
//! event_hub = "encounters"
//! connection_string = "${EVENTHUB_CONNECTION_STRING}"
//!
//! [publisher]
//! max_events = 1000
//! delay_ms = 1000
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DataConfig, FaultConfig, LoggingConfig, PublisherConfig, StreamConfig,
    VitalstreamConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
