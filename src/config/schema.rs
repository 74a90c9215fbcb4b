//! Configuration schema types
//!
//! This module defines the configuration structure for vitalstream.
//! The root struct maps to the TOML file; every section carries its
//! own `validate()`.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::Deserialize;

/// Main vitalstream configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Deserialize)]
pub struct VitalstreamConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Source data files
    pub data: DataConfig,

    /// Event Hubs Kafka endpoint settings
    pub stream: StreamConfig,

    /// Publishing pace and bounds
    #[serde(default)]
    pub publisher: PublisherConfig,

    /// Data-quality fault injection
    #[serde(default)]
    pub faults: FaultConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VitalstreamConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value found
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.data.validate()?;
        self.stream.validate()?;
        self.publisher.validate()?;
        self.faults.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (print events instead of publishing)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Source data configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the patient table CSV
    pub patients_file: String,

    /// Path to the encounter table CSV
    pub encounters_file: String,

    /// CSV field delimiter (single ASCII character)
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl DataConfig {
    fn validate(&self) -> Result<(), String> {
        if self.patients_file.trim().is_empty() {
            return Err("data.patients_file must not be empty".to_string());
        }
        if self.encounters_file.trim().is_empty() {
            return Err("data.encounters_file must not be empty".to_string());
        }
        if self.delimiter.len() != 1 || !self.delimiter.is_ascii() {
            return Err(format!(
                "data.delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ));
        }
        Ok(())
    }

    /// The delimiter as the single byte the csv reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes()[0]
    }
}

/// Event Hubs Kafka endpoint configuration
///
/// Azure Event Hubs exposes a Kafka-compatible endpoint on port 9093
/// authenticated with SASL/PLAIN where the username is the literal
/// `$ConnectionString` and the password is the namespace connection
/// string.
#[derive(Debug, Deserialize)]
pub struct StreamConfig {
    /// Fully qualified Event Hubs namespace host
    /// (e.g. `mynamespace.servicebus.windows.net`)
    pub namespace: String,

    /// Event hub (Kafka topic) to publish to
    pub event_hub: String,

    /// Namespace connection string (use `${EVENTHUB_CONNECTION_STRING}`)
    pub connection_string: SecretString,

    /// Kafka endpoint port
    #[serde(default = "default_kafka_port")]
    pub port: u16,

    /// Producer message timeout in milliseconds
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,
}

impl StreamConfig {
    fn validate(&self) -> Result<(), String> {
        if self.namespace.trim().is_empty() {
            return Err("stream.namespace must not be empty".to_string());
        }
        if self.event_hub.trim().is_empty() {
            return Err("stream.event_hub must not be empty".to_string());
        }
        if self.connection_string.expose_secret().is_empty() {
            return Err("stream.connection_string must not be empty".to_string());
        }
        Ok(())
    }

    /// Bootstrap server list for the Kafka client
    pub fn bootstrap_servers(&self) -> String {
        format!("{}:{}", self.namespace, self.port)
    }
}

/// Publishing pace and bounds
#[derive(Debug, Clone, Deserialize)]
pub struct PublisherConfig {
    /// Maximum number of events to send per run
    #[serde(default = "default_max_events")]
    pub max_events: u64,

    /// Fixed delay between sends in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            max_events: default_max_events(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl PublisherConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_events == 0 {
            return Err("publisher.max_events must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Data-quality fault injection configuration
///
/// Defaults match the historical producer: 5% impossible age, 5%
/// future admission time, sentinel age 150.
#[derive(Debug, Clone, Deserialize)]
pub struct FaultConfig {
    /// Master switch for fault injection
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Probability of overwriting age with the sentinel
    #[serde(default = "default_fault_probability")]
    pub age_probability: f64,

    /// Probability of overwriting admission_time with wall-clock now
    #[serde(default = "default_fault_probability")]
    pub admission_probability: f64,

    /// Sentinel value written by the age fault
    #[serde(default = "default_age_sentinel")]
    pub age_sentinel: u32,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            age_probability: default_fault_probability(),
            admission_probability: default_fault_probability(),
            age_sentinel: default_age_sentinel(),
        }
    }
}

impl FaultConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, p) in [
            ("faults.age_probability", self.age_probability),
            ("faults.admission_probability", self.admission_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be within [0, 1], got {p}"));
            }
        }
        if self.age_probability + self.admission_probability > 1.0 {
            return Err(
                "faults.age_probability + faults.admission_probability must not exceed 1"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging in addition to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation policy (daily or hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !["daily", "hourly"].contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be 'daily' or 'hourly'",
                self.local_rotation
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_kafka_port() -> u16 {
    9093
}

fn default_message_timeout_ms() -> u64 {
    30_000
}

fn default_max_events() -> u64 {
    1000
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_fault_probability() -> f64 {
    0.05
}

fn default_age_sentinel() -> u32 {
    150
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
