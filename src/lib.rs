// vitalstream - Synthetic Clinical Encounter Stream Producer
// Copyright (c) 2025 Vitalstream Contributors
// Licensed under the MIT License

//! # vitalstream - Synthetic Clinical Encounter Stream Producer
//!
//! vitalstream reads Synthea CSV exports (patients and encounters),
//! joins and transforms them into flat encounter events, occasionally
//! injects data-quality faults, and streams the events one at a time to
//! an Azure Event Hubs Kafka endpoint, looping over the source data
//! until a bounded count is reached.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The pipeline: derivation, fault injection, cyclic
//!   generation, and the paced publish loop
//! - [`ingest`] - CSV readers for the two source tables
//! - [`publish`] - The `EventSink` seam and the Kafka producer
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vitalstream::config::load_config;
//! use vitalstream::core::{EventGenerator, FaultInjector};
//! use vitalstream::ingest::{load_patients, read_encounters};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vitalstream.toml")?;
//! let delimiter = config.data.delimiter_byte();
//!
//! let patients = load_patients(&config.data.patients_file, delimiter)?;
//! let encounters = read_encounters(&config.data.encounters_file, delimiter)?
//!     .collect::<vitalstream::domain::Result<Vec<_>>>()?;
//!
//! let injector = FaultInjector::new(config.faults.clone());
//! let mut generator = EventGenerator::new(patients, encounters, injector)?;
//!
//! let event = generator.next_event();
//! println!("{}", serde_json::to_string(&event)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Terminal conditions (unreadable files, bad configuration, publish
//! failures) surface as [`domain::VitalstreamError`]. Per-field parse
//! failures never do: unparseable dates and costs resolve to absent
//! values and processing continues.
//!
//! ## Logging
//!
//! Structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! tracing::info!(count = 42, "Loaded patient references");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod ingest;
pub mod logging;
pub mod publish;
