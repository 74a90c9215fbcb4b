//! Logging and observability
//!
//! Structured logging via `tracing`: human-readable console output,
//! plus an optional JSON file layer with rotation for long-running
//! streams.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
