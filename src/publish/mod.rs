//! Event publishing
//!
//! The publish seam is the [`EventSink`] trait: the driver only knows
//! how to hand an event over and how to close the channel. [`KafkaSink`]
//! is the production implementation against the Event Hubs Kafka
//! endpoint; [`PrintSink`] stands in for dry runs.

pub mod kafka;

use crate::domain::{EncounterEvent, Result};
use async_trait::async_trait;

pub use kafka::KafkaSink;

/// Destination for derived events
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publishes one event
    ///
    /// # Errors
    ///
    /// A publish failure is terminal; no retry is attempted.
    async fn publish(&self, event: &EncounterEvent) -> Result<()>;

    /// Flushes and closes the publish channel
    ///
    /// Called exactly once, on every exit path of the driver.
    async fn close(&self) -> Result<()>;
}

/// Sink that logs events instead of publishing them (dry-run mode)
#[derive(Debug, Default)]
pub struct PrintSink;

#[async_trait]
impl EventSink for PrintSink {
    async fn publish(&self, event: &EncounterEvent) -> Result<()> {
        let payload = serde_json::to_string(event)?;
        tracing::info!(encounter_id = %event.encounter_id, payload = %payload, "Dry-run event");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
