//! Kafka sink for the Azure Event Hubs Kafka endpoint
//!
//! Event Hubs speaks the Kafka protocol on port 9093 behind SASL/PLAIN
//! where the username is the literal `$ConnectionString` and the
//! password is the namespace connection string. Events are serialized
//! to JSON and produced without a partition key.

use crate::config::StreamConfig;
use crate::domain::{EncounterEvent, Result, VitalstreamError};
use crate::publish::EventSink;
use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use rdkafka::ClientConfig;
use secrecy::ExposeSecret;
use std::time::Duration;

/// How long to wait for broker metadata when probing the connection
const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

/// How long to wait for in-flight messages when closing
const FLUSH_TIMEOUT: Duration = Duration::from_secs(30);

/// Producer against one event hub (Kafka topic)
pub struct KafkaSink {
    producer: FutureProducer,
    topic: String,
}

impl KafkaSink {
    /// Connects a producer to the configured Event Hubs namespace
    ///
    /// Probes broker metadata for the target topic so an unreachable
    /// namespace or a bad credential fails at startup instead of at the
    /// first publish.
    ///
    /// # Errors
    ///
    /// Returns [`VitalstreamError::Publish`] if the producer cannot be
    /// created or the brokers cannot be reached.
    pub fn new(config: &StreamConfig) -> Result<KafkaSink> {
        let bootstrap_servers = config.bootstrap_servers();
        tracing::info!(bootstrap_servers = %bootstrap_servers, "Connecting to Kafka brokers");

        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", &bootstrap_servers)
            .set("security.protocol", "SASL_SSL")
            .set("sasl.mechanisms", "PLAIN")
            .set("sasl.username", "$ConnectionString")
            .set(
                "sasl.password",
                config.connection_string.expose_secret().as_ref(),
            )
            .set("message.timeout.ms", config.message_timeout_ms.to_string());

        let producer: FutureProducer = client_config.create()?;

        // Reach the brokers before the driver starts pulling events
        producer
            .client()
            .fetch_metadata(Some(&config.event_hub), Timeout::After(METADATA_TIMEOUT))?;
        tracing::info!(event_hub = %config.event_hub, "Connected to Kafka brokers");

        Ok(KafkaSink {
            producer,
            topic: config.event_hub.clone(),
        })
    }
}

#[async_trait]
impl EventSink for KafkaSink {
    async fn publish(&self, event: &EncounterEvent) -> Result<()> {
        let payload = serde_json::to_string(event)?;

        self.producer
            .send(
                FutureRecord::<(), str>::to(&self.topic).payload(&payload),
                Timeout::Never,
            )
            .await
            .map_err(|(e, _)| {
                tracing::error!(encounter_id = %event.encounter_id, error = %e, "Failed to produce event");
                VitalstreamError::from(e)
            })?;

        Ok(())
    }

    async fn close(&self) -> Result<()> {
        tracing::info!("Flushing and closing Kafka producer");
        self.producer.flush(FLUSH_TIMEOUT)?;
        Ok(())
    }
}
