//! Publisher driver
//!
//! Pulls events from the generator up to a bounded count, hands each to
//! the configured sink, and paces emission with a fixed sleep. The
//! driver owns the sink for the run and closes it on every exit path:
//! normal completion, user interruption, and publish failure.

use crate::config::PublisherConfig;
use crate::core::generator::EventGenerator;
use crate::domain::Result;
use crate::publish::EventSink;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// How many initial sends are logged before sampling kicks in
const LOG_FIRST_N: u64 = 10;

/// Sampling interval for progress logs after the initial burst
const LOG_EVERY_NTH: u64 = 100;

/// Summary of a streaming run
#[derive(Debug, Clone)]
pub struct StreamSummary {
    /// Number of events actually published
    pub events_sent: u64,

    /// Whether the run stopped on a shutdown signal
    pub interrupted: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// Bounded, paced publish loop over the event generator
pub struct StreamDriver {
    sink: Box<dyn EventSink>,
    max_events: u64,
    delay: Duration,
    shutdown_rx: watch::Receiver<bool>,
}

impl StreamDriver {
    /// Creates a driver that publishes through `sink`
    pub fn new(
        sink: Box<dyn EventSink>,
        config: &PublisherConfig,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            sink,
            max_events: config.max_events,
            delay: Duration::from_millis(config.delay_ms),
            shutdown_rx,
        }
    }

    /// Runs the publish loop to completion or interruption
    ///
    /// The sink is flushed and closed before this returns, on success
    /// and on failure alike. A publish error is terminal and propagates
    /// after the close attempt.
    pub async fn run(&mut self, generator: &mut EventGenerator) -> Result<StreamSummary> {
        let start = Instant::now();
        let mut sent = 0u64;
        let mut interrupted = false;

        let pump_result = self.pump(generator, &mut sent, &mut interrupted).await;

        // Best-effort flush/close on every exit path
        if let Err(e) = self.sink.close().await {
            tracing::warn!(error = %e, "Failed to flush publish channel on close");
        }

        pump_result?;

        if interrupted {
            tracing::info!(sent, "Streaming interrupted by shutdown signal");
        } else {
            tracing::info!(sent, "Streaming completed");
        }

        Ok(StreamSummary {
            events_sent: sent,
            interrupted,
            duration: start.elapsed(),
        })
    }

    async fn pump(
        &mut self,
        generator: &mut EventGenerator,
        sent: &mut u64,
        interrupted: &mut bool,
    ) -> Result<()> {
        while *sent < self.max_events {
            if *self.shutdown_rx.borrow() {
                *interrupted = true;
                return Ok(());
            }

            let event = generator.next_event();
            self.sink.publish(&event).await?;
            *sent += 1;

            if *sent <= LOG_FIRST_N || *sent % LOG_EVERY_NTH == 0 {
                tracing::info!(
                    sent = *sent,
                    max_events = self.max_events,
                    encounter_id = %event.encounter_id,
                    "Published event"
                );
            }

            // Paced sleep, cut short by a shutdown signal. A closed
            // channel means the controlling task is gone; stop as well.
            tokio::select! {
                _ = tokio::time::sleep(self.delay) => {}
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        *interrupted = true;
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }
}
