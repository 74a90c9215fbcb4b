//! Stream command implementation
//!
//! Wires the whole pipeline together: load the two source tables, build
//! the cyclic generator with fault injection, and run the bounded
//! publish loop against the configured sink.

use crate::config::load_config;
use crate::core::{EventGenerator, FaultInjector, StreamDriver};
use crate::domain::Result;
use crate::ingest::{load_patients, read_encounters};
use crate::publish::{EventSink, KafkaSink, PrintSink};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the stream command
#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - print events instead of publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Override the maximum number of events to send
    #[arg(long)]
    pub max_events: Option<u64>,

    /// Override the delay between sends in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl StreamArgs {
    /// Execute the stream command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting stream command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(max_events) = self.max_events {
            tracing::info!(max_events, "Overriding max events from CLI");
            config.publisher.max_events = max_events;
        }
        if let Some(delay_ms) = self.delay_ms {
            tracing::info!(delay_ms, "Overriding send delay from CLI");
            config.publisher.delay_ms = delay_ms;
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - no events will be published");
            println!("🔍 DRY RUN MODE - Events will be printed, not published");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !config.application.dry_run {
            println!("Stream Configuration:");
            println!("  Event Hub: {}", config.stream.event_hub);
            println!("  Namespace: {}", config.stream.namespace);
            println!("  Max Events: {}", config.publisher.max_events);
            println!("  Delay: {}ms", config.publisher.delay_ms);
            println!(
                "  Fault Injection: {}",
                if config.faults.enabled { "on" } else { "off" }
            );
            println!();
            print!("Proceed with streaming? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Streaming cancelled.");
                return Ok(0);
            }
        }

        // Build the pipeline
        let mut generator = match build_generator(&config) {
            Ok(g) => g,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build event generator");
                eprintln!("Failed to build event generator: {e}");
                return Ok(2);
            }
        };

        let sink: Box<dyn EventSink> = if config.application.dry_run {
            Box::new(PrintSink)
        } else {
            match KafkaSink::new(&config.stream) {
                Ok(s) => Box::new(s),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to connect to event hub");
                    eprintln!("Failed to connect to event hub: {e}");
                    return Ok(4); // Connection error exit code
                }
            }
        };

        tracing::info!(
            event_hub = %config.stream.event_hub,
            max_events = config.publisher.max_events,
            delay_ms = config.publisher.delay_ms,
            "Starting to stream events"
        );
        println!("🚀 Streaming events...");
        println!();

        let mut driver = StreamDriver::new(sink, &config.publisher, shutdown_signal);
        let summary = match driver.run(&mut generator).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Streaming failed");
                eprintln!("Streaming failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        println!();
        println!("📊 Stream Summary:");
        println!("  Events Sent: {}", summary.events_sent);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        let exit_code = if summary.interrupted {
            println!("⚠️  Streaming interrupted gracefully. Publish channel flushed.");
            tracing::info!("Streaming interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else {
            println!("✅ Streaming completed successfully!");
            0
        };

        Ok(exit_code)
    }
}

/// Loads both source tables and assembles the cyclic generator
fn build_generator(config: &crate::config::VitalstreamConfig) -> Result<EventGenerator> {
    let delimiter = config.data.delimiter_byte();

    let patients = load_patients(&config.data.patients_file, delimiter)?;
    tracing::info!(count = patients.len(), "Loaded patient references");

    let encounters = read_encounters(&config.data.encounters_file, delimiter)?
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(count = encounters.len(), "Loaded encounters");

    let injector = FaultInjector::new(config.faults.clone());
    EventGenerator::new(patients, encounters, injector)
}
