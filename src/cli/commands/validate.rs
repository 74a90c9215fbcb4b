//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // load_config already validated; print the effective settings
        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Patients File: {}", config.data.patients_file);
        println!("  Encounters File: {}", config.data.encounters_file);
        println!("  Namespace: {}", config.stream.namespace);
        println!("  Event Hub: {}", config.stream.event_hub);
        println!("  Bootstrap Servers: {}", config.stream.bootstrap_servers());
        println!("  Max Events: {}", config.publisher.max_events);
        println!("  Delay: {}ms", config.publisher.delay_ms);
        println!(
            "  Fault Injection: {} (age {:.0}%, admission {:.0}%, sentinel {})",
            if config.faults.enabled { "on" } else { "off" },
            config.faults.age_probability * 100.0,
            config.faults.admission_probability * 100.0,
            config.faults.age_sentinel
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {};
        let _ = format!("{args:?}");
    }
}
