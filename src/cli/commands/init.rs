//! Init command implementation
//!
//! Generates a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vitalstream.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing vitalstream configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credential:");
                println!("     - Set EVENTHUB_CONNECTION_STRING");
                println!("  3. Validate configuration: vitalstream validate-config");
                println!("  4. Start streaming: vitalstream stream");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# vitalstream Configuration File
# Streams synthetic clinical encounter events to an event hub

[application]
log_level = "info"
dry_run = false

[data]
# Synthea CSV exports
patients_file = "./data/synthea_data/patients.csv"
encounters_file = "./data/synthea_data/encounters.csv"
delimiter = ","

[stream]
# Event Hubs namespace host and hub (Kafka topic)
namespace = "mynamespace.servicebus.windows.net"
event_hub = "encounters"
# Namespace connection string (keep it out of this file)
connection_string = "${EVENTHUB_CONNECTION_STRING}"
port = 9093
message_timeout_ms = 30000

[publisher]
# How many events to send per run
max_events = 1000
# Delay between sends in milliseconds
delay_ms = 1000

[faults]
# Occasionally corrupt an event so downstream cleaning has work to do
enabled = true
age_probability = 0.05
admission_probability = 0.05
age_sentinel = 150

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }
}
