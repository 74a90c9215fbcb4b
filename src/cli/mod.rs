//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for vitalstream using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// vitalstream - Synthetic clinical encounter stream producer
#[derive(Parser, Debug)]
#[command(name = "vitalstream")]
#[command(version, about, long_about = None)]
#[command(author = "Vitalstream Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vitalstream.toml", env = "VITALSTREAM_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VITALSTREAM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream derived encounter events to the configured event hub
    Stream(commands::stream::StreamArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
