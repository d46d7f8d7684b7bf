//! Command-line interface for streamcue
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Voice-triggered stream overlay
#[derive(Parser, Debug)]
#[command(
    name = "streamcue",
    version,
    about = "Voice-triggered stream overlay: live transcription, keyword highlighting, game actions"
)]
pub struct Cli {
    /// Subcommand to execute (default: run the overlay)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress the startup banner and status output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Audio input device (substring of the device name)
    #[arg(long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Path to a Whisper GGML model file
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Language code for transcription. Examples: auto, fr, en
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Game control host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Game control port
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Trigger groups JSON file (canonical name -> variant list)
    #[arg(long, value_name = "PATH")]
    pub triggers: Option<PathBuf>,

    /// Item catalog JSON file (item id -> display name)
    #[arg(long, value_name = "PATH")]
    pub items: Option<PathBuf>,

    /// Cooldown between trigger dispatches. Examples: 1s, 500ms, 2s
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub cooldown: Option<Duration>,
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the overlay (default when no subcommand is given)
    Run,

    /// List available audio input devices
    Devices,

    /// Inspect configuration
    Config {
        /// Action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration inspection actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,
}
