//! TOML configuration with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::defaults;
use crate::error::{Result, StreamcueError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub stt: SttConfig,
    pub window: WindowConfig,
    pub trigger: TriggerConfig,
    pub action: ActionConfig,
    pub overlay: OverlayConfig,
}

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub device: Option<String>,
    pub sample_rate: u32,
    pub chunk_ms: u32,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
    pub language: String,
    pub beam_size: usize,
}

/// Sliding window and inference cadence.
///
/// Durations are human-readable strings ("900ms", "4s").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub length: String,
    pub infer_every: String,
    pub min_audio: String,
}

/// Trigger matching and dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TriggerConfig {
    /// Path to a trigger-groups JSON file; built-in homophones when unset.
    pub groups_file: Option<PathBuf>,
    /// Path to an item-catalog JSON file; no item triggers when unset.
    pub items_file: Option<PathBuf>,
    /// Cooldown between dispatches, human-readable ("1s").
    pub cooldown: String,
    /// Command strings sent on every trigger fire.
    pub actions: Vec<String>,
}

/// Action sink connection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ActionConfig {
    pub host: String,
    pub port: u16,
}

/// Transcript overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    /// Terminal columns; autodetected when unset.
    pub columns: Option<usize>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            sample_rate: defaults::SAMPLE_RATE,
            chunk_ms: defaults::CHUNK_MS,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: "models/ggml-small.bin".to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            beam_size: defaults::DEFAULT_BEAM_SIZE,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            length: format!("{}s", defaults::WINDOW_SECS as u32),
            infer_every: format!("{}ms", defaults::INFER_EVERY_MS),
            min_audio: format!("{}ms", defaults::MIN_AUDIO_MS),
        }
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            groups_file: None,
            items_file: None,
            cooldown: humantime::format_duration(defaults::TRIGGER_COOLDOWN).to_string(),
            actions: defaults::DEFAULT_ACTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            host: defaults::ACTION_HOST.to_string(),
            port: defaults::ACTION_PORT,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { columns: None }
    }
}

fn parse_duration(key: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value).map_err(|e| StreamcueError::ConfigInvalidValue {
        key: key.to_string(),
        message: format!("{value:?}: {e}"),
    })
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StreamcueError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                StreamcueError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file, or defaults if the file is missing.
    ///
    /// Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(StreamcueError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - STREAMCUE_MODEL → stt.model
    /// - STREAMCUE_LANGUAGE → stt.language
    /// - STREAMCUE_AUDIO_DEVICE → audio.device
    /// - STREAMCUE_ACTION_PORT → action.port
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("STREAMCUE_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(language) = std::env::var("STREAMCUE_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }

        if let Ok(device) = std::env::var("STREAMCUE_AUDIO_DEVICE")
            && !device.is_empty()
        {
            self.audio.device = Some(device);
        }

        if let Ok(port) = std::env::var("STREAMCUE_ACTION_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            self.action.port = port;
        }

        self
    }

    /// Sliding window length.
    pub fn window_length(&self) -> Result<Duration> {
        parse_duration("window.length", &self.window.length)
    }

    /// Minimum interval between transcription calls.
    pub fn infer_every(&self) -> Result<Duration> {
        parse_duration("window.infer_every", &self.window.infer_every)
    }

    /// Minimum buffered audio before the first transcription.
    pub fn min_audio(&self) -> Result<Duration> {
        parse_duration("window.min_audio", &self.window.min_audio)
    }

    /// Cooldown between trigger dispatches.
    pub fn trigger_cooldown(&self) -> Result<Duration> {
        parse_duration("trigger.cooldown", &self.trigger.cooldown)
    }

    /// Window cap in samples at the configured sample rate.
    pub fn window_samples(&self) -> Result<usize> {
        let length = self.window_length()?;
        Ok(defaults::window_samples(
            length.as_secs_f32(),
            self.audio.sample_rate,
        ))
    }

    /// Minimum buffered samples before the first transcription.
    pub fn min_audio_samples(&self) -> Result<usize> {
        let min_audio = self.min_audio()?;
        Ok(defaults::min_audio_samples(
            min_audio.as_millis() as u64,
            self.audio.sample_rate,
        ))
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/streamcue/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("streamcue")
            .join("config.toml")
    }
}
