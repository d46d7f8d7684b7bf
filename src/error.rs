//! Error types for streamcue.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamcueError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio capture errors
    #[error("Audio device not found: {device}")]
    AudioDeviceNotFound { device: String },

    #[error("Audio capture failed: {message}")]
    AudioCapture { message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    TranscriptionModelNotFound { path: String },

    #[error("Transcription inference failed: {message}")]
    TranscriptionInferenceFailed { message: String },

    #[error("Transcription error: {message}")]
    Transcription { message: String },

    // Trigger dictionary errors
    #[error("Dictionary file not found at {path}")]
    DictionaryNotFound { path: String },

    #[error("Failed to parse dictionary {path}: {message}")]
    DictionaryParse { path: String, message: String },

    // Action sink errors
    #[error("Action sink connection failed: {message}")]
    ActionConnection { message: String },

    #[error("Action send failed: {message}")]
    ActionSend { message: String },

    // General I/O errors (including rendering writes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, StreamcueError>;
