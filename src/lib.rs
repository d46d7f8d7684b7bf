//! streamcue - Voice-triggered stream overlay
//!
//! Live microphone transcription over a sliding window, trigger phrase
//! matching, debounced game actions, and a highlighted transcript.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod action;
pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod overlay;
pub mod stt;
pub mod trigger;

// Composition root - needs capture
#[cfg(feature = "cpal-audio")]
pub mod app;

// Core traits (audio → transcript → triggers → actions)
pub use action::sink::ActionSink;
pub use overlay::layout::TextMeasure;
pub use overlay::surface::RenderSurface;
pub use stt::transcriber::Transcriber;

// Pipeline
pub use engine::{Engine, EngineParams, InferenceScheduler, TickOutcome};

// Error handling
pub use error::{Result, StreamcueError};

// Config
pub use config::Config;

// Trigger matching (for embedding in other frontends)
pub use trigger::dictionary::TriggerDictionary;
pub use trigger::matcher::{MatchSpan, TriggerMatcher};

/// Build version string with optional git commit hash.
///
/// Returns `"0.3.1+abc1234"` when git hash is available, `"0.3.1"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }
}
