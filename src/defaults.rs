//! Default configuration constants for streamcue.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

use std::time::Duration;

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and provides a good balance
/// between quality and computational efficiency for voice applications.
pub const SAMPLE_RATE: u32 = 16000;

/// Nominal duration of one captured audio chunk in milliseconds.
///
/// The capture callback fires roughly once per chunk. 200ms keeps callback
/// overhead low while the engine tick (10ms) stays far ahead of the producer.
pub const CHUNK_MS: u32 = 200;

/// Minimum wall-clock time between two inference starts, in milliseconds.
///
/// 900ms gives near-live transcript updates without saturating a CPU-only
/// Whisper backend on a 4-second window.
pub const INFER_EVERY_MS: u64 = 900;

/// Length of the sliding audio window analyzed per inference, in seconds.
pub const WINDOW_SECS: f32 = 4.0;

/// Minimum buffered audio before the first inference may fire, in milliseconds.
///
/// Transcribing less than half a second of audio produces mostly hallucinated
/// fragments, so the scheduler waits for this much material.
pub const MIN_AUDIO_MS: u64 = 500;

/// Engine tick cadence in milliseconds.
///
/// The tick drains the chunk queue, enforces the window cap, and evaluates
/// the inference guard. It must run well below `CHUNK_MS` so audio ingestion
/// and rendering stay responsive between inference calls.
pub const TICK_MS: u64 = 10;

/// Minimum time between two dispatched trigger actions.
///
/// Overlapping inference windows produce near-duplicate transcripts, so the
/// same spoken word would otherwise fire several times in a row.
pub const TRIGGER_COOLDOWN: Duration = Duration::from_secs(1);

/// Default action payload dispatched when a trigger fires.
pub const DEFAULT_ACTIONS: &[&str] = &["Random explosion"];

/// Default TCP port of the game control process.
pub const ACTION_PORT: u16 = 7777;

/// Default host of the game control process.
pub const ACTION_HOST: &str = "127.0.0.1";

/// Default language code for transcription.
pub const DEFAULT_LANGUAGE: &str = "fr";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Default Whisper beam size (1 = greedy decoding, fastest).
pub const DEFAULT_BEAM_SIZE: usize = 1;

/// Punctuation stripped from a word before trigger matching.
///
/// Matching ignores these characters; display always preserves them.
pub const WORD_PUNCTUATION: &[char] = &[',', '.', '!', '?'];

/// Extra vertical padding added to the font's line spacing, in pixels.
pub const LINE_PADDING: f32 = 4.0;

/// Returns the window cap in samples for a given window length.
pub fn window_samples(window_secs: f32, sample_rate: u32) -> usize {
    (window_secs * sample_rate as f32) as usize
}

/// Returns the minimum buffered samples before inference may fire.
pub fn min_audio_samples(min_audio_ms: u64, sample_rate: u32) -> usize {
    (min_audio_ms as usize * sample_rate as usize) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_samples_default() {
        assert_eq!(window_samples(WINDOW_SECS, SAMPLE_RATE), 64000);
    }

    #[test]
    fn test_min_audio_samples_default() {
        assert_eq!(min_audio_samples(MIN_AUDIO_MS, SAMPLE_RATE), 8000);
    }

    #[test]
    fn test_tick_is_faster_than_chunk_cadence() {
        assert!(TICK_MS < CHUNK_MS as u64);
    }
}
