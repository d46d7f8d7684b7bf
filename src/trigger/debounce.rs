//! Cooldown between dispatched trigger actions.
//!
//! Overlapping inference windows re-transcribe the same speech, so the same
//! trigger word shows up in several consecutive transcripts. The dispatcher
//! suppresses everything inside the cooldown window. A failed send still
//! consumes the window: the intent is anti-spam, not delivery guarantees.

use crate::action::sink::ActionSink;
use std::time::{Duration, Instant};

/// Debounced forwarder of action payloads.
#[derive(Debug)]
pub struct DebounceDispatcher {
    cooldown: Duration,
    last_dispatch: Option<Instant>,
}

impl DebounceDispatcher {
    /// Creates a dispatcher with the given cooldown.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_dispatch: None,
        }
    }

    /// The configured cooldown.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Forwards `payload` to the sink unless the cooldown is still running.
    ///
    /// Returns true when a dispatch was attempted (boundary inclusive: a
    /// call exactly `cooldown` after the last dispatch fires). Sink errors
    /// are logged and swallowed; the cooldown window is consumed either way.
    pub fn try_dispatch(
        &mut self,
        now: Instant,
        payload: &[String],
        sink: &mut dyn ActionSink,
    ) -> bool {
        if let Some(last) = self.last_dispatch
            && now.saturating_duration_since(last) < self.cooldown
        {
            return false;
        }

        if let Err(e) = sink.send(payload) {
            eprintln!("Action dispatch failed ({}): {}", sink.name(), e);
        }
        self.last_dispatch = Some(now);
        true
    }
}
