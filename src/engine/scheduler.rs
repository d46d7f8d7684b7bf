//! Wall-clock gating of transcription calls.
//!
//! The scheduler decides when the engine submits the current audio window
//! to the transcription engine: at most once per `infer_every`, and only
//! once enough audio has accumulated to be worth transcribing.

use std::time::{Duration, Instant};

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No audio received yet.
    Idle,
    /// Audio is flowing; waiting for the inference gate.
    Accumulating,
    /// A transcription call is in flight.
    Inferring,
}

/// Decides when to run inference on the sliding window.
#[derive(Debug)]
pub struct InferenceScheduler {
    state: SchedulerState,
    infer_every: Duration,
    min_samples: usize,
    last_infer_start: Option<Instant>,
}

impl InferenceScheduler {
    /// Creates a scheduler firing at most once per `infer_every`, and only
    /// with at least `min_samples` buffered.
    pub fn new(infer_every: Duration, min_samples: usize) -> Self {
        Self {
            state: SchedulerState::Idle,
            infer_every,
            min_samples,
            last_infer_start: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Notes that audio arrived; leaves `Idle` on the first chunk.
    pub fn on_audio(&mut self) {
        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Accumulating;
        }
    }

    /// The transition guard: true when an inference should start now.
    ///
    /// The first inference fires as soon as the minimum audio is buffered;
    /// after that, the gate is boundary-inclusive on `infer_every`.
    pub fn should_infer(&self, now: Instant, buffered_samples: usize) -> bool {
        if self.state != SchedulerState::Accumulating {
            return false;
        }
        if buffered_samples < self.min_samples {
            return false;
        }
        match self.last_infer_start {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.infer_every,
        }
    }

    /// Records the inference start; the firing time becomes the new gate origin.
    pub fn begin_inference(&mut self, now: Instant) {
        self.last_infer_start = Some(now);
        self.state = SchedulerState::Inferring;
    }

    /// Receipt of a transcription result, even an empty one.
    pub fn finish_inference(&mut self) {
        self.state = SchedulerState::Accumulating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> InferenceScheduler {
        InferenceScheduler::new(Duration::from_millis(900), 8000)
    }

    #[test]
    fn test_starts_idle_and_never_infers_idle() {
        let s = scheduler();
        assert_eq!(s.state(), SchedulerState::Idle);
        assert!(!s.should_infer(Instant::now(), 100_000));
    }

    #[test]
    fn test_first_chunk_moves_to_accumulating() {
        let mut s = scheduler();
        s.on_audio();
        assert_eq!(s.state(), SchedulerState::Accumulating);
    }

    #[test]
    fn test_guard_requires_minimum_audio() {
        let mut s = scheduler();
        s.on_audio();
        let now = Instant::now();

        assert!(!s.should_infer(now, 7999));
        assert!(s.should_infer(now, 8000));
    }

    #[test]
    fn test_first_inference_fires_without_waiting() {
        let mut s = scheduler();
        s.on_audio();
        assert!(s.should_infer(Instant::now(), 8000));
    }

    #[test]
    fn test_gate_blocks_until_interval_elapsed() {
        let mut s = scheduler();
        s.on_audio();
        let t0 = Instant::now();

        s.begin_inference(t0);
        s.finish_inference();

        assert!(!s.should_infer(t0 + Duration::from_millis(899), 64000));
        assert!(s.should_infer(t0 + Duration::from_millis(900), 64000));
    }

    #[test]
    fn test_no_guard_while_inferring() {
        let mut s = scheduler();
        s.on_audio();
        let t0 = Instant::now();
        s.begin_inference(t0);

        assert_eq!(s.state(), SchedulerState::Inferring);
        assert!(!s.should_infer(t0 + Duration::from_secs(10), 64000));

        s.finish_inference();
        assert_eq!(s.state(), SchedulerState::Accumulating);
    }

    #[test]
    fn test_empty_result_still_resets_state() {
        // finish_inference runs on every result, even blank ones
        let mut s = scheduler();
        s.on_audio();
        let t0 = Instant::now();
        s.begin_inference(t0);
        s.finish_inference();

        assert!(s.should_infer(t0 + Duration::from_secs(1), 64000));
    }
}
