//! The tick-driven pipeline core.
//!
//! One `Engine` owns the whole path from queued audio to dispatched
//! actions: drain the chunk queue, maintain the sliding window, gate
//! inference through the [`InferenceScheduler`], transcribe, match
//! triggers, and debounce action dispatch. It is deliberately free of
//! audio-backend and rendering concerns so it can be driven entirely by
//! mocks in tests; the composition root wires it to capture and to the
//! transcript view.

pub mod scheduler;

pub use scheduler::{InferenceScheduler, SchedulerState};

use std::time::Instant;

use crate::action::sink::ActionSink;
use crate::audio::queue::ChunkQueue;
use crate::audio::window::SlidingWindowBuffer;
use crate::stt::transcriber::Transcriber;
use crate::trigger::debounce::DebounceDispatcher;
use crate::trigger::matcher::TriggerMatcher;

/// What a single tick produced, for the caller to render or log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No new transcript this tick (no inference, blank text, or a
    /// transcription error).
    Quiet,
    /// A fresh transcript of the current window.
    Transcript {
        text: String,
        /// Whether a trigger fired and actions were dispatched (false when
        /// no trigger matched or the cooldown suppressed it).
        dispatched: bool,
    },
}

/// Engine tuning, derived from config at wiring time.
#[derive(Debug, Clone)]
pub struct EngineParams {
    /// Sliding window cap in samples.
    pub window_samples: usize,
    /// Command strings sent on every trigger fire.
    pub actions: Vec<String>,
}

/// The pipeline core: queue -> window -> transcription -> triggers -> actions.
pub struct Engine<T: Transcriber, S: ActionSink> {
    queue: ChunkQueue,
    window: SlidingWindowBuffer,
    scheduler: InferenceScheduler,
    matcher: TriggerMatcher,
    debounce: DebounceDispatcher,
    transcriber: T,
    sink: S,
    params: EngineParams,
}

impl<T: Transcriber, S: ActionSink> Engine<T, S> {
    pub fn new(
        queue: ChunkQueue,
        scheduler: InferenceScheduler,
        matcher: TriggerMatcher,
        debounce: DebounceDispatcher,
        transcriber: T,
        sink: S,
        params: EngineParams,
    ) -> Self {
        Self {
            queue,
            window: SlidingWindowBuffer::new(),
            scheduler,
            matcher,
            debounce,
            transcriber,
            sink,
            params,
        }
    }

    /// Samples currently buffered in the sliding window.
    pub fn buffered_samples(&self) -> usize {
        self.window.len()
    }

    /// The action sink, for inspection in tests.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs one tick of the pipeline at time `now`.
    ///
    /// Drains every chunk queued since the last tick into the window,
    /// enforces the window cap, and, when the scheduler guard passes,
    /// transcribes a snapshot of the window. Transcription is the one
    /// blocking call in here; everything around it is bounded work.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let chunks = self.queue.drain_all();
        if !chunks.is_empty() {
            self.scheduler.on_audio();
            for chunk in &chunks {
                self.window.append(chunk);
            }
        }
        self.window.enforce_cap(self.params.window_samples);

        if !self.scheduler.should_infer(now, self.window.len()) {
            return TickOutcome::Quiet;
        }

        self.scheduler.begin_inference(now);
        let snapshot = self.window.snapshot();
        let result = self.transcriber.transcribe(&snapshot);
        self.scheduler.finish_inference();

        let result = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Transcription failed: {}", e);
                return TickOutcome::Quiet;
            }
        };
        if result.is_blank() {
            return TickOutcome::Quiet;
        }

        let dispatched = self.matcher.has_trigger(&result.text)
            && self
                .debounce
                .try_dispatch(now, &self.params.actions, &mut self.sink);

        TickOutcome::Transcript {
            text: result.text,
            dispatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::action::sink::CollectorSink;
    use crate::audio::chunk::AudioChunk;
    use crate::audio::queue::{ChunkSender, chunk_queue};
    use crate::stt::transcriber::MockTranscriber;
    use crate::trigger::dictionary::TriggerDictionary;

    const MIN_SAMPLES: usize = 8_000;

    fn engine_with(
        transcriber: MockTranscriber,
    ) -> (ChunkSender, Engine<MockTranscriber, CollectorSink>) {
        let (tx, queue) = chunk_queue();
        let dict = Arc::new(TriggerDictionary::builtin());
        let engine = Engine::new(
            queue,
            InferenceScheduler::new(Duration::from_millis(900), MIN_SAMPLES),
            TriggerMatcher::new(dict),
            DebounceDispatcher::new(Duration::from_secs(1)),
            transcriber,
            CollectorSink::new(),
            EngineParams {
                window_samples: 64_000,
                actions: vec!["Random explosion".to_string()],
            },
        );
        (tx, engine)
    }

    fn chunk(sequence: u64, samples: usize) -> AudioChunk {
        AudioChunk::new(sequence, vec![0.1; samples])
    }

    #[test]
    fn test_tick_without_audio_is_quiet() {
        let (_tx, mut engine) = engine_with(MockTranscriber::new("mock"));
        assert_eq!(engine.tick(Instant::now()), TickOutcome::Quiet);
        assert_eq!(engine.buffered_samples(), 0);
    }

    #[test]
    fn test_tick_below_minimum_audio_is_quiet() {
        let (tx, mut engine) =
            engine_with(MockTranscriber::new("mock").with_response("creeper"));
        tx.push(chunk(0, MIN_SAMPLES - 1));

        assert_eq!(engine.tick(Instant::now()), TickOutcome::Quiet);
        assert_eq!(engine.buffered_samples(), MIN_SAMPLES - 1);
    }

    #[test]
    fn test_transcript_with_trigger_dispatches() {
        let (tx, mut engine) =
            engine_with(MockTranscriber::new("mock").with_response("un creeper arrive"));
        tx.push(chunk(0, MIN_SAMPLES));

        let outcome = engine.tick(Instant::now());
        assert_eq!(
            outcome,
            TickOutcome::Transcript {
                text: "un creeper arrive".to_string(),
                dispatched: true,
            }
        );
        assert_eq!(engine.sink().sent(), &[vec!["Random explosion".to_string()]]);
    }

    #[test]
    fn test_transcript_without_trigger_does_not_dispatch() {
        let (tx, mut engine) =
            engine_with(MockTranscriber::new("mock").with_response("bonjour tout le monde"));
        tx.push(chunk(0, MIN_SAMPLES));

        let outcome = engine.tick(Instant::now());
        assert_eq!(
            outcome,
            TickOutcome::Transcript {
                text: "bonjour tout le monde".to_string(),
                dispatched: false,
            }
        );
        assert!(engine.sink().sent().is_empty());
    }

    #[test]
    fn test_blank_transcript_is_quiet() {
        let (tx, mut engine) = engine_with(MockTranscriber::new("mock").with_response("   "));
        tx.push(chunk(0, MIN_SAMPLES));

        assert_eq!(engine.tick(Instant::now()), TickOutcome::Quiet);
    }

    #[test]
    fn test_transcription_error_is_quiet_and_recoverable() {
        let (tx, mut engine) = engine_with(MockTranscriber::new("mock").with_failure());
        tx.push(chunk(0, MIN_SAMPLES));

        let t0 = Instant::now();
        assert_eq!(engine.tick(t0), TickOutcome::Quiet);

        // the failed call still consumed the inference slot
        assert_eq!(engine.tick(t0 + Duration::from_millis(10)), TickOutcome::Quiet);
    }

    #[test]
    fn test_inference_cadence_is_gated() {
        let (tx, mut engine) =
            engine_with(MockTranscriber::new("mock").with_response("rien a signaler"));
        let t0 = Instant::now();

        tx.push(chunk(0, MIN_SAMPLES));
        assert!(matches!(engine.tick(t0), TickOutcome::Transcript { .. }));

        tx.push(chunk(1, 1_000));
        assert_eq!(engine.tick(t0 + Duration::from_millis(500)), TickOutcome::Quiet);
        assert!(matches!(
            engine.tick(t0 + Duration::from_millis(900)),
            TickOutcome::Transcript { .. }
        ));
    }

    #[test]
    fn test_repeated_trigger_is_debounced() {
        let (tx, mut engine) = engine_with(
            MockTranscriber::new("mock").with_response("le creeper est toujours la"),
        );
        let t0 = Instant::now();

        tx.push(chunk(0, MIN_SAMPLES));
        assert_eq!(
            engine.tick(t0),
            TickOutcome::Transcript {
                text: "le creeper est toujours la".to_string(),
                dispatched: true,
            }
        );

        // next inference at +900ms still inside the 1s cooldown
        tx.push(chunk(1, 1_000));
        assert_eq!(
            engine.tick(t0 + Duration::from_millis(900)),
            TickOutcome::Transcript {
                text: "le creeper est toujours la".to_string(),
                dispatched: false,
            }
        );

        // +1800ms: a full second past the first dispatch
        tx.push(chunk(2, 1_000));
        assert_eq!(
            engine.tick(t0 + Duration::from_millis(1800)),
            TickOutcome::Transcript {
                text: "le creeper est toujours la".to_string(),
                dispatched: true,
            }
        );

        assert_eq!(engine.sink().sent().len(), 2);
    }

    #[test]
    fn test_window_cap_enforced_across_ticks() {
        let (tx, mut engine) = engine_with(MockTranscriber::new("mock"));
        let t0 = Instant::now();

        for seq in 0..30 {
            tx.push(chunk(seq, 3_200));
        }
        engine.tick(t0);
        assert_eq!(engine.buffered_samples(), 64_000);

        tx.push(chunk(30, 3_200));
        engine.tick(t0 + Duration::from_millis(10));
        assert_eq!(engine.buffered_samples(), 64_000);
    }
}
