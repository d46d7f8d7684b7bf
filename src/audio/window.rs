//! Sliding window buffer over the most recent seconds of audio.
//!
//! Accumulates capture chunks into one contiguous sample buffer capped at a
//! configured length. Truncation always drops from the front, so the buffer
//! is always a contiguous suffix of everything ever appended.

use crate::audio::chunk::AudioChunk;

/// Rolling buffer of the most recent audio samples.
#[derive(Debug, Default)]
pub struct SlidingWindowBuffer {
    samples: Vec<f32>,
}

impl SlidingWindowBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk's samples to the buffer tail.
    pub fn append(&mut self, chunk: &AudioChunk) {
        self.samples.extend_from_slice(&chunk.samples);
    }

    /// Retains only the last `max_samples` samples.
    ///
    /// Idempotent: calling twice without an intervening append is a no-op
    /// the second time.
    pub fn enforce_cap(&mut self, max_samples: usize) {
        if self.samples.len() > max_samples {
            let excess = self.samples.len() - max_samples;
            self.samples.drain(..excess);
        }
    }

    /// Returns a stable copy of the current contents for inference.
    ///
    /// The copy is unaffected by appends that happen while the transcription
    /// engine is still chewing on it.
    pub fn snapshot(&self) -> Vec<f32> {
        self.samples.clone()
    }

    /// Current length in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true when no samples are buffered.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current buffered duration in seconds.
    pub fn duration_secs(&self, sample_rate: u32) -> f32 {
        self.samples.len() as f32 / sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_of(seq: u64, samples: Vec<f32>) -> AudioChunk {
        AudioChunk::new(seq, samples)
    }

    #[test]
    fn test_append_concatenates_in_order() {
        let mut buffer = SlidingWindowBuffer::new();
        buffer.append(&chunk_of(0, vec![1.0, 2.0]));
        buffer.append(&chunk_of(1, vec![3.0]));

        assert_eq!(buffer.snapshot(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_enforce_cap_drops_from_front() {
        let mut buffer = SlidingWindowBuffer::new();
        buffer.append(&chunk_of(0, vec![1.0, 2.0, 3.0, 4.0, 5.0]));
        buffer.enforce_cap(3);

        assert_eq!(buffer.snapshot(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_enforce_cap_noop_when_under_cap() {
        let mut buffer = SlidingWindowBuffer::new();
        buffer.append(&chunk_of(0, vec![1.0, 2.0]));
        buffer.enforce_cap(10);

        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_enforce_cap_is_idempotent() {
        let mut buffer = SlidingWindowBuffer::new();
        buffer.append(&chunk_of(0, (0..100).map(|i| i as f32).collect()));

        buffer.enforce_cap(40);
        let once = buffer.snapshot();
        buffer.enforce_cap(40);
        let twice = buffer.snapshot();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_retained_samples_are_contiguous_suffix_of_history() {
        let mut buffer = SlidingWindowBuffer::new();
        let mut history = Vec::new();

        for seq in 0..20 {
            let samples: Vec<f32> = (0..7).map(|i| (seq * 7 + i) as f32).collect();
            history.extend_from_slice(&samples);
            buffer.append(&chunk_of(seq, samples));
            buffer.enforce_cap(25);
            assert!(buffer.len() <= 25);
        }

        let suffix = &history[history.len() - buffer.len()..];
        assert_eq!(buffer.snapshot(), suffix);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_appends() {
        let mut buffer = SlidingWindowBuffer::new();
        buffer.append(&chunk_of(0, vec![1.0, 2.0]));
        let snapshot = buffer.snapshot();

        buffer.append(&chunk_of(1, vec![3.0]));
        assert_eq!(snapshot, vec![1.0, 2.0]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_duration_secs() {
        let mut buffer = SlidingWindowBuffer::new();
        buffer.append(&chunk_of(0, vec![0.0; 8000]));
        assert!((buffer.duration_secs(16000) - 0.5).abs() < f32::EPSILON);
    }
}
