//! Audio chunk type produced by the capture callback.

use std::time::Instant;

/// A fixed-duration block of mono audio from the capture device.
///
/// Samples are normalized f32 in [-1.0, 1.0]. Chunks are immutable once
/// enqueued and consumed exactly once by the sliding window buffer.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// Monotonically increasing arrival order.
    pub sequence: u64,
    /// Timestamp when the audio was captured.
    pub timestamp: Instant,
    /// Mono audio samples, normalized to [-1.0, 1.0].
    pub samples: Vec<f32>,
}

impl AudioChunk {
    /// Creates a new audio chunk.
    pub fn new(sequence: u64, samples: Vec<f32>) -> Self {
        Self {
            sequence,
            timestamp: Instant::now(),
            samples,
        }
    }

    /// Returns the duration of this chunk in milliseconds.
    pub fn duration_ms(&self, sample_rate: u32) -> u32 {
        (self.samples.len() as u32 * 1000) / sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_duration_ms() {
        let chunk = AudioChunk::new(0, vec![0.0; 3200]);
        assert_eq!(chunk.duration_ms(16000), 200);
    }

    #[test]
    fn test_chunk_keeps_sequence() {
        let chunk = AudioChunk::new(7, vec![0.1, -0.1]);
        assert_eq!(chunk.sequence, 7);
        assert_eq!(chunk.samples.len(), 2);
    }
}
