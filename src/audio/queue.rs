//! Unbounded FIFO between the capture callback and the engine loop.
//!
//! The producer side lives inside the audio callback and must never block;
//! the consumer drains everything accumulated since the last tick. If the
//! consumer falls behind, chunks pile up here and the window buffer's cap
//! discards the excess on the next drain. Dropping audio is the window's
//! job, never the queue's.

use crate::audio::chunk::AudioChunk;
use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};

/// Creates a connected chunk queue pair.
pub fn chunk_queue() -> (ChunkSender, ChunkQueue) {
    let (tx, rx) = unbounded();
    (ChunkSender { tx }, ChunkQueue { rx })
}

/// Producer half, owned by the audio callback.
#[derive(Clone)]
pub struct ChunkSender {
    tx: Sender<AudioChunk>,
}

impl ChunkSender {
    /// Enqueues a chunk without blocking.
    ///
    /// A send error means the engine side is gone; the callback has nothing
    /// useful to do about it, so the chunk is silently discarded.
    pub fn push(&self, chunk: AudioChunk) {
        let _ = self.tx.send(chunk);
    }
}

/// Consumer half, owned by the engine loop.
pub struct ChunkQueue {
    rx: Receiver<AudioChunk>,
}

impl ChunkQueue {
    /// Returns all chunks enqueued since the last drain, in arrival order.
    ///
    /// Never blocks; returns an empty vector when nothing is pending.
    pub fn drain_all(&self) -> Vec<AudioChunk> {
        let mut chunks = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(chunk) => chunks.push(chunk),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        chunks
    }

    /// Returns true when the producer side has been dropped.
    pub fn is_disconnected(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }
}
