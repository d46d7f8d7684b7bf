//! Audio capture and buffering.
//!
//! The capture callback produces [`chunk::AudioChunk`]s into the
//! non-blocking [`queue`], and the engine accumulates them into a
//! [`window::SlidingWindowBuffer`] capped at the configured duration.

pub mod chunk;
pub mod queue;
pub mod window;

#[cfg(feature = "cpal-audio")]
pub mod capture;
