//! Action dispatch to the external game control process.

pub mod client;
pub mod sink;

pub use client::TcpActionSink;
pub use sink::{ActionSink, CollectorSink};
