//! Pluggable sink for dispatched trigger actions.

use crate::error::Result;

/// Receives the action payload when a trigger fires.
///
/// Payloads are ordered lists of opaque command strings; their semantics
/// belong to the receiving process.
pub trait ActionSink: Send {
    /// Attempts delivery of one payload.
    fn send(&mut self, commands: &[String]) -> Result<()>;

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "sink"
    }
}

/// Sink that records every payload, for tests.
#[derive(Debug, Default)]
pub struct CollectorSink {
    sent: Vec<Vec<String>>,
    fail: bool,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the sink to fail every send.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Payloads received so far, in order.
    pub fn sent(&self) -> &[Vec<String>] {
        &self.sent
    }
}

impl ActionSink for CollectorSink {
    fn send(&mut self, commands: &[String]) -> Result<()> {
        if self.fail {
            return Err(crate::error::StreamcueError::ActionSend {
                message: "collector configured to fail".to_string(),
            });
        }
        self.sent.push(commands.to_vec());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_records_payloads_in_order() {
        let mut sink = CollectorSink::new();
        sink.send(&["a".to_string()]).unwrap();
        sink.send(&["b".to_string(), "c".to_string()]).unwrap();

        assert_eq!(sink.sent().len(), 2);
        assert_eq!(sink.sent()[1], vec!["b", "c"]);
    }

    #[test]
    fn test_collector_failure_mode() {
        let mut sink = CollectorSink::new().with_failure();
        assert!(sink.send(&["a".to_string()]).is_err());
        assert!(sink.sent().is_empty());
    }
}
