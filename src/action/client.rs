//! TCP client for the game control process.
//!
//! One persistent connection, established at startup. Each dispatch writes a
//! single newline-terminated JSON array of command strings. Connection
//! failure at startup is fatal to the process (handled by the caller);
//! failure of a later send is logged and non-fatal.

use crate::action::sink::ActionSink;
use crate::error::{Result, StreamcueError};
use std::io::Write;
use std::net::TcpStream;

/// Persistent TCP sink for action payloads.
pub struct TcpActionSink {
    stream: TcpStream,
    addr: String,
}

impl TcpActionSink {
    /// Connects to the game control process.
    ///
    /// # Errors
    /// Returns `StreamcueError::ActionConnection` if the connection cannot
    /// be established. Callers treat this as fatal at startup.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{}:{}", host, port);
        let stream = TcpStream::connect(&addr).map_err(|e| StreamcueError::ActionConnection {
            message: format!("Failed to connect to {}: {}", addr, e),
        })?;
        stream.set_nodelay(true).ok();
        Ok(Self { stream, addr })
    }

    /// The remote address this sink delivers to.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl ActionSink for TcpActionSink {
    fn send(&mut self, commands: &[String]) -> Result<()> {
        let line = serde_json::to_string(commands).map_err(|e| StreamcueError::ActionSend {
            message: format!("Failed to serialize payload: {}", e),
        })?;

        self.stream
            .write_all(line.as_bytes())
            .and_then(|_| self.stream.write_all(b"\n"))
            .and_then(|_| self.stream.flush())
            .map_err(|e| StreamcueError::ActionSend {
                message: format!("Failed to send to {}: {}", self.addr, e),
            })
    }

    fn name(&self) -> &'static str {
        "tcp"
    }
}
