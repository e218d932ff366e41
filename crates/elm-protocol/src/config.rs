//! Session configuration

use crate::protocol::Protocol;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and framing settings for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Delay between transport reads while waiting for the prompt (milliseconds)
    pub poll_interval_ms: u64,

    /// Maximum bytes pulled from the transport per read
    pub chunk_size: usize,

    /// Upper bound on one frame read (milliseconds); `None` waits forever
    pub read_timeout_ms: Option<u64>,

    /// Protocol selected during the startup handshake
    pub protocol: Protocol,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            chunk_size: 128,
            read_timeout_ms: Some(2000),
            protocol: Protocol::Auto,
        }
    }
}

impl SessionConfig {
    /// Create a config that waits for the prompt indefinitely
    pub fn unbounded() -> Self {
        Self {
            read_timeout_ms: None,
            ..Default::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        // interval() panics on a zero period
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}
