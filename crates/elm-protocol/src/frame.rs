//! Frame reassembly from a chunked byte stream
//!
//! The adapter ends every reply with a `>` prompt instead of a length
//! prefix, so the reader keeps polling until a chunk ends in that byte.

use crate::config::SessionConfig;
use crate::error::ElmError;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Byte the adapter sends when it is ready for the next command
pub const PROMPT: u8 = b'>';

/// Polls a transport until one complete adapter response has arrived
#[derive(Debug, Clone)]
pub struct FrameReader {
    poll_interval: Duration,
    chunk_size: usize,
    timeout_ms: Option<u64>,
}

impl FrameReader {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            chunk_size: config.chunk_size(),
            timeout_ms: config.read_timeout_ms,
        }
    }

    /// Read one frame, returning its bytes without the trailing prompt
    pub async fn read_frame<R>(&self, reader: &mut R) -> Result<Vec<u8>, ElmError>
    where
        R: AsyncRead + Unpin,
    {
        match self.timeout_ms {
            Some(limit_ms) => {
                tokio::time::timeout(Duration::from_millis(limit_ms), self.poll_frame(reader))
                    .await
                    .map_err(|_| ElmError::Timeout(limit_ms))?
            }
            None => self.poll_frame(reader).await,
        }
    }

    async fn poll_frame<R>(&self, reader: &mut R) -> Result<Vec<u8>, ElmError>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = Vec::new();
        let mut chunk = vec![0u8; self.chunk_size];
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut chunks = 0usize;

        loop {
            ticker.tick().await;

            // partial buffer is dropped with the error
            let n = reader
                .read(&mut chunk)
                .await
                .map_err(|e| ElmError::TransportRead(e.to_string()))?;
            chunks += 1;

            // the chunk buffer is never empty, so zero bytes means end of stream
            if n == 0 {
                return Err(ElmError::TransportRead("connection closed".to_string()));
            }
            buffer.extend_from_slice(&chunk[..n]);

            // only the newest chunk's tail counts
            if chunk[..n].last() == Some(&PROMPT) {
                buffer.pop();
                debug!("Frame complete: {} bytes in {} chunks", buffer.len(), chunks);
                return Ok(buffer);
            }
        }
    }
}
