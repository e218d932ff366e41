//! Transport boundary
//!
//! The engine only needs an async byte stream. TCP is what WiFi adapters
//! expose, so a dial helper for it lives here too.

use crate::error::ElmError;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{lookup_host, TcpStream};
use tracing::{debug, info};

/// Any bidirectional byte stream a session can drive
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T> Transport for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

/// Resolve `address` (host:port) and open a TCP connection to the adapter
pub async fn connect(address: &str) -> Result<TcpStream, ElmError> {
    let target = lookup_host(address)
        .await
        .map_err(|e| ElmError::Connect(format!("cannot resolve {address}: {e}")))?
        .next()
        .ok_or_else(|| ElmError::Connect(format!("no addresses for {address}")))?;

    debug!("Resolved {} to {}", address, target);

    let stream = TcpStream::connect(target)
        .await
        .map_err(|e| ElmError::Connect(format!("failed to establish tcp connection: {e}")))?;
    stream
        .set_nodelay(true)
        .map_err(|e| ElmError::Connect(e.to_string()))?;

    info!("Connected to adapter at {}", target);
    Ok(stream)
}
