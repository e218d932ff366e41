//! ELM327 Error Types

use thiserror::Error;

/// Errors that can occur while talking to an ELM327 adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElmError {
    /// Writing the command to the transport failed
    #[error("Transport write failed: {0}")]
    TransportWrite(String),

    /// Reading the response from the transport failed
    #[error("Transport read failed: {0}")]
    TransportRead(String),

    /// No prompt byte arrived within the read timeout
    #[error("Timeout waiting for adapter prompt after {0}ms")]
    Timeout(u64),

    /// The first response line does not repeat the command that was sent
    #[error("Command echo mismatch: expected {expected:?}, got {actual:?}")]
    EchoMismatch { expected: String, actual: String },

    /// The adapter accepted the command but returned no usable lines
    #[error("No data returned by adapter")]
    NoData,

    /// The reset response carried an identification banner
    #[error("Device failed to identify as ELM327: {0}")]
    IdentificationFailure(String),

    /// No version token in the reset response
    #[error("Failed to identify device version")]
    VersionNotFound,

    /// Protocol selection answered with something other than OK
    #[error("Protocol setup failed, got response: {0:?}")]
    ProtocolSetupFailure(String),

    /// Could not resolve or dial the adapter address
    #[error("Failed to connect to adapter: {0}")]
    Connect(String),
}

impl ElmError {
    /// Whether this error came from the transport rather than the adapter's reply
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ElmError::TransportWrite(_) | ElmError::TransportRead(_) | ElmError::Timeout(_)
        )
    }
}
