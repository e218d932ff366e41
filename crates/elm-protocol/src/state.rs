//! Device health state machine

use serde::{Deserialize, Serialize};

/// Health of the adapter as seen by the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceState {
    /// Idle and able to accept a command
    #[default]
    Ready,
    /// A command is in flight
    Busy,
    /// The last command or the handshake failed
    Error,
}

impl DeviceState {
    /// State entered when a command starts executing
    pub(crate) fn begin(self) -> Self {
        DeviceState::Busy
    }

    /// State entered once a command has finished
    pub(crate) fn finish(self, succeeded: bool) -> Self {
        if succeeded {
            DeviceState::Ready
        } else {
            DeviceState::Error
        }
    }

    /// State entered when the handshake rejects an otherwise successful reply
    pub(crate) fn reject(self) -> Self {
        DeviceState::Error
    }

    pub fn is_ready(&self) -> bool {
        *self == DeviceState::Ready
    }
}
