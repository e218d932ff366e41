//! ELM327 AT-Command Protocol Engine
//!
//! Drives ELM327-compatible OBD-II adapters over any async byte stream:
//! commands go out with a `\r\n` terminator, replies are reassembled until
//! the `>` prompt, checked against the command echo and split into lines.

mod config;
mod error;
mod executor;
mod frame;
mod parser;
mod protocol;
mod result;
mod session;
mod state;
mod transport;
mod version;

#[cfg(test)]
mod testing;

pub use config::SessionConfig;
pub use error::ElmError;
pub use frame::{FrameReader, PROMPT};
pub use parser::parse_response;
pub use protocol::Protocol;
pub use result::CommandResult;
pub use session::Session;
pub use state::DeviceState;
pub use transport::{connect, Transport};
pub use version::detect_version;
