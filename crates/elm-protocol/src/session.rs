//! ELM327 Session
//!
//! Owns the device behind a single lock and runs the startup handshake
//! (reset, identify, select protocol) before handing out a usable session.

use crate::config::SessionConfig;
use crate::error::ElmError;
use crate::executor::Device;
use crate::protocol::Protocol;
use crate::result::CommandResult;
use crate::state::DeviceState;
use crate::transport::{self, Transport};
use crate::version::detect_version;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Resets the adapter and makes it print its banner
const RESET_COMMAND: &str = "ATZ";

/// Banner prefix the handshake refuses to see in the first two lines
const BANNER_PREFIX: &str = "ELM327";

/// A handshaken connection to one adapter
///
/// All commands go through one lock, so at most one command is ever in
/// flight and commands run in lock-acquisition order.
pub struct Session<T> {
    device: Mutex<Device<T>>,
    version: String,
    config: SessionConfig,
}

impl<T: Transport> Session<T> {
    /// Take ownership of an open transport and run the startup handshake
    pub async fn open(transport: T, config: SessionConfig) -> Result<Self, ElmError> {
        info!("Initializing ELM327 adapter");

        let mut device = Device::new(transport, &config);
        let version = reset(&mut device).await?;
        select_protocol(&mut device, config.protocol).await?;

        info!("ELM327 adapter ready, version {}", version);
        Ok(Self {
            device: Mutex::new(device),
            version,
            config,
        })
    }

    /// Run one command and return its record; failures are inside the result
    pub async fn run(&self, command: &str) -> CommandResult {
        let mut device = self.device.lock().await;
        device.execute(command).await
    }

    /// Switch the adapter to another bus protocol
    pub async fn set_protocol(&self, protocol: Protocol) -> Result<(), ElmError> {
        info!("Setting OBD protocol to {}", protocol);
        let mut device = self.device.lock().await;
        select_protocol(&mut *device, protocol).await
    }

    /// Current device state
    ///
    /// Waits for any in-flight command to finish, so the result is always
    /// `Ready` or `Error`. `Busy` only exists while the device lock is held.
    pub async fn state(&self) -> DeviceState {
        self.device.lock().await.state
    }

    /// Last command that was fully written, if the latest write succeeded
    pub async fn last_command(&self) -> Option<String> {
        self.device.lock().await.last_command.clone()
    }

    pub async fn last_output(&self) -> Vec<String> {
        self.device.lock().await.last_output.clone()
    }

    /// Firmware version reported during reset, e.g. `v1.5`
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Session<TcpStream> {
    /// Dial a WiFi adapter and run the handshake over the new connection
    pub async fn connect(address: &str, config: SessionConfig) -> Result<Self, ElmError> {
        let stream = transport::connect(address).await?;
        Self::open(stream, config).await
    }
}

/// Reset the adapter and pull the firmware version out of its reply
async fn reset<T: Transport>(device: &mut Device<T>) -> Result<String, ElmError> {
    let output = device.execute(RESET_COMMAND).await.into_result()?;

    if let Some(banner) = identification_banner(&output) {
        warn!("Adapter answered reset with banner {:?}", banner);
        device.state = device.state.reject();
        return Err(ElmError::IdentificationFailure(banner));
    }

    detect_version(&output).map_err(|err| {
        warn!("No version in reset response {:?}", output);
        device.state = device.state.reject();
        err
    })
}

async fn select_protocol<T: Transport>(
    device: &mut Device<T>,
    protocol: Protocol,
) -> Result<(), ElmError> {
    let output = device
        .execute(&protocol.to_elm_command())
        .await
        .into_result()?;

    let first = output.first().map(String::as_str).unwrap_or_default();
    if first != "OK" {
        warn!("Protocol {} rejected with {:?}", protocol, first);
        device.state = device.state.reject();
        return Err(ElmError::ProtocolSetupFailure(first.to_string()));
    }
    Ok(())
}

/// Banner text if either of the first two lines starts with `ELM327`
fn identification_banner(lines: &[String]) -> Option<String> {
    let head = &lines[..lines.len().min(2)];
    if head.iter().any(|line| line.starts_with(BANNER_PREFIX)) {
        Some(head.join(" "))
    } else {
        None
    }
}
