//! Command execution: one write, read and parse cycle

use crate::config::SessionConfig;
use crate::error::ElmError;
use crate::frame::FrameReader;
use crate::parser::parse_response;
use crate::result::CommandResult;
use crate::state::DeviceState;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Line terminator appended to every outbound command
const COMMAND_TERMINATOR: &str = "\r\n";

/// Everything that must only be touched by the holder of the session lock
pub(crate) struct Device<T> {
    pub(crate) state: DeviceState,
    pub(crate) last_command: Option<String>,
    pub(crate) last_output: Vec<String>,
    transport: T,
    reader: FrameReader,
    /// A timed-out reply may still be on its way and must be discarded
    resync: bool,
}

impl<T> Device<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(transport: T, config: &SessionConfig) -> Self {
        Self {
            state: DeviceState::default(),
            last_command: None,
            last_output: Vec::new(),
            transport,
            reader: FrameReader::new(config),
            resync: false,
        }
    }

    /// Send `command` and collect its reply
    ///
    /// The caller must hold exclusive access for the whole call so the
    /// state finalization below is atomic with the exchange.
    pub(crate) async fn execute(&mut self, command: &str) -> CommandResult {
        let mut result = CommandResult::new(command);
        self.state = self.state.begin();
        let started = Instant::now();

        let outcome = self.exchange(command, &mut result).await;

        self.state = self.state.finish(outcome.is_ok());
        match outcome {
            Ok(lines) => {
                debug!("{} -> {:?}", command, lines);
                self.last_output = lines.clone();
                result.output = lines;
            }
            Err(err) => {
                warn!("Command {:?} failed: {}", command, err);
                result.error = Some(err);
            }
        }
        result.total_time = started.elapsed();
        result
    }

    async fn exchange(
        &mut self,
        command: &str,
        result: &mut CommandResult,
    ) -> Result<Vec<String>, ElmError> {
        if self.resync {
            if let Err(err) = self.discard_late_reply().await {
                self.last_output.clear();
                return Err(err);
            }
        }

        let write_started = Instant::now();
        self.write(command).await?;
        result.write_time = write_started.elapsed();

        let read_started = Instant::now();
        let frame = self.reader.read_frame(&mut self.transport).await;
        result.read_time = read_started.elapsed();
        if matches!(frame, Err(ElmError::Timeout(_))) {
            self.resync = true;
        }

        let parsed = frame.and_then(|frame| parse_response(command, &frame));
        if parsed.is_err() {
            self.last_output.clear();
        }
        parsed
    }

    /// Swallow the reply to a command that timed out, up to its prompt
    ///
    /// Until it is gone every later reply would be one frame behind. If it
    /// still does not arrive, the new command is not sent at all.
    async fn discard_late_reply(&mut self) -> Result<(), ElmError> {
        let late = self.reader.read_frame(&mut self.transport).await?;
        warn!("Discarded late reply {:?}", String::from_utf8_lossy(&late));
        self.resync = false;
        Ok(())
    }

    async fn write(&mut self, command: &str) -> Result<(), ElmError> {
        self.last_command = None;

        let wire = format!("{command}{COMMAND_TERMINATOR}");
        self.transport
            .write_all(wire.as_bytes())
            .await
            .map_err(|e| ElmError::TransportWrite(e.to_string()))?;
        self.transport
            .flush()
            .await
            .map_err(|e| ElmError::TransportWrite(e.to_string()))?;

        self.last_command = Some(command.to_string());
        Ok(())
    }
}
