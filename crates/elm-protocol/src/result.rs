//! Per-command execution record

use crate::error::ElmError;
use std::time::Duration;

/// Outcome of one write, read and parse cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub(crate) input: String,
    pub(crate) output: Vec<String>,
    pub(crate) error: Option<ElmError>,
    pub(crate) write_time: Duration,
    pub(crate) read_time: Duration,
    pub(crate) total_time: Duration,
}

impl CommandResult {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            output: Vec::new(),
            error: None,
            write_time: Duration::ZERO,
            read_time: Duration::ZERO,
            total_time: Duration::ZERO,
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&ElmError> {
        self.error.as_ref()
    }

    /// Output lines; empty whenever the command failed
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// The command text as it was passed in, without line terminator
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn write_time(&self) -> Duration {
        self.write_time
    }

    pub fn read_time(&self) -> Duration {
        self.read_time
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Convert into a standard `Result`, yielding the output lines on success
    pub fn into_result(self) -> Result<Vec<String>, ElmError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.output),
        }
    }
}
