//! Response parsing: echo validation and line segmentation

use crate::error::ElmError;

/// Split a completed frame into output lines, checking the leading echo
///
/// The first `\r`-separated segment must equal `command` exactly. Remaining
/// segments are trimmed of stray carriage returns; whitespace-only ones are dropped.
pub fn parse_response(command: &str, frame: &[u8]) -> Result<Vec<String>, ElmError> {
    let text = String::from_utf8_lossy(frame);
    let mut segments = text.split('\r');

    let echo = segments.next().unwrap_or_default();
    if echo != command {
        return Err(ElmError::EchoMismatch {
            expected: command.to_string(),
            actual: echo.to_string(),
        });
    }

    let lines: Vec<String> = segments
        .map(|segment| segment.trim_matches('\r'))
        .filter(|segment| !segment.trim().is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return Err(ElmError::NoData);
    }

    Ok(lines)
}
