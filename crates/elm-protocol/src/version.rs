//! Firmware version detection from the reset banner

use crate::error::ElmError;
use once_cell::sync::Lazy;
use regex::Regex;

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"v[0-9]+\.[0-9]+").expect("version pattern is valid"));

/// Find the first `v<major>.<minor>` token across the lines, in order
pub fn detect_version<S: AsRef<str>>(lines: &[S]) -> Result<String, ElmError> {
    lines
        .iter()
        .find_map(|line| VERSION_PATTERN.find(line.as_ref()))
        .map(|m| m.as_str().to_string())
        .ok_or(ElmError::VersionNotFound)
}
