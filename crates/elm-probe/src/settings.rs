//! Probe settings
//!
//! Layered as: built-in defaults, then an optional `elm-probe.toml` in the
//! working directory, then `ELM_*` environment variables
//! (e.g. `ELM_ADDRESS`, `ELM_SESSION__READ_TIMEOUT_MS`, `ELM_COMMANDS=ATI,ATRV`).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use elm_protocol::SessionConfig;
use serde::Deserialize;

/// Address WiFi adapters listen on out of the box
pub const DEFAULT_ADDRESS: &str = "192.168.0.10:35000";

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// Adapter host:port
    pub address: String,

    /// Maximum log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Extra commands to run after the handshake
    #[serde(default)]
    pub commands: Vec<String>,

    #[serde(default)]
    pub session: SessionConfig,
}

impl ProbeSettings {
    pub fn load() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name("elm-probe").required(false))
            .add_source(
                Environment::with_prefix("ELM")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("commands")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("address", DEFAULT_ADDRESS)?
        .set_default("log_level", "info")
}
