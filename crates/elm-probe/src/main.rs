//! ELM327 Probe - Main Entry Point

mod settings;

use anyhow::{anyhow, Context};
use elm_protocol::{ElmError, Session};
use settings::ProbeSettings;
use std::str::FromStr;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ProbeSettings::load().context("Failed to load probe settings")?;
    init_logging(&settings.log_level)?;

    info!("=== ELM327 probe v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Connecting to adapter at {}", settings.address);

    let session = Session::connect(&settings.address, settings.session.clone())
        .await
        .with_context(|| format!("Failed to initialize adapter at {}", settings.address))?;

    println!("Device version: {}", session.version());

    for command in &settings.commands {
        let result = session.run(command).await;
        match result.error() {
            Some(err) => warn!("{} failed ({}): {}", command, failure_source(err), err),
            None => info!(
                "{} -> {:?} (write {:?}, read {:?}, total {:?})",
                command,
                result.output(),
                result.write_time(),
                result.read_time(),
                result.total_time()
            ),
        }
    }

    let state = session.state().await;
    if !state.is_ready() {
        warn!("Adapter left in {:?} state", state);
    }

    Ok(())
}

/// Which side of the link a failed command points at
fn failure_source(err: &ElmError) -> &'static str {
    if err.is_transport() {
        "transport"
    } else {
        "adapter"
    }
}

/// Initialize logging
fn init_logging(level: &str) -> anyhow::Result<()> {
    let level = Level::from_str(level).map_err(|e| anyhow!("Invalid log level {level:?}: {e}"))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}
