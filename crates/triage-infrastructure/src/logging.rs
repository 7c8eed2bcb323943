//! Process-wide `tracing` subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use triage_core::config::LoggingConfig;

/// Builds the filter: `RUST_LOG` when set, otherwise `fallback`.
pub fn build_filter(fallback: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("Invalid log filter directive: {fallback}")),
    }
}

/// Installs a fmt subscriber for the process.
///
/// Calling it again once a global subscriber exists does nothing.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.filter)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    if installed.is_err() {
        tracing::debug!("[Logging] Global subscriber already installed, keeping it");
    }
    Ok(())
}
