//! Tracing subscriber setup for hosts.
//!
//! The library crates only emit `tracing` events. A host (the headless
//! binary, a test, a renderer) calls [`init_tracing`] once to print them.

use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Install a fmt subscriber filtered by `RUST_LOG`, or by `default_filter`
/// when `RUST_LOG` is unset or unparsable.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), EngineError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| EngineError::Logging(e.to_string()))
}
