//! Diagnostic logging for the CLI.
//!
//! Logs go to stderr so they never mix with JSON written to stdout.
//! `RUST_LOG` wins over the configured level. User-facing status lines
//! are not logs; they go through `cli::output`.

use tracing_subscriber::EnvFilter;

use crate::errors::{JsonSealError, Result};

/// Install the global `tracing` subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| JsonSealError::CommandFailed(format!("failed to initialise logging: {e}")))
}
