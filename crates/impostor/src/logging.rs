//! Tracing subscriber setup.
//!
//! Libraries in this workspace only emit `tracing` events. Binaries call
//! [`init`] once at startup to print them.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,impostor_session=debug";

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// # Errors
/// [`ImpostorError::Logging`](crate::ImpostorError::Logging) if a global
/// subscriber is already installed.
pub fn init() -> Result<(), crate::ImpostorError> {
    init_with(DEFAULT_FILTER)
}

/// Like [`init`], with an explicit fallback filter.
pub fn init_with(default_filter: &str) -> Result<(), crate::ImpostorError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| crate::ImpostorError::Logging(e.to_string()))?;
    tracing::debug!(default_filter, "tracing subscriber installed");
    Ok(())
}
