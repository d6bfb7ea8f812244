//! Optional subscriber setup for hosts that have none of their own.
//!
//! The SDK only emits `tracing` events; installing a subscriber is the host's
//! call. These helpers never replace an existing global subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable read by [`init_tracing`].
pub const LOG_ENV_VAR: &str = "FASTSTATS_LOG";

/// Install a JSON subscriber filtered by `FASTSTATS_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    install(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info")))
}

/// Same as [`init_tracing`] with an explicit filter string.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    install(EnvFilter::new(filter))
}

fn install(filter: EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .try_init()
        .is_ok()
}
