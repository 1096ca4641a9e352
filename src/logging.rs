//! Logging setup for the binaries.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to whoever runs it.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or cannot be parsed.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs a fmt subscriber filtered by `RUST_LOG`. Calling it again once a
/// global subscriber exists does nothing.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();

        tracing::info!("still logging");
    }
}
