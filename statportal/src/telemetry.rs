//! Tracing initialization (fmt subscriber + env filter).
//!
//! The service logs structured events via `tracing`. Log verbosity is
//! controlled with the standard `RUST_LOG` environment variable; the default
//! filter is `info`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global tracing subscriber.
///
/// Safe to call exactly once at process start; returns an error if a
/// subscriber was already installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!("Telemetry initialized");

    Ok(())
}
