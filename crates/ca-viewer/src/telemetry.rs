//! Logging setup for the viewer.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Set to `json` for machine-readable log lines
pub const LOG_FORMAT_ENV_VAR: &str = "CA_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info,ca_viewer=debug,ca_engine=debug";

pub fn init_telemetry() -> Result<()> {
    let json = std::env::var(LOG_FORMAT_ENV_VAR)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Frames go to stdout, so logs go to stderr
    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(fmt_layer)
        .try_init()?;

    info!(json, "Telemetry initialized");
    Ok(())
}
