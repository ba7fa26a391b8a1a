//! ## levelog-telemetry::logging
//!
//! `tracing` setup for the process and a [`StructuredSink`] that forwards
//! every delivered record as a `tracing` event at the matching level.

use levelog_config::TelemetryConfig;
use levelog_core::{LogRecord, Severity, SinkError, StructuredSink};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins over the configured filter. Returns `false` when a
/// global subscriber was already set, which leaves that one in place.
pub fn init_tracing(config: &TelemetryConfig) -> bool {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter)),
        )
        .with_ansi(config.ansi)
        .with_thread_names(true)
        .try_init()
        .is_ok()
}

/// Re-emits records as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl StructuredSink for TracingSink {
    fn on_record(&self, record: &LogRecord<'_>) -> Result<(), SinkError> {
        let message = record.rendered_message();
        let location = record.location;
        match record.level {
            Severity::Error => error!(location, "{message}"),
            Severity::Warning => warn!(location, "{message}"),
            Severity::Info => info!(location, "{message}"),
            Severity::Debug => debug!(location, "{message}"),
            Severity::None => {}
        }
        Ok(())
    }
}
