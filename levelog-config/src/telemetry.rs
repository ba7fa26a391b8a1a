//! Diagnostics settings for the process-wide `tracing` subscriber and the
//! dispatch counters.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Telemetry configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TelemetryConfig {
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    #[validate(length(min = 1))]
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Count dispatch outcomes in Prometheus counters.
    #[serde(default)]
    pub metrics: bool,

    /// Colored terminal output.
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

fn default_filter() -> String {
    "warn".into()
}

fn default_ansi() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            metrics: false,
            ansi: default_ansi(),
        }
    }
}
