//! # levelog Telemetry
//!
//! Observability for the logger itself: `tracing` subscriber setup, a sink
//! bridging records into `tracing`, and Prometheus dispatch counters.

pub mod logging;
pub mod metrics;

pub use logging::{init_tracing, TracingSink};
pub use metrics::MetricsRecorder;
