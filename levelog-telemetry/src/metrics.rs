//! ## levelog-telemetry::metrics
//! **Prometheus counters for dispatch outcomes**
//!
//! One counter family, `levelog_dispatch_total`, labelled by level and by
//! outcome (`suppressed`, `unheard`, `delivered`, `failed`).

use levelog_core::{DispatchMetrics, DispatchOutcome, Severity};
use prometheus::{IntCounterVec, Opts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub dispatched: IntCounterVec,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let dispatched = IntCounterVec::new(
            Opts::new("levelog_dispatch_total", "Log emissions by level and outcome"),
            &["level", "outcome"],
        )?;
        registry.register(Box::new(dispatched.clone()))?;

        Ok(Self {
            registry,
            dispatched,
        })
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn count(&self, level: Severity, outcome: DispatchOutcome) -> u64 {
        self.dispatched
            .with_label_values(&[level_label(level), outcome.as_str()])
            .get()
    }
}

fn level_label(level: Severity) -> &'static str {
    level.name().unwrap_or("none")
}

impl DispatchMetrics for MetricsRecorder {
    fn record(&self, level: Severity, outcome: DispatchOutcome) {
        self.dispatched
            .with_label_values(&[level_label(level), outcome.as_str()])
            .inc();
    }
}
