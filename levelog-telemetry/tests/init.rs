use levelog_config::TelemetryConfig;
use levelog_core::{LevelLogger, Severity};
use levelog_telemetry::{init_tracing, TracingSink};

#[test]
fn init_tracing_installs_once() {
    let config = TelemetryConfig {
        filter: "debug".into(),
        ..TelemetryConfig::default()
    };
    assert!(init_tracing(&config));
    assert!(!init_tracing(&config));

    let logger = LevelLogger::builder().threshold(Severity::Info).build();
    logger.subscribe_structured(TracingSink);
    logger.info("after init", &[]).unwrap();
}
