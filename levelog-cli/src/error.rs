use levelog_config::ConfigError;
use levelog_core::{SinkError, ThresholdError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Threshold(#[from] ThresholdError),

    #[error("log sink failed: {0}")]
    Sink(#[from] SinkError),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("cannot render configuration: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("messages cannot be emitted at level none")]
    UnnamedLevel,
}
