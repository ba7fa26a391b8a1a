//! # levelog Configuration
//!
//! Hierarchical configuration for a process-wide [`LevelLogger`].
//!
//! Sources, lowest priority first:
//! 1. Default values
//! 2. `config/levelog.yaml`
//! 3. `config/<LEVELOG_ENV>.yaml`
//! 4. `LEVELOG_*` environment variables, `__` separating nested keys
//!    (e.g. `LEVELOG_FORMAT__INCLUDE_LOCATION=false`)

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use levelog_core::{parse_threshold, LevelLogger, LevelLoggerBuilder, ResolverKind, Severity};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

mod error;
mod output;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use output::{CallSiteConfig, FormatConfig};
pub use telemetry::TelemetryConfig;

const BASE_CONFIG: &str = "config/levelog.yaml";
const ENV_PREFIX: &str = "LEVELOG_";

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct LevelogConfig {
    /// Logger threshold, as a level name or number (`0..=4`).
    #[validate(custom(function = validation::validate_threshold))]
    #[serde(default = "default_threshold", deserialize_with = "deserialize_threshold")]
    pub threshold: String,

    /// Formatted-line rendering.
    #[validate(nested)]
    #[serde(default)]
    pub format: FormatConfig,

    /// Call-site capture.
    #[validate(nested)]
    #[serde(default)]
    pub call_site: CallSiteConfig,

    /// Diagnostics of the logger itself.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_threshold() -> String {
    Severity::default().to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdValue {
    Num(i64),
    Str(String),
}

/// Environment variables arrive as numbers when they look like one.
fn deserialize_threshold<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match ThresholdValue::deserialize(deserializer)? {
        ThresholdValue::Num(n) => Ok(n.to_string()),
        ThresholdValue::Str(s) => Ok(s),
    }
}

impl Default for LevelogConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            format: FormatConfig::default(),
            call_site: CallSiteConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl LevelogConfig {
    /// Load configuration from default files and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(LevelogConfig::default()));

        if Path::new(BASE_CONFIG).exists() {
            figment = figment.merge(Yaml::file(BASE_CONFIG));
        }

        if let Ok(env) = std::env::var("LEVELOG_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::finish(figment)
    }

    /// Load configuration from a specific file, still honoring environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Self::finish(
            Figment::from(Serialized::defaults(LevelogConfig::default()))
                .merge(Yaml::file(path)),
        )
    }

    fn finish(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    pub fn severity(&self) -> Result<Severity, ConfigError> {
        Ok(parse_threshold(&self.threshold)?)
    }

    pub fn resolver_kind(&self) -> Result<ResolverKind, ConfigError> {
        self.call_site
            .resolver
            .parse::<ResolverKind>()
            .map_err(ConfigError::Resolver)
    }

    /// Builder preloaded with threshold, resolver and line format, for
    /// callers that still want to attach a clock or metrics.
    pub fn logger_builder(&self) -> Result<LevelLoggerBuilder, ConfigError> {
        Ok(LevelLogger::builder()
            .threshold(self.severity()?)
            .resolver(self.resolver_kind()?.resolver())
            .include_location(self.format.include_location))
    }

    pub fn build_logger(&self) -> Result<LevelLogger, ConfigError> {
        Ok(self.logger_builder()?.build())
    }
}
