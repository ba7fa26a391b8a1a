//! Rendering and call-site capture settings.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Formatted-line settings.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct FormatConfig {
    /// Append the short call site after the timestamp.
    #[serde(default = "default_true")]
    pub include_location: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            include_location: default_true(),
        }
    }
}

/// Call-site capture settings.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CallSiteConfig {
    /// Resolver (caller, backtrace, none).
    #[validate(custom(function = validation::validate_resolver))]
    #[serde(default = "default_resolver")]
    pub resolver: String,
}

fn default_resolver() -> String {
    "caller".into()
}

impl Default for CallSiteConfig {
    fn default() -> Self {
        Self {
            resolver: default_resolver(),
        }
    }
}
