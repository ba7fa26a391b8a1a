//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate that a threshold names a known level or lies in `0..=4`.
pub fn validate_threshold(raw: &str) -> Result<(), ValidationError> {
    levelog_core::parse_threshold(raw)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_threshold"))
}

/// Validate call-site resolver name.
pub fn validate_resolver(name: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^(caller|backtrace|none)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_resolver"))
    }
}
