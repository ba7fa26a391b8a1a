//! Severity levels and threshold parsing.
//!
//! Levels are ordered by verbosity: a higher value is chattier. A message at
//! level `L` is emitted when the logger threshold is `>= L`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LOG_LEVEL_NONE: u8 = 0;
pub const LOG_LEVEL_ERROR: u8 = 1;
pub const LOG_LEVEL_WARNING: u8 = 2;
pub const LOG_LEVEL_INFO: u8 = 3;
pub const LOG_LEVEL_DEBUG: u8 = 4;

/// Message severity, also used as the logger threshold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// Threshold that silences everything. Never attached to a message.
    None = LOG_LEVEL_NONE,
    Error = LOG_LEVEL_ERROR,
    #[default]
    #[serde(alias = "warn")]
    Warning = LOG_LEVEL_WARNING,
    #[serde(alias = "log")]
    Info = LOG_LEVEL_INFO,
    Debug = LOG_LEVEL_DEBUG,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::None,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
    ];

    /// Lowercase name used in records and rendered lines.
    ///
    /// [`Severity::None`] has no name since it is never attached to a message.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Severity::None => None,
            Severity::Error => Some("error"),
            Severity::Warning => Some("warning"),
            Severity::Info => Some("info"),
            Severity::Debug => Some("debug"),
        }
    }

    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Maps a numeric level onto a severity, `None` when outside `[0, 4]`.
    pub fn from_value(value: i64) -> Option<Severity> {
        match value {
            0 => Some(Severity::None),
            1 => Some(Severity::Error),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Info),
            4 => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Whether a message at `level` passes this threshold.
    #[inline]
    pub fn allows(self, level: Severity) -> bool {
        self >= level
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("none"))
    }
}

/// Error returned when boundary input cannot be turned into a [`Severity`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("empty log level")]
    Empty,

    #[error("log level {0} is outside the range {LOG_LEVEL_NONE}..={LOG_LEVEL_DEBUG}")]
    OutOfRange(i64),

    #[error("unrecognized log level: {0:?}")]
    Unrecognized(String),
}

impl TryFrom<u8> for Severity {
    type Error = ThresholdError;

    fn try_from(value: u8) -> Result<Self, ThresholdError> {
        Severity::from_value(i64::from(value)).ok_or(ThresholdError::OutOfRange(i64::from(value)))
    }
}

impl FromStr for Severity {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_threshold(s)
    }
}

/// Strict parser for thresholds coming from configuration or the command line.
///
/// Accepts a decimal level in range or a level name, case-insensitive.
pub fn parse_threshold(raw: &str) -> Result<Severity, ThresholdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ThresholdError::Empty);
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Severity::from_value(value).ok_or(ThresholdError::OutOfRange(value));
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "none" | "off" => Ok(Severity::None),
        "error" => Ok(Severity::Error),
        "warning" | "warn" => Ok(Severity::Warning),
        "info" | "log" => Ok(Severity::Info),
        "debug" => Ok(Severity::Debug),
        _ => Err(ThresholdError::Unrecognized(trimmed.to_string())),
    }
}

/// Permissive integer coercion used by the lenient threshold setter.
///
/// Skips leading whitespace, reads an optional sign and the longest run of
/// decimal digits. Anything after the digits is ignored, so `"3abc"` and
/// `"2.9"` coerce to 3 and 2. Returns `None` when no digit is found.
pub fn coerce_threshold(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate instead of overflowing; anything that large is out of range anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_verbosity() {
        assert!(Severity::None < Severity::Error);
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert!(Severity::Info < Severity::Debug);
        assert_eq!(Severity::default(), Severity::Warning);
    }

    #[test]
    fn names_are_lowercase_and_none_is_unnamed() {
        assert_eq!(Severity::None.name(), None);
        assert_eq!(Severity::Error.name(), Some("error"));
        assert_eq!(Severity::Warning.name(), Some("warning"));
        assert_eq!(Severity::Info.name(), Some("info"));
        assert_eq!(Severity::Debug.name(), Some("debug"));
        assert_eq!(Severity::None.to_string(), "none");
    }

    #[test]
    fn parse_accepts_numbers_and_names() {
        assert_eq!(parse_threshold("0"), Ok(Severity::None));
        assert_eq!(parse_threshold(" 4 "), Ok(Severity::Debug));
        assert_eq!(parse_threshold("WARN"), Ok(Severity::Warning));
        assert_eq!(parse_threshold("log"), Ok(Severity::Info));
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(parse_threshold("   "), Err(ThresholdError::Empty));
        assert_eq!(parse_threshold("5"), Err(ThresholdError::OutOfRange(5)));
        assert_eq!(parse_threshold("-1"), Err(ThresholdError::OutOfRange(-1)));
        assert!(matches!(
            parse_threshold("verbose"),
            Err(ThresholdError::Unrecognized(_))
        ));
    }

    #[test]
    fn coercion_reads_leading_integer() {
        assert_eq!(coerce_threshold("3"), Some(3));
        assert_eq!(coerce_threshold("  2.9"), Some(2));
        assert_eq!(coerce_threshold("3abc"), Some(3));
        assert_eq!(coerce_threshold("-7"), Some(-7));
        assert_eq!(coerce_threshold("abc"), None);
        assert_eq!(coerce_threshold(""), None);
        assert_eq!(coerce_threshold("-"), None);
    }

    #[test]
    fn try_from_u8_checks_range() {
        assert_eq!(Severity::try_from(3u8), Ok(Severity::Info));
        assert_eq!(Severity::try_from(9u8), Err(ThresholdError::OutOfRange(9)));
    }
}
