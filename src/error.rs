//! Error types for trueno-calendar operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a calendar heatmap.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A date input could not be parsed as a calendar day.
    #[error("Invalid date{}: {input:?}", at_observation(.index))]
    InvalidDate {
        /// Position of the offending observation, when known.
        index: Option<usize>,
        /// The rejected input, as given.
        input: String,
    },

    /// An observation carried a NaN or infinite value.
    #[error("Invalid value at observation {index}: {value}")]
    InvalidValue {
        /// Position of the offending observation.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Configuration failed validation.
    #[error("Invalid configuration for '{field}': {message}")]
    Config {
        /// Option name that failed validation.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration file could not be parsed.
    #[error("Configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Configuration file not found or unreadable.
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),
}

#[allow(clippy::ref_option)]
fn at_observation(index: &Option<usize>) -> String {
    index.map(|i| format!(" at observation {i}")).unwrap_or_default()
}

impl Error {
    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::Config { field, message: message.into() }
    }

    /// Returns true for errors raised while resolving configuration.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::InvalidColor(_)
                | Self::ConfigParse { .. }
                | Self::ConfigNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_display() {
        let err = Error::InvalidDate { index: Some(3), input: "2025-13-01".to_string() };
        let msg = err.to_string();
        assert!(msg.contains("observation 3"));
        assert!(msg.contains("2025-13-01"));
    }

    #[test]
    fn test_invalid_date_without_index() {
        let err = Error::InvalidDate { index: None, input: "nope".to_string() };
        assert_eq!(err.to_string(), "Invalid date: \"nope\"");
    }

    #[test]
    fn test_config_display() {
        let err = Error::config("week_starts_on", "must be in 0..=6, got 9");
        assert!(err.to_string().contains("week_starts_on"));
        assert!(err.to_string().contains('9'));
        assert!(err.is_config());
    }

    #[test]
    fn test_date_error_is_not_config() {
        let err = Error::InvalidDate { index: Some(0), input: String::new() };
        assert!(!err.is_config());
    }
}
