//! Error handling for Serra Engine
//!
//! The terrain core never fails: empty series, out-of-range queries and
//! degenerate tangents all degrade to defaults. Errors only surface at the
//! edges, where timelines and configuration are parsed or loaded.

use std::path::Path;

/// Main error type for Serra Engine
#[derive(Debug, thiserror::Error)]
pub enum SerraError {
    // Timeline Errors
    #[error("Invalid timeline: {reason}")]
    InvalidTimeline { reason: String },

    #[error("Invalid date '{value}' at record {index}")]
    InvalidDate { value: String, index: usize },

    #[error("Dates out of order at record {index}: {previous} is not before {current}")]
    UnorderedDates {
        index: usize,
        previous: String,
        current: String,
    },

    // Loading Errors
    #[error("Load failed after {attempts} attempts: {last_error}")]
    LoadExhausted { attempts: u32, last_error: String },

    #[error("IO error for {path}: {error}")]
    IoError { path: String, error: String },

    // Serialization Errors
    #[error("Deserialization error in {context}: {error}")]
    DeserializationError { context: String, error: String },

    #[error("Serialization error in {context}: {error}")]
    SerializationError { context: String, error: String },

    // Configuration Errors
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // Generic fallback for unexpected errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Results in Serra Engine
pub type SerraResult<T> = Result<T, SerraError>;

impl SerraError {
    /// Build an IO error tagged with the path that failed
    pub fn io(path: &Path, error: std::io::Error) -> Self {
        SerraError::IoError {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Build an invalid-config error from anything displayable
    pub fn invalid_config(field: &str, value: impl std::fmt::Display, reason: &str) -> Self {
        SerraError::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for SerraError {
    fn from(error: serde_json::Error) -> Self {
        SerraError::DeserializationError {
            context: "json".to_string(),
            error: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for SerraError {
    fn from(error: toml::de::Error) -> Self {
        SerraError::DeserializationError {
            context: "toml".to_string(),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SerraError::UnorderedDates {
            index: 3,
            previous: "2020-03-02".to_string(),
            current: "2020-03-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Dates out of order at record 3: 2020-03-02 is not before 2020-03-01"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parsed: Result<Vec<u32>, _> = serde_json::from_str("[1, 2,");
        let err: SerraError = parsed.unwrap_err().into();
        assert!(matches!(err, SerraError::DeserializationError { ref context, .. } if context == "json"));
    }
}
