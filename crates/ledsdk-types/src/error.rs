//! Error types for SDK data handling.

use thiserror::Error;

/// Errors raised while building, validating or converting SDK payloads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdkError {
    /// A value failed validation.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A status key was pushed without a value.
    #[error("Missing value for status key: {key}")]
    MissingValue { key: String },

    /// Nothing to send.
    #[error("Empty payload: {context}")]
    EmptyPayload { context: String },

    /// A required field was missing.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A serialization error occurred.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Client configuration is unusable.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Reading a local file failed.
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl SdkError {
    /// Create a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new empty payload error.
    pub fn empty_payload(context: impl Into<String>) -> Self {
        Self::EmptyPayload {
            context: context.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for SdkError {
    fn from(err: std::io::Error) -> Self {
        SdkError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for SDK data operations.
pub type SdkResult<T> = Result<T, SdkError>;
