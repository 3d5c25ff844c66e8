//! Error types for housing-ols.

use thiserror::Error;

/// Result type alias for housing-ols operations.
pub type Result<T> = std::result::Result<T, OlsError>;

/// Errors that can occur while loading data or running the pipeline.
#[derive(Error, Debug)]
pub enum OlsError {
    /// The data file is missing or unreadable, or console output failed.
    #[error("IO error: {0}")]
    IoError(String),
    /// Malformed CSV structure or a non-numeric field.
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },
    /// Invalid configuration value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// A result was pushed after the channel had been sealed.
    #[error("Result channel is sealed")]
    ChannelSealed,
    /// A configuration file could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl OlsError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        OlsError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Whether this error came from reading or parsing the input file.
    pub fn is_load_error(&self) -> bool {
        matches!(self, OlsError::IoError(_) | OlsError::ParseError { .. })
    }
}

impl From<std::io::Error> for OlsError {
    fn from(err: std::io::Error) -> Self {
        OlsError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for OlsError {
    fn from(err: serde_json::Error) -> Self {
        OlsError::SerializationError(err.to_string())
    }
}
