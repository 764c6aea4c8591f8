//! # Error Handling
//!
//! Error types for tessera codec and persistence operations.
//!
//! Only failures that the caller must act on live here: decoding a buffer or
//! text that does not hold a valid encoding, and file I/O. Conditions such as
//! an out-of-range index or a missing key are reported through `tracing` and
//! never surface as an `Error`.

use thiserror::Error;

/// Result type alias for tessera operations
pub type Result<T> = std::result::Result<T, Error>;

/// Primary error type for tessera
#[derive(Error, Debug)]
pub enum Error {
    // Binary codec errors
    #[error("Truncated length prefix at offset {offset}: need 4 bytes, {remaining} remaining")]
    TruncatedLength { offset: usize, remaining: usize },

    #[error("Truncated payload at offset {offset}: need {expected} bytes, {remaining} remaining")]
    TruncatedPayload { offset: usize, expected: usize, remaining: usize },

    #[error("Truncated tree node at offset {offset}: need {expected} bytes, {remaining} remaining")]
    TruncatedNode { offset: usize, expected: usize, remaining: usize },

    // Text codec errors
    #[error("Malformed text: {message}")]
    MalformedText { message: String, source: serde_json::Error },

    // Persistence errors
    #[error("Invalid value on line {line}: {message}")]
    InvalidValue { line: usize, message: String },

    #[error("IO error: {message}")]
    Io { message: String, source: std::io::Error },

    // System errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Check if the error comes from a buffer that ended too early
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Error::TruncatedLength { .. } | Error::TruncatedPayload { .. } | Error::TruncatedNode { .. }
        )
    }

    /// Get error code for callers that branch on the failure kind
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::TruncatedLength { .. } => "TRUNCATED_LENGTH",
            Error::TruncatedPayload { .. } => "TRUNCATED_PAYLOAD",
            Error::TruncatedNode { .. } => "TRUNCATED_NODE",
            Error::MalformedText { .. } => "MALFORMED_TEXT",
            Error::InvalidValue { .. } => "INVALID_VALUE",
            Error::Io { .. } => "IO_ERROR",
            Error::Configuration { .. } => "CONFIG_ERROR",
            Error::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub(crate) fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
