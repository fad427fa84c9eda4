//! Error types for gbfetch

use std::fmt;

/// Result type alias for gbfetch operations
pub type Result<T> = std::result::Result<T, GbfetchError>;

/// Error types that can occur in gbfetch
#[derive(Debug)]
pub enum GbfetchError {
    /// I/O error
    Io(std::io::Error),

    /// Network transport error
    Network(String),

    /// Non-success HTTP status from E-utilities
    Http {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
    },

    /// Request exceeded the configured timeout
    Timeout {
        /// Timeout in seconds
        seconds: u64,
        /// Request URL
        url: String,
    },

    /// E-utilities response did not match the expected document shape
    MalformedResponse {
        /// Error message
        msg: String,
    },

    /// Invalid GenBank flat-file text
    InvalidGenBankFormat {
        /// Error message
        msg: String,
    },

    /// CSV serialization error
    Csv(String),

    /// Chart rendering error
    Render(String),
}

impl fmt::Display for GbfetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GbfetchError::Io(e) => write!(f, "I/O error: {}", e),
            GbfetchError::Network(msg) => write!(f, "Network error: {}", msg),
            GbfetchError::Http { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            GbfetchError::Timeout { seconds, url } => {
                write!(f, "Request timed out after {}s: {}", seconds, url)
            }
            GbfetchError::MalformedResponse { msg } => {
                write!(f, "Malformed E-utilities response: {}", msg)
            }
            GbfetchError::InvalidGenBankFormat { msg } => {
                write!(f, "Invalid GenBank format: {}", msg)
            }
            GbfetchError::Csv(msg) => write!(f, "CSV error: {}", msg),
            GbfetchError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for GbfetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GbfetchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GbfetchError {
    fn from(error: std::io::Error) -> Self {
        GbfetchError::Io(error)
    }
}

impl From<csv::Error> for GbfetchError {
    fn from(error: csv::Error) -> Self {
        GbfetchError::Csv(error.to_string())
    }
}
