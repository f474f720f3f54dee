//! Unified error type for the subscriber-list client and its tooling.

use thiserror::Error;

/// Unified error type for Listwire.
///
/// A call against the remote list service ends in exactly one of these
/// variants or in success. `Rejected` carries the remote status and the raw
/// response body so callers can report what the service said.
#[derive(Error, Debug)]
pub enum ListwireError {
    // ============ Remote Errors ============
    /// The remote service answered with a status outside the accepted set.
    #[error("{operation} rejected with status {status}: {body}")]
    Rejected {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success status arrived with a body that could not be read.
    #[error("Decode error: {0}")]
    Decode(String),

    // ============ Local Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local I/O error (reading an import file)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ListwireError {
    /// Creates a rejection error for an operation.
    #[must_use]
    pub fn rejected<T: Into<String>>(operation: &'static str, status: u16, body: T) -> Self {
        Self::Rejected {
            operation,
            status,
            body: body.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns the remote HTTP status, if the service answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw remote response body, if the service answered.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "REMOTE_REJECTED",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Checks if the remote service blamed the request (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if *status >= 400 && *status < 500)
    }
}

impl From<serde_json::Error> for ListwireError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ListwireError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
