//! Error types for the textgen library.

use std::io;
use thiserror::Error;

use crate::api::EmptyReason;
use crate::host::Operation;

/// Result type alias for textgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating, formatting or exporting text.
///
/// Formatting, classification and pagination never fail; every variant here
/// belongs to a boundary (upstream fetch, response unwrapping, export, host).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error building or serializing the PDF object graph.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// The generation request failed, either on the network or with a non-2xx status.
    #[error("{}: {message}", describe_status(.status))]
    Upstream {
        /// HTTP status, `None` for transport failures
        status: Option<u16>,
        /// Transport error message or response body
        message: String,
    },

    /// The response carried no usable text.
    #[error("Empty response: {0}")]
    EmptyResponse(EmptyReason),

    /// The response body is not the expected JSON shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An operation of the same kind is already in flight.
    #[error("{0} already in progress")]
    Busy(Operation),

    /// No subject was given for the prompt.
    #[error("Subject must not be empty")]
    EmptySubject,

    /// Page geometry cannot hold a single line.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Upstream failure without an HTTP status (connection, DNS, TLS, timeout).
    pub fn network(message: impl Into<String>) -> Self {
        Error::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// Upstream failure with a non-success HTTP status and its body.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Error::Upstream {
            status: Some(status),
            message: body.into(),
        }
    }

    /// Whether this error came from the generation endpoint.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream { .. })
    }
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP error {}", code),
        None => "Network error".to_string(),
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::http(503, "overloaded");
        assert_eq!(err.to_string(), "HTTP error 503: overloaded");

        let err = Error::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = Error::Busy(Operation::Export);
        assert_eq!(err.to_string(), "export already in progress");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_upstream_kind() {
        assert!(Error::http(400, "bad").is_upstream());
        assert!(Error::network("down").is_upstream());
        assert!(!Error::EmptySubject.is_upstream());
    }
}
