//! Error types for the authenticated HTTP client.
//!
//! Every call returns exactly one [`Error`]. Failures that happen before any
//! bytes are written (token supplier, URI, path params, body encoding,
//! headers) are distinguishable from transport failures and from HTTP status
//! failures, and the status failures carry a [`StatusError`] so callers can
//! branch on the code without looking at the response body again.

use std::fmt;

/// Boxed error returned by external collaborators such as token suppliers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by building, sending, and decoding requests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The token supplier failed; its error is passed through unchanged.
    #[error(transparent)]
    TokenSupplier(BoxError),

    /// The request URI could not be parsed.
    #[error("invalid request URI: {0}")]
    UriParse(#[from] url::ParseError),

    /// A placeholder in the path template had no (or an empty) value.
    #[error("{0} not found in the path params")]
    PathParamMissing(String),

    /// A path param value would be read as a `.` or `..` segment.
    #[error("{0} cannot be a dot segment in the path")]
    InvalidPathParam(String),

    /// The request body could not be encoded for its content-type.
    #[error("body encoding failed: {0}")]
    BodyEncoding(String),

    /// A header name or value is not valid on the wire.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Network failure, timeout, or cancellation.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status outside 200-299.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// A successful response body could not be decoded.
    #[error("response decode failed: {0}")]
    ResponseDecode(String),
}

impl Error {
    /// Transport error reported when the caller's deadline has passed.
    pub fn deadline_exceeded() -> Self {
        Error::Transport("context deadline exceeded".to_string())
    }

    /// Map a `reqwest` failure, keeping deadline semantics visible.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Transport(format!("context deadline exceeded: {}", err))
        } else {
            Error::Transport(err.to_string())
        }
    }

    /// HTTP status code, if this is a status failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(err) => Some(err.status),
            _ => None,
        }
    }

    /// Structured status error, if this is a status failure.
    pub fn as_status(&self) -> Option<&StatusError> {
        match self {
            Error::Status(err) => Some(err),
            _ => None,
        }
    }

    /// True for an HTTP 401 response.
    pub fn is_unauthorized(&self) -> bool {
        self.status().is_some_and(crate::client::is_unauthorized_status)
    }

    /// True for an HTTP 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// A non-2xx response reduced to its status code and a best-effort message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    /// HTTP status code
    pub status: u16,
    /// Message extracted from the response body, possibly empty
    pub message: String,
}

impl StatusError {
    /// Create a status error.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        StatusError {
            status,
            message: message.into(),
        }
    }

    /// HTTP 400
    pub fn is_bad_request(&self) -> bool {
        self.status == 400
    }

    /// HTTP 401
    pub fn is_unauthorized(&self) -> bool {
        crate::client::is_unauthorized_status(self.status)
    }

    /// HTTP 403
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// HTTP 404
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// HTTP 409
    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }

    /// Any 5xx status.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "HTTP {}", self.status)
        } else {
            write!(f, "HTTP {}: {}", self.status, self.message)
        }
    }
}

impl std::error::Error for StatusError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_param_message() {
        let err = Error::PathParamMissing("fooID".to_string());
        assert_eq!(err.to_string(), "fooID not found in the path params");
    }

    #[test]
    fn test_status_helpers() {
        let err = Error::from(StatusError::new(401, "expired"));
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "HTTP 401: expired");

        let conflict = StatusError::new(409, "");
        assert!(conflict.is_conflict());
        assert_eq!(conflict.to_string(), "HTTP 409");
    }

    #[test]
    fn test_token_supplier_error_is_transparent() {
        let inner: BoxError = "vault sealed".into();
        let err = Error::TokenSupplier(inner);
        assert_eq!(err.to_string(), "vault sealed");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_deadline_message() {
        assert!(Error::deadline_exceeded()
            .to_string()
            .contains("deadline exceeded"));
    }
}
