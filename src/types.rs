//! Core value types shared by the request builder, transport, and
//! authenticated client.
//!
//! - [`Method`] is the closed set of HTTP methods the client speaks.
//! - [`CallContext`] carries per-call caller state: the correlation id to
//!   forward and the deadline to honor.
//! - [`PathParams`], [`QueryParams`], and [`Headers`] are the map shapes the
//!   builder accepts.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Values substituted into `:name` placeholders of a path template.
pub type PathParams = HashMap<String, String>;

/// Query parameters; each entry is encoded as one `key=value` pair.
pub type QueryParams = BTreeMap<String, Vec<String>>;

/// Request headers; repeated values are sent as repeated headers.
pub type Headers = BTreeMap<String, Vec<String>>;

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// HEAD
    Head,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Whether a request body may be sent with this method.
    ///
    /// GET and HEAD never carry a body, whatever the builder holds.
    #[inline]
    pub const fn allows_body(self) -> bool {
        !matches!(self, Method::Get | Method::Head)
    }

    /// Upper-case method token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Head => http::Method::HEAD,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// Caller state threaded through one logical call.
///
/// The client only reads from the context. Cancellation is dropping the
/// call's future; the deadline bounds both the token supplier and the HTTP
/// exchange.
///
/// # Examples
///
/// ```
/// use rest_auth_http::CallContext;
/// use std::time::Duration;
///
/// let ctx = CallContext::new()
///     .with_request_id("req-42")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(ctx.request_id(), Some("req-42"));
/// assert!(ctx.deadline().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    request_id: Option<String>,
    deadline: Option<Instant>,
}

impl CallContext {
    /// Context with no correlation id and no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the correlation id forwarded as `X-Request-Id`.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Correlation id, if one is present and non-empty.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `Some(ZERO)` once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_capability() {
        assert!(!Method::Get.allows_body());
        assert!(!Method::Head.allows_body());
        assert!(Method::Post.allows_body());
        assert!(Method::Put.allows_body());
        assert!(Method::Delete.allows_body());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(http::Method::from(Method::Head), http::Method::HEAD);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_empty_request_id_is_absent() {
        let ctx = CallContext::new().with_request_id("");
        assert_eq!(ctx.request_id(), None);
        assert_eq!(CallContext::new().request_id(), None);
    }

    #[test]
    fn test_expired_deadline_has_zero_remaining() {
        let ctx = CallContext::new().with_deadline(Instant::now());
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
        assert_eq!(CallContext::new().remaining(), None);
    }
}
