//! Response classification helpers.
//!
//! - Status code classification
//! - Best-effort message extraction from failure bodies

use crate::error::StatusError;
use std::collections::HashMap;

/// Success is exactly 200-299.
#[inline]
pub fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Check if status code is the one that triggers a token refresh
#[inline]
pub fn is_unauthorized_status(status: u16) -> bool {
    status == 401
}

/// Extract a message from a failure body.
///
/// The body is decoded as a JSON object of strings; `"message"` wins, then
/// `"error"`, else the message is empty. A body that is not such an object
/// is used verbatim.
///
/// # Examples
///
/// ```
/// use rest_auth_http::client::extract_error_message;
///
/// assert_eq!(extract_error_message(br#"{"message":"X"}"#), "X");
/// assert_eq!(extract_error_message(br#"{"error":"Y"}"#), "Y");
/// assert_eq!(extract_error_message(br#"{"other":"Z"}"#), "");
/// assert_eq!(extract_error_message(b"upstream down"), "upstream down");
/// ```
pub fn extract_error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<HashMap<String, String>>(body) {
        Ok(mut fields) => {
            let message = fields.remove("message").unwrap_or_default();
            if message.is_empty() {
                fields.remove("error").unwrap_or_default()
            } else {
                message
            }
        }
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

/// Build the structured error for a failed response whose body was read.
pub fn status_error(status: u16, body: &[u8]) -> StatusError {
    StatusError::new(status, extract_error_message(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(is_success_status(200));
        assert!(is_success_status(204));
        assert!(is_success_status(299));
        assert!(!is_success_status(199));
        assert!(!is_success_status(300));
        assert!(!is_success_status(404));
    }

    #[test]
    fn test_unauthorized() {
        assert!(is_unauthorized_status(401));
        assert!(!is_unauthorized_status(403));
    }

    #[test]
    fn test_message_preferred() {
        assert_eq!(extract_error_message(br#"{"message":"X","error":"Y"}"#), "X");
    }

    #[test]
    fn test_empty_message_falls_back_to_error() {
        assert_eq!(extract_error_message(br#"{"message":"","error":"Y"}"#), "Y");
    }

    #[test]
    fn test_neither_key() {
        let err = status_error(418, br#"{"other":"Z"}"#);
        assert_eq!(err.status, 418);
        assert_eq!(err.message, "");
    }

    #[test]
    fn test_non_string_values_use_raw_body() {
        let body = br#"{"message":"X","code":7}"#;
        assert_eq!(extract_error_message(body), r#"{"message":"X","code":7}"#);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(extract_error_message(b""), "");
    }
}
