//! Header formatting and assembly.
//!
//! Builder-supplied headers are appended in order, repeated names included.
//! `Accept` and `Content-Type` are applied afterwards and replace any values
//! of the same name, so each appears exactly once when configured.
//!
//! # Examples
//!
//! ```
//! use rest_auth_http::protocol::{bearer, build_header_map};
//! use rest_auth_http::Headers;
//!
//! let mut headers = Headers::new();
//! headers.insert("X-Tag".into(), vec!["a".into(), "b".into()]);
//! headers.insert("Accept".into(), vec!["text/html".into()]);
//!
//! let map = build_header_map(&headers, Some("application/json"), None).unwrap();
//! assert_eq!(map.get_all("x-tag").iter().count(), 2);
//! assert_eq!(map.get_all("accept").iter().count(), 1);
//! assert_eq!(map["accept"], "application/json");
//!
//! assert_eq!(bearer("abc"), "Bearer abc");
//! ```

use crate::error::{Error, Result};
use crate::protocol::constants::headers;
use crate::types::Headers;
use http::header::{HeaderMap, HeaderName, HeaderValue};

/// Format an `Authorization` value for a bearer token.
#[inline]
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Assemble the outgoing header map.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] if a name or value cannot be sent.
pub fn build_header_map(
    custom: &Headers,
    accept: Option<&str>,
    content_type: Option<&str>,
) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();

    for (name, values) in custom {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidHeader(format!("name {:?}", name)))?;
        for value in values {
            map.append(name.clone(), header_value(&name, value)?);
        }
    }

    if let Some(accept) = accept {
        map.insert(headers::ACCEPT, header_value(&headers::ACCEPT, accept)?);
    }
    if let Some(content_type) = content_type {
        map.insert(
            headers::CONTENT_TYPE,
            header_value(&headers::CONTENT_TYPE, content_type)?,
        );
    }

    Ok(map)
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::InvalidHeader(format!("value for {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &[&str])]) -> Headers {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_repeated_values_are_appended() {
        let map = build_header_map(&headers(&[("X-Trace", &["1", "2", "2"])]), None, None).unwrap();
        let values: Vec<_> = map.get_all("x-trace").iter().collect();
        assert_eq!(values, vec!["1", "2", "2"]);
    }

    #[test]
    fn test_content_type_overrides_custom_value() {
        let custom = headers(&[("content-type", &["text/xml", "text/csv"]), ("X-Keep", &["yes"])]);
        let map = build_header_map(&custom, None, Some("application/json")).unwrap();
        let values: Vec<_> = map.get_all("content-type").iter().collect();
        assert_eq!(values, vec!["application/json"]);
        assert_eq!(map["x-keep"], "yes");
        assert!(map.get("accept").is_none());
    }

    #[test]
    fn test_custom_accept_kept_when_not_configured() {
        let map = build_header_map(&headers(&[("Accept", &["text/csv"])]), None, None).unwrap();
        assert_eq!(map["accept"], "text/csv");
    }

    #[test]
    fn test_invalid_name() {
        let result = build_header_map(&headers(&[("bad name", &["v"])]), None, None);
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_invalid_value() {
        let result = build_header_map(&headers(&[("X-Line", &["a\nb"])]), None, None);
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }
}
