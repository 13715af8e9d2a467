//! Path template rendering.
//!
//! A template is a `/`-separated path whose segments may name placeholders
//! with a leading `:`. Rendering substitutes every placeholder from a map
//! and produces two strings in one pass:
//!
//! - `literal`: values inserted as given
//! - `escaped`: each inserted value percent-escaped as a single path
//!   segment, so an embedded `/` becomes `%2F`
//!
//! Literal segments, including empty trailing ones, pass through unchanged.
//! A value of `.` or `..` is rejected: URL normalization would resolve it
//! against the neighbouring segments, with or without escaping.
//!
//! # Examples
//!
//! ```
//! use rest_auth_http::protocol::render_path;
//! use rest_auth_http::PathParams;
//!
//! let params: PathParams = [("fooID", "a/bc"), ("barID", "def")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//!
//! let rendered = render_path("/foo/:fooID/bar/:barID", &params).unwrap();
//! assert_eq!(rendered.literal, "/foo/a/bc/bar/def");
//! assert_eq!(rendered.escaped, "/foo/a%2Fbc/bar/def");
//! ```

use crate::error::{Error, Result};
use crate::protocol::constants::PATH_PARAM_MARKER;
use crate::types::PathParams;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped inside a substituted path segment.
///
/// Unreserved characters and the sub-delimiters that are safe within a
/// segment stay as they are; `/`, `?`, `#`, `;`, `,`, `%` and the rest are
/// escaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Both renderings of a substituted path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPath {
    /// Path with values inserted verbatim
    pub literal: String,
    /// Path with each inserted value percent-escaped
    pub escaped: String,
}

/// Substitute `:name` placeholders in `template` from `params`.
///
/// # Errors
///
/// Returns [`Error::PathParamMissing`] naming the first placeholder that has
/// no value or an empty value, and [`Error::InvalidPathParam`] for a value
/// that is a dot segment.
pub fn render_path(template: &str, params: &PathParams) -> Result<RenderedPath> {
    let mut literal = Vec::new();
    let mut escaped = Vec::new();

    for segment in template.split('/') {
        match segment.strip_prefix(PATH_PARAM_MARKER) {
            Some(name) => {
                let value = params
                    .get(name)
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| Error::PathParamMissing(name.to_string()))?;
                if is_dot_segment(value) {
                    return Err(Error::InvalidPathParam(name.to_string()));
                }
                literal.push(value.clone());
                escaped.push(escape_segment(value));
            }
            None => {
                literal.push(segment.to_string());
                escaped.push(segment.to_string());
            }
        }
    }

    Ok(RenderedPath {
        literal: literal.join("/"),
        escaped: escaped.join("/"),
    })
}

fn is_dot_segment(value: &str) -> bool {
    value == "." || value == ".."
}

/// Percent-escape a value for use as one path segment.
pub fn escape_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> PathParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_three_placeholders() {
        let rendered = render_path(
            "/foo/:fooID/bar/:barID/baz/:bazID",
            &params(&[("fooID", "a/bc"), ("barID", "def"), ("bazID", "ghi")]),
        )
        .unwrap();
        assert_eq!(rendered.literal, "/foo/a/bc/bar/def/baz/ghi");
        assert_eq!(rendered.escaped, "/foo/a%2Fbc/bar/def/baz/ghi");
    }

    #[test]
    fn test_renderings_agree_without_special_characters() {
        let rendered = render_path(
            "/orgs/:org/users/:user",
            &params(&[("org", "acme-1"), ("user", "jane.doe~x")]),
        )
        .unwrap();
        assert_eq!(rendered.literal, rendered.escaped);
        assert_eq!(rendered.literal, "/orgs/acme-1/users/jane.doe~x");
    }

    #[test]
    fn test_missing_param() {
        let err = render_path("/foo/:fooID/bar/:barID", &params(&[("fooID", "a")])).unwrap_err();
        assert!(matches!(&err, Error::PathParamMissing(name) if name == "barID"));
        let message = err.to_string();
        assert!(message.contains("barID"));
        assert!(message.contains("not found in the path params"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = render_path("/foo/:fooID", &params(&[("fooID", "")])).unwrap_err();
        assert!(matches!(err, Error::PathParamMissing(name) if name == "fooID"));
    }

    #[test]
    fn test_dot_segments_rejected() {
        for value in [".", ".."] {
            let err = render_path("/orgs/:org/users/:user", &params(&[("org", "acme"), ("user", value)]))
                .unwrap_err();
            assert!(matches!(&err, Error::InvalidPathParam(name) if name == "user"));
        }

        let rendered = render_path("/files/:name", &params(&[("name", "...")])).unwrap();
        assert_eq!(rendered.escaped, "/files/...");
        let rendered = render_path("/files/:name", &params(&[("name", "../etc")])).unwrap();
        assert_eq!(rendered.escaped, "/files/..%2Fetc");
    }

    #[test]
    fn test_non_ascii_template_passes_through() {
        let rendered = render_path("/café/:idé", &params(&[("idé", "x")])).unwrap();
        assert_eq!(rendered.literal, "/café/x");
        assert_eq!(rendered.escaped, "/café/x");
    }

    #[test]
    fn test_trailing_slash_preserved() {
        let rendered = render_path("/foo/:id/", &params(&[("id", "x")])).unwrap();
        assert_eq!(rendered.literal, "/foo/x/");
        assert_eq!(rendered.escaped, "/foo/x/");
    }

    #[test]
    fn test_no_placeholders() {
        let rendered = render_path("/health", &PathParams::new()).unwrap();
        assert_eq!(rendered.literal, "/health");
        assert_eq!(rendered.escaped, "/health");
    }

    #[test]
    fn test_escape_segment() {
        assert_eq!(escape_segment("a b"), "a%20b");
        assert_eq!(escape_segment("50%"), "50%25");
        assert_eq!(escape_segment("a?b#c"), "a%3Fb%23c");
        assert_eq!(escape_segment("user@host:1"), "user@host:1");
        assert_eq!(escape_segment("é"), "%C3%A9");
    }
}
