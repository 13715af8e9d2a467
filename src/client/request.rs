//! Declarative description of one outbound request.
//!
//! `RestRequest` is a plain value: every `with_*` call consumes it and
//! returns the updated request, and it is `Clone`, so a base request can be
//! prepared once and specialised per call from many tasks without locking.
//! Nothing is validated until the request is sent (or one of the
//! `url`/`encoded_body`/`header_map` accessors is called); all validation
//! failures happen before any network I/O.
//!
//! # Examples
//!
//! ```
//! use rest_auth_http::{Method, RestRequest};
//!
//! let request = RestRequest::new(Method::Get, "https://api.example.com/orgs/:orgID/users")
//!     .with_path_param("orgID", "acme")
//!     .with_query_param("limit", "10")
//!     .with_accept("application/json");
//!
//! let url = request.url().unwrap();
//! assert_eq!(url.as_str(), "https://api.example.com/orgs/acme/users?limit=10");
//! ```

use crate::error::{Error, Result};
use crate::protocol::constants::media_types;
use crate::protocol::{build_header_map, render_path, RenderedPath};
use crate::types::{Headers, Method, PathParams, QueryParams};
use http::HeaderMap;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Request body as held by the builder.
#[derive(Debug, Clone)]
enum Body {
    /// Serialized form of the caller's value; strings stay `Value::String`
    Value(Value),
    /// The caller's value failed to serialize; reported when the body is encoded
    Unserializable(String),
}

/// An outbound request: method, URI template, parameters, headers, body.
#[derive(Debug, Clone)]
pub struct RestRequest {
    method: Method,
    uri: String,
    path_params: PathParams,
    query: QueryParams,
    headers: Headers,
    accept: Option<String>,
    content_type: Option<String>,
    body: Option<Body>,
}

impl RestRequest {
    /// Start a request for `uri`, which may contain `:name` placeholders.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        RestRequest {
            method,
            uri: uri.into(),
            path_params: PathParams::new(),
            query: QueryParams::new(),
            headers: Headers::new(),
            accept: None,
            content_type: None,
            body: None,
        }
    }

    /// GET request
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::Get, uri)
    }

    /// HEAD request
    pub fn head(uri: impl Into<String>) -> Self {
        Self::new(Method::Head, uri)
    }

    /// POST request
    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(Method::Post, uri)
    }

    /// PUT request
    pub fn put(uri: impl Into<String>) -> Self {
        Self::new(Method::Put, uri)
    }

    /// DELETE request
    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new(Method::Delete, uri)
    }

    /// Replace all path parameters.
    pub fn with_path_params(mut self, params: PathParams) -> Self {
        self.path_params = params;
        self
    }

    /// Set one path parameter.
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Replace all query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Append one value to a query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Replace all custom headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Append one header value; repeated names are sent repeatedly.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Set the `Accept` header.
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Set the `Content-Type` header, which also selects the body encoding.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Attach a body value.
    ///
    /// Under `application/json` the value is sent as JSON; under any other
    /// content-type it must be a string. A serialization failure is kept and
    /// reported as [`Error::BodyEncoding`] when the request is sent.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(match serde_json::to_value(body) {
            Ok(value) => Body::Value(value),
            Err(err) => Body::Unserializable(err.to_string()),
        });
        self
    }

    /// Attach a pre-serialized string body.
    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Body::Value(Value::String(body.into())));
        self
    }

    /// HTTP method
    pub fn method(&self) -> Method {
        self.method
    }

    /// URI template as given
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Path parameters
    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    /// Query parameters
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Custom headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Configured `Accept` value
    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    /// Configured `Content-Type` value
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Whether the builder carries a body (sent only if the method allows it).
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Both renderings of the request path.
    ///
    /// # Errors
    ///
    /// [`Error::UriParse`], [`Error::PathParamMissing`] or
    /// [`Error::InvalidPathParam`].
    pub fn rendered_path(&self) -> Result<RenderedPath> {
        self.parse().map(|(_, rendered)| rendered)
    }

    /// Final URL: escaped path plus the form-encoded query string.
    ///
    /// # Errors
    ///
    /// [`Error::UriParse`], [`Error::PathParamMissing`] or
    /// [`Error::InvalidPathParam`].
    pub fn url(&self) -> Result<Url> {
        let (mut url, rendered) = self.parse()?;
        url.set_path(&rendered.escaped);

        if self.query.values().any(|values| !values.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, values) in &self.query {
                for value in values {
                    pairs.append_pair(key, value);
                }
            }
        }

        Ok(url)
    }

    /// Bytes to send as the body, or `None` when no body goes on the wire.
    ///
    /// # Errors
    ///
    /// [`Error::BodyEncoding`] when the body cannot be encoded for the
    /// configured content-type.
    pub fn encoded_body(&self) -> Result<Option<Vec<u8>>> {
        if !self.method.allows_body() {
            return Ok(None);
        }
        let Some(body) = &self.body else {
            return Ok(None);
        };

        let content_type = self.content_type.as_deref().unwrap_or_default();
        if content_type == media_types::JSON {
            return match body {
                Body::Value(value) => serde_json::to_vec(value)
                    .map(Some)
                    .map_err(|e| Error::BodyEncoding(e.to_string())),
                Body::Unserializable(reason) => Err(Error::BodyEncoding(reason.clone())),
            };
        }

        match body {
            Body::Value(Value::String(raw)) => Ok(Some(raw.clone().into_bytes())),
            _ => Err(Error::BodyEncoding(format!(
                "content-type is {:?} but the body is not a string",
                content_type
            ))),
        }
    }

    /// Validate the URI and render the path the caller wrote.
    ///
    /// Rendering runs on the raw template text, not on `Url::path`, which is
    /// already percent-encoded and would alter placeholder names.
    fn parse(&self) -> Result<(Url, RenderedPath)> {
        let url = Url::parse(&self.uri)?;
        let template = template_path(&self.uri).unwrap_or_else(|| url.path());
        let rendered = render_path(template, &self.path_params)?;
        Ok((url, rendered))
    }

    /// Header map to send.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHeader`] for names or values that cannot be sent.
    pub fn header_map(&self) -> Result<HeaderMap> {
        build_header_map(&self.headers, self.accept(), self.content_type())
    }
}

/// Path of an `scheme://authority/path?query#fragment` URI as written.
fn template_path(uri: &str) -> Option<&str> {
    let (_, rest) = uri.split_once("://")?;
    let start = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let path = &rest[start..];
    let end = path.find(|c: char| matches!(c, '?' | '#')).unwrap_or(path.len());
    Some(&path[..end])
}
