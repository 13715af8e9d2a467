//! Wire-level conventions: header names and values, media types, and path
//! template rendering.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`constants`] | Header names, media types, the placeholder marker |
//! | [`headers`] | Bearer credential formatting and header map assembly |
//! | [`path`] | `:name` placeholder substitution with percent-escaping |

pub mod headers;
pub mod path;

pub use headers::{bearer, build_header_map};
pub use path::{render_path, RenderedPath};

/// Protocol constants.
pub mod constants {
    /// Header names produced by the client.
    pub mod headers {
        use http::header::HeaderName;

        /// `Accept`
        pub const ACCEPT: HeaderName = http::header::ACCEPT;
        /// `Content-Type`
        pub const CONTENT_TYPE: HeaderName = http::header::CONTENT_TYPE;
        /// `Authorization`
        pub const AUTHORIZATION: HeaderName = http::header::AUTHORIZATION;
        /// `X-Request-Id`, the forwarded correlation id
        pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
    }

    /// Media types.
    pub mod media_types {
        /// The JSON media type; bodies are JSON-encoded only under exactly this value.
        pub const JSON: &str = "application/json";
        /// Plain text.
        pub const TEXT: &str = "text/plain";
    }

    /// Character that marks a path segment as a placeholder.
    pub const PATH_PARAM_MARKER: char = ':';
}
