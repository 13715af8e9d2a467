#![warn(missing_docs)]

//! # rest_auth_http: authenticated outbound HTTP
//!
//! This crate is the outbound HTTP layer of the organizations/users service.
//! It turns declarative request descriptions into HTTP calls, authenticates
//! them with bearer tokens, and reduces failures to structured errors.
//!
//! ## Overview
//!
//! The layer is built from four pieces, leaves first:
//!
//! 1. **Path rendering** - `:name` placeholders in a URI template are
//!    substituted and percent-escaped
//! 2. **Request building** - an immutable [`RestRequest`] collects method,
//!    URI, parameters, headers, content negotiation, and body
//! 3. **Transport** - [`RestTransport`] sends the request, honors the
//!    caller's deadline, and classifies the response
//! 4. **Authentication** - [`AuthClient`] injects `Authorization: Bearer`
//!    and `X-Request-Id`, and retries exactly once after a 401 with a
//!    freshly issued token
//!
//! ## Key Features
//!
//! - **Bounded recovery**: at most one retry, and only on 401
//! - **Visible auth failures**: if the token refresh itself fails, the
//!   original 401 is returned
//! - **Structured errors**: non-2xx responses become a [`StatusError`] with
//!   a message taken from `"message"` or `"error"` in a JSON body
//! - **Body policy**: JSON under `application/json`, raw strings otherwise,
//!   and never a body on GET or HEAD
//! - **Shareable**: requests are values and clients are cheap clones, so one
//!   configuration serves any number of concurrent calls
//!
//! ## Usage
//!
//! ```ignore
//! use rest_auth_http::api::{models::ListOptions, OrganizationsApi};
//! use rest_auth_http::{AuthClient, CallContext, RestTransport, StaticToken};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AuthClient::new(
//!         "https://api.example.com",
//!         RestTransport::new(),
//!         Arc::new(StaticToken::new("secret")),
//!     );
//!     let orgs = OrganizationsApi::new(client);
//!
//!     let ctx = CallContext::new()
//!         .with_request_id("req-1")
//!         .with_timeout(Duration::from_secs(5));
//!
//!     for org in orgs.list(&ctx, ListOptions::default()).await? {
//!         println!("{} {}", org.id, org.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - Methods, call context, parameter maps
//! - **[error]** - Error types and result handling
//! - **[protocol]** - Header names, media types, path rendering
//! - **[client]** - Request builder, transport, authenticated client
//! - **[api]** - Typed organization and user resource clients

pub mod api;
pub mod client;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::{
    AuthClient, ClientConfig, FnTokenSupplier, RestRequest, RestTransport, StaticToken,
    TokenSupplier,
};
pub use error::{BoxError, Error, Result, StatusError};
pub use types::{CallContext, Headers, Method, PathParams, QueryParams};
