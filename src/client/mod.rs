//! Outbound HTTP client.
//!
//! This module provides the request builder, the transport that executes
//! requests, and the authenticated client that wraps both:
//!
//! - **Build requests declaratively** from a URI template, path and query
//!   parameters, headers, and a body
//! - **Send them** with JSON or raw-string body encoding and deadline handling
//! - **Classify responses**, reducing failures to a status code and message
//! - **Authenticate** with bearer tokens and recover once from a 401
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── auth      - AuthClient and the retry-once protocol
//! ├── config    - Client configuration
//! ├── request   - RestRequest builder
//! ├── token     - Token supplier trait and adapters
//! ├── transport - RestTransport execution over reqwest
//! └── utils     - Status classification and error message extraction
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RestRequest`] | Immutable description of one request |
//! | [`RestTransport`] | Executes requests and classifies responses |
//! | [`AuthClient`] | Bearer-authenticated client with 401 recovery |
//! | [`TokenSupplier`] | Source of bearer tokens |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use rest_auth_http::client::{AuthClient, ClientConfig, RestTransport, StaticToken};
//! use std::sync::Arc;
//!
//! let config = ClientConfig {
//!     request_timeout_ms: 10_000,
//!     ..Default::default()
//! };
//! let transport = RestTransport::with_config(config).unwrap();
//! let client = AuthClient::new("https://api.example.com", transport, Arc::new(StaticToken::new("t")));
//! assert_eq!(client.base_url(), "https://api.example.com");
//! ```
//!
//! ## Building Requests
//!
//! ```
//! use rest_auth_http::client::RestRequest;
//!
//! let request = RestRequest::post("https://api.example.com/organizations/:id/users")
//!     .with_path_param("id", "acme")
//!     .with_content_type("application/json")
//!     .with_body(&serde_json::json!({"email": "jane@example.com"}));
//! assert!(request.encoded_body().unwrap().is_some());
//! ```

mod auth;
mod config;
mod request;
mod token;
mod transport;
mod utils;

pub use auth::AuthClient;
pub use config::ClientConfig;
pub use request::RestRequest;
pub use token::{FnTokenSupplier, StaticToken, TokenSupplier};
pub use transport::RestTransport;
pub use utils::*;
