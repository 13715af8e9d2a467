//! Request execution over `reqwest`.
//!
//! [`RestTransport`] turns a [`RestRequest`] into an HTTP exchange:
//!
//! 1. Parse the URI and render the path (escaped rendering on the wire)
//! 2. Append the form-encoded query string
//! 3. Encode the body per the request's content-type
//! 4. Send, bounded by the [`CallContext`] deadline
//! 5. Classify: 200-299 is success, everything else becomes a
//!    [`StatusError`](crate::StatusError)
//!
//! Steps 1-3 fail without touching the network.
//!
//! There are three ways to consume a successful response:
//!
//! | Method | Body handling |
//! |--------|---------------|
//! | [`RestTransport::send`] | never read |
//! | [`RestTransport::send_json`] | JSON-decoded into `T`; `None` for HEAD or 204 |
//! | [`RestTransport::send_raw`] | returned as bytes; empty for HEAD or 204 |
//!
//! # Examples
//!
//! ```ignore
//! use rest_auth_http::{CallContext, RestRequest, RestTransport};
//!
//! let transport = RestTransport::new();
//! let request = RestRequest::get("http://localhost:8080/organizations/:id")
//!     .with_path_param("id", "acme")
//!     .with_accept("application/json");
//! let org: Option<serde_json::Value> = transport.send_json(&request, &CallContext::new()).await?;
//! ```

use crate::client::config::ClientConfig;
use crate::client::request::RestRequest;
use crate::client::utils::{is_success_status, status_error};
use crate::error::{Error, Result, StatusError};
use crate::types::{CallContext, Method};
use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Executes requests over a shared `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool and configuration.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl RestTransport {
    /// Transport with a default `reqwest::Client` and default configuration.
    pub fn new() -> Self {
        Self::from_client(reqwest::Client::new(), ClientConfig::default())
    }

    /// Build the underlying client from `config`.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] if the proxy URL is invalid or the client cannot
    /// be constructed.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone());

        if !config.proxy_url.is_empty() {
            let proxy = reqwest::Proxy::all(&config.proxy_url).map_err(Error::from_reqwest)?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(Error::from_reqwest)?;
        Ok(Self::from_client(client, config))
    }

    /// Wrap an existing client, e.g. one shared with other components.
    pub fn from_client(client: reqwest::Client, config: ClientConfig) -> Self {
        RestTransport {
            client,
            config: Arc::new(config),
        }
    }

    /// Get the transport configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send the request; the success body is not read.
    pub async fn send(&self, request: &RestRequest, ctx: &CallContext) -> Result<()> {
        self.dispatch(request, ctx).await.map(|_| ())
    }

    /// Send the request and decode a JSON success body.
    ///
    /// Returns `None` without reading the body for HEAD requests and 204
    /// responses.
    ///
    /// # Errors
    ///
    /// [`Error::ResponseDecode`] if the body is not valid JSON for `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: &RestRequest,
        ctx: &CallContext,
    ) -> Result<Option<T>> {
        let response = self.dispatch(request, ctx).await?;
        if !has_readable_body(request.method(), response.status()) {
            return Ok(None);
        }

        let body = response.bytes().await.map_err(Error::from_reqwest)?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| Error::ResponseDecode(e.to_string()))
    }

    /// Send the request and return the success body as-is.
    ///
    /// The body is empty for HEAD requests and 204 responses.
    pub async fn send_raw(&self, request: &RestRequest, ctx: &CallContext) -> Result<Bytes> {
        let response = self.dispatch(request, ctx).await?;
        if !has_readable_body(request.method(), response.status()) {
            return Ok(Bytes::new());
        }

        response.bytes().await.map_err(Error::from_reqwest)
    }

    /// Validate, send, and classify. Returns the response only for 2xx.
    async fn dispatch(&self, request: &RestRequest, ctx: &CallContext) -> Result<reqwest::Response> {
        let url = request.url()?;
        let headers = request.header_map()?;
        let body = request.encoded_body()?;

        let mut req_builder = self
            .client
            .request(request.method().into(), url.clone())
            .headers(headers);

        if let Some(body) = body {
            req_builder = req_builder.body(body);
        }

        if let Some(remaining) = ctx.remaining() {
            if remaining.is_zero() {
                return Err(Error::deadline_exceeded());
            }
            req_builder = req_builder.timeout(self.attempt_timeout(remaining));
        }

        if self.config.enable_logging {
            tracing::debug!(method = %request.method(), url = %url, "sending request");
        }

        let response = req_builder.send().await.map_err(Error::from_reqwest)?;
        let status = response.status().as_u16();

        if self.config.enable_logging {
            tracing::debug!(method = %request.method(), url = %url, status, "received response");
        }

        if is_success_status(status) {
            return Ok(response);
        }

        // A body that cannot be read still yields the status code.
        let error = match response.bytes().await {
            Ok(body) => status_error(status, &body),
            Err(_) => StatusError::new(status, String::new()),
        };
        Err(Error::Status(error))
    }
}

impl RestTransport {
    /// Per-request timeout: the caller's remaining time, capped by
    /// `request_timeout_ms`.
    fn attempt_timeout(&self, remaining: Duration) -> Duration {
        remaining.min(Duration::from_millis(self.config.request_timeout_ms))
    }
}

impl Default for RestTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn has_readable_body(method: Method, status: StatusCode) -> bool {
    method != Method::Head && status != StatusCode::NO_CONTENT
}
