//! Authenticated client with single-retry-on-401 recovery.
//!
//! # Recovery Protocol
//!
//! ```text
//! START ── token(false) fails ───────────────────────────▶ supplier error
//!   │
//!   ▼
//! FIRST_ATTEMPT ── success / non-401 failure ────────────▶ final
//!   │ 401
//!   ▼
//! REFRESH ── token(true) fails ──────────────────────────▶ original 401
//!   │
//!   ▼
//! RETRY_ATTEMPT ── any result ───────────────────────────▶ final
//! ```
//!
//! The retry budget is one attempt. A second 401 is returned as-is.
//!
//! # Headers
//!
//! Every attempt carries `Authorization: Bearer <token>`. When the
//! [`CallContext`] has a correlation id it is forwarded as `X-Request-Id`;
//! otherwise the header is left out entirely.
//!
//! # Examples
//!
//! ```ignore
//! use rest_auth_http::{AuthClient, CallContext, PathParams, QueryParams, RestTransport, StaticToken};
//! use std::sync::Arc;
//!
//! let client = AuthClient::new(
//!     "https://api.example.com",
//!     RestTransport::new(),
//!     Arc::new(StaticToken::new("secret")),
//! );
//!
//! let mut params = PathParams::new();
//! params.insert("id".into(), "acme".into());
//! let org: Option<serde_json::Value> = client
//!     .get(&CallContext::new(), "/organizations/:id", &params, &QueryParams::new())
//!     .await?;
//! ```

use crate::client::request::RestRequest;
use crate::client::token::TokenSupplier;
use crate::client::transport::RestTransport;
use crate::error::{Error, Result};
use crate::protocol::bearer;
use crate::protocol::constants::{headers, media_types};
use crate::types::{CallContext, Method, PathParams, QueryParams};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// HTTP client that authenticates every request with a bearer token.
///
/// Cloning is cheap: clones share the transport and the token supplier, and
/// keep no per-call state, so one client can serve many concurrent calls.
#[derive(Clone)]
pub struct AuthClient {
    base_url: String,
    transport: RestTransport,
    tokens: Arc<dyn TokenSupplier>,
}

impl AuthClient {
    /// Create a client for `base_url` (a trailing `/` is dropped).
    pub fn new(
        base_url: &str,
        transport: RestTransport,
        tokens: Arc<dyn TokenSupplier>,
    ) -> Self {
        AuthClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            tokens,
        }
    }

    /// Base URL prefixed to every path
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying transport
    pub fn transport(&self) -> &RestTransport {
        &self.transport
    }

    /// Start a request for `path` (relative to the base URL) with
    /// `Accept: application/json`.
    pub fn request(&self, method: Method, path: &str) -> RestRequest {
        RestRequest::new(method, format!("{}{}", self.base_url, path)).with_accept(media_types::JSON)
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        path: &str,
        path_params: &PathParams,
        query: &QueryParams,
    ) -> Result<Option<T>> {
        let request = self.prepare(Method::Get, path, path_params, query);
        self.execute_json(ctx, &request).await
    }

    /// POST `input` as JSON to `path` and decode the JSON response.
    pub async fn post<B, T>(
        &self,
        ctx: &CallContext,
        path: &str,
        path_params: &PathParams,
        query: &QueryParams,
        input: &B,
    ) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .prepare(Method::Post, path, path_params, query)
            .with_content_type(media_types::JSON)
            .with_body(input);
        self.execute_json(ctx, &request).await
    }

    /// PUT `input` as JSON to `path` and decode the JSON response.
    pub async fn put<B, T>(
        &self,
        ctx: &CallContext,
        path: &str,
        path_params: &PathParams,
        query: &QueryParams,
        input: &B,
    ) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .prepare(Method::Put, path, path_params, query)
            .with_content_type(media_types::JSON)
            .with_body(input);
        self.execute_json(ctx, &request).await
    }

    /// DELETE `path` and decode the JSON response, if any.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        path: &str,
        path_params: &PathParams,
        query: &QueryParams,
    ) -> Result<Option<T>> {
        let request = self.prepare(Method::Delete, path, path_params, query);
        self.execute_json(ctx, &request).await
    }

    /// Send an authenticated request without reading the success body.
    pub async fn execute(&self, ctx: &CallContext, request: &RestRequest) -> Result<()> {
        let transport = &self.transport;
        self.with_bearer(ctx, request, move |authed| async move {
            transport.send(&authed, ctx).await
        })
        .await
    }

    /// Send an authenticated request and decode the JSON success body.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        request: &RestRequest,
    ) -> Result<Option<T>> {
        let transport = &self.transport;
        self.with_bearer(ctx, request, move |authed| async move {
            transport.send_json(&authed, ctx).await
        })
        .await
    }

    /// Send an authenticated request and return the raw success body.
    pub async fn execute_raw(&self, ctx: &CallContext, request: &RestRequest) -> Result<Bytes> {
        let transport = &self.transport;
        self.with_bearer(ctx, request, move |authed| async move {
            transport.send_raw(&authed, ctx).await
        })
        .await
    }

    fn prepare(
        &self,
        method: Method,
        path: &str,
        path_params: &PathParams,
        query: &QueryParams,
    ) -> RestRequest {
        self.request(method, path)
            .with_path_params(path_params.clone())
            .with_query(query.clone())
    }

    /// Run `send` with auth headers, retrying once after a 401.
    async fn with_bearer<R, F, Fut>(
        &self,
        ctx: &CallContext,
        request: &RestRequest,
        send: F,
    ) -> Result<R>
    where
        F: Fn(RestRequest) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let token = self.fetch_token(ctx, false).await?;
        let unauthorized = match send(authorize(request, ctx, &token)).await {
            Err(err) if err.is_unauthorized() => err,
            other => return other,
        };

        let logging = self.transport.config().enable_logging;
        if logging {
            tracing::warn!(uri = request.uri(), "received 401, refreshing token and retrying once");
        }

        let token = match self.fetch_token(ctx, true).await {
            Ok(token) => token,
            Err(refresh_err) => {
                if logging {
                    tracing::warn!(error = %refresh_err, "token refresh failed, returning original 401");
                }
                return Err(unauthorized);
            }
        };

        send(authorize(request, ctx, &token)).await
    }

    async fn fetch_token(&self, ctx: &CallContext, is_retry: bool) -> Result<String> {
        let pending = self.tokens.token(is_retry);
        let token = match ctx.deadline() {
            Some(deadline) => tokio::time::timeout_at(deadline, pending)
                .await
                .map_err(|_| Error::deadline_exceeded())?,
            None => pending.await,
        };
        token.map_err(Error::TokenSupplier)
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Copy of `request` carrying the bearer token and the correlation id.
fn authorize(request: &RestRequest, ctx: &CallContext, token: &str) -> RestRequest {
    let authed = request
        .clone()
        .with_header(headers::AUTHORIZATION.as_str(), bearer(token));
    match ctx.request_id() {
        Some(request_id) => authed.with_header(headers::REQUEST_ID.as_str(), request_id),
        None => authed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::token::StaticToken;

    fn client() -> AuthClient {
        AuthClient::new(
            "http://localhost:3000/",
            RestTransport::new(),
            Arc::new(StaticToken::new("t")),
        )
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let request = client().request(Method::Get, "/organizations");
        assert_eq!(request.uri(), "http://localhost:3000/organizations");
        assert_eq!(request.accept(), Some(media_types::JSON));
    }

    #[test]
    fn test_authorize_adds_bearer_and_request_id() {
        let request = RestRequest::get("http://h/x").with_header("X-Custom", "keep");
        let ctx = CallContext::new().with_request_id("req-1");
        let authed = authorize(&request, &ctx, "tok");

        let map = authed.header_map().unwrap();
        assert_eq!(map["authorization"], "Bearer tok");
        assert_eq!(map["x-request-id"], "req-1");
        assert_eq!(map["x-custom"], "keep");
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_authorize_without_request_id() {
        let authed = authorize(&RestRequest::get("http://h/x"), &CallContext::new(), "tok");
        let map = authed.header_map().unwrap();
        assert!(map.get("x-request-id").is_none());
    }

    #[tokio::test]
    async fn test_supplier_deadline() {
        use crate::client::token::FnTokenSupplier;
        use std::time::Duration;

        let slow = FnTokenSupplier::new(|_| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("late".to_string())
        });
        let client = AuthClient::new("http://127.0.0.1:9", RestTransport::new(), Arc::new(slow));
        let ctx = CallContext::new().with_timeout(Duration::from_millis(20));

        let err = client.fetch_token(&ctx, false).await.unwrap_err();
        assert!(matches!(&err, Error::Transport(msg) if msg.contains("deadline exceeded")));
    }
}
