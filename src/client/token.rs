//! Bearer token suppliers.
//!
//! The client asks its supplier for a token once per call, and a second time
//! with `is_retry = true` only after a 401. Suppliers must be safe to call
//! concurrently; on a retry they should return a freshly issued token rather
//! than a cached one.

use crate::error::BoxError;
use async_trait::async_trait;
use std::future::Future;

/// Source of bearer tokens for [`AuthClient`](crate::AuthClient).
#[async_trait]
pub trait TokenSupplier: Send + Sync {
    /// Return a bearer token; `is_retry` asks for a fresh one.
    async fn token(&self, is_retry: bool) -> Result<String, BoxError>;
}

/// A fixed token. A retry gets the same token back.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wrap a token.
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

#[async_trait]
impl TokenSupplier for StaticToken {
    async fn token(&self, _is_retry: bool) -> Result<String, BoxError> {
        Ok(self.0.clone())
    }
}

/// Adapts an async closure into a [`TokenSupplier`].
///
/// # Examples
///
/// ```
/// use rest_auth_http::client::{FnTokenSupplier, TokenSupplier};
///
/// let supplier = FnTokenSupplier::new(|is_retry| async move {
///     Ok(if is_retry { "fresh".to_string() } else { "cached".to_string() })
/// });
///
/// let token = tokio_test::block_on(supplier.token(true)).unwrap();
/// assert_eq!(token, "fresh");
/// ```
pub struct FnTokenSupplier<F>(F);

impl<F, Fut> FnTokenSupplier<F>
where
    F: Fn(bool) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BoxError>> + Send,
{
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        FnTokenSupplier(f)
    }
}

#[async_trait]
impl<F, Fut> TokenSupplier for FnTokenSupplier<F>
where
    F: Fn(bool) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BoxError>> + Send,
{
    async fn token(&self, is_retry: bool) -> Result<String, BoxError> {
        (self.0)(is_retry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let supplier = StaticToken::new("abc");
        assert_eq!(supplier.token(false).await.unwrap(), "abc");
        assert_eq!(supplier.token(true).await.unwrap(), "abc");
        assert_eq!(format!("{:?}", supplier), "StaticToken(..)");
    }

    #[tokio::test]
    async fn test_fn_supplier_error() {
        let supplier = FnTokenSupplier::new(|_| async { Err::<String, BoxError>("offline".into()) });
        let err = supplier.token(false).await.unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }
}
