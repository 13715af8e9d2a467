//! Client configuration.

use serde::Deserialize;

/// Settings used to build the shared `reqwest::Client`.
///
/// Loading these values from files or the environment is up to the caller;
/// the type derives `Deserialize` for that purpose.
///
/// # Examples
///
/// ```
/// use rest_auth_http::ClientConfig;
///
/// let config = ClientConfig {
///     request_timeout_ms: 5_000,
///     enable_logging: true,
///     ..Default::default()
/// };
/// assert_eq!(config.proxy_url, "");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Upper bound for a whole request, in milliseconds
    pub request_timeout_ms: u64,
    /// `User-Agent` sent with every request
    pub user_agent: String,
    /// Proxy for all traffic; empty means none
    pub proxy_url: String,
    /// Emit `tracing` events for requests, responses and 401 recovery
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: 30_000,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            proxy_url: String::new(),
            enable_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_ms, 30_000);
        assert!(config.user_agent.starts_with("rest_auth_http/"));
        assert!(!config.enable_logging);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"enable_logging": true, "request_timeout_ms": 250}"#).unwrap();
        assert!(config.enable_logging);
        assert_eq!(config.request_timeout_ms, 250);
        assert!(config.proxy_url.is_empty());
    }
}
