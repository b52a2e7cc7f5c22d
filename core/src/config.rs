//! Client configuration.
//!
//! A `ClientConfig` is a value: every `with_*` method consumes it and returns
//! the modified copy. `GatewayClient` shares one behind an `Arc` and only ever
//! replaces it wholesale, so concurrent calls never observe a half-applied
//! change.

use std::time::Duration;

use ::http::{HeaderName, HeaderValue};
use url::Url;

use crate::error::ApiError;
use crate::http::find_header;

/// Configuration shared by every call made through a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_url: Url,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    raise_on_unexpected_status: bool,
    user_agent: String,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8030/v1";
    pub const BASE_URL_ENV: &'static str = "MAWI_BASE_URL";
    pub const TOKEN_ENV: &'static str = "MAWI_API_TOKEN";
    pub const DEFAULT_USER_AGENT: &'static str = concat!("mawi-client-rust/", env!("CARGO_PKG_VERSION"));

    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Configuration(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Configuration(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self {
            base_url,
            headers: Vec::new(),
            timeout: None,
            raise_on_unexpected_status: false,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Read `MAWI_BASE_URL` (falling back to the default) and, when set,
    /// `MAWI_API_TOKEN` as a bearer token.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url =
            std::env::var(Self::BASE_URL_ENV).unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let config = Self::new(&base_url)?;
        match std::env::var(Self::TOKEN_ENV) {
            Ok(token) if !token.is_empty() => config.with_bearer_token(&token),
            _ => Ok(config),
        }
    }

    /// Set a header sent with every request, replacing any header of the same
    /// name. Names and values that cannot go on the wire are rejected here
    /// rather than when a request is sent.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Result<Self, ApiError> {
        let name = name.into();
        let value = value.into();
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::Configuration(format!("invalid header name '{name}': {e}")))?;
        HeaderValue::from_str(&value)
            .map_err(|e| ApiError::Configuration(format!("invalid value for header '{name}': {e}")))?;
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value));
        Ok(self)
    }

    pub fn with_headers<I, K, V>(self, headers: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .try_fold(self, |config, (name, value)| config.with_header(name, value))
    }

    /// Shorthand for `Authorization: Bearer <token>`.
    pub fn with_bearer_token(self, token: &str) -> Result<Self, ApiError> {
        self.with_header("Authorization", format!("Bearer {token}"))
    }

    /// Request timeout applied by the bundled transports.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Raise `ApiError::UnexpectedStatus` for undocumented status codes
    /// instead of returning an envelope without a parsed payload.
    pub fn with_raise_on_unexpected_status(mut self, raise: bool) -> Self {
        self.raise_on_unexpected_status = raise;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn raise_on_unexpected_status(&self) -> bool {
        self.raise_on_unexpected_status
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new(ClientConfig::DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8030/v1");
        assert!(config.headers().is_empty());
        assert!(!config.raise_on_unexpected_status());
        assert_eq!(config.timeout(), None);
        assert!(config.user_agent().starts_with("mawi-client-rust/"));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ApiError::Configuration(_))
        ));
        assert!(matches!(
            ClientConfig::new("mailto:ops@example.com"),
            Err(ApiError::Configuration(_))
        ));
    }

    #[test]
    fn with_header_replaces_same_name() {
        let config = ClientConfig::new("http://gw")
            .unwrap()
            .with_header("X-Tenant", "a")
            .unwrap()
            .with_headers([("x-tenant", "b"), ("X-Other", "c")])
            .unwrap();
        assert_eq!(config.headers().len(), 2);
        assert_eq!(config.header("X-TENANT"), Some("b"));
    }

    #[test]
    fn derived_config_leaves_original_untouched() {
        let base = ClientConfig::new("http://gw").unwrap();
        let derived = base.clone().with_bearer_token("secret").unwrap();
        assert_eq!(derived.header("authorization"), Some("Bearer secret"));
        assert_eq!(base.header("authorization"), None);
    }

    #[test]
    fn rejects_headers_that_cannot_be_sent() {
        let base = ClientConfig::new("http://gw").unwrap();
        match base.clone().with_header("X Tenant", "a") {
            Err(ApiError::Configuration(message)) => assert!(message.contains("X Tenant"), "{message}"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            base.clone().with_bearer_token("abc\r\nX-Injected: 1"),
            Err(ApiError::Configuration(_))
        ));
        assert!(matches!(
            base.clone().with_headers([("X-Ok", "1"), ("", "2")]),
            Err(ApiError::Configuration(_))
        ));
        assert_eq!(base.header("x-ok"), None);
    }
}
