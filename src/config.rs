//! client configuration
//!
//! build a [`ClientConfig`] with access token, api version, and optional
//! overrides. pass it to [`crate::Client::new`] to create a client.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// default graph api endpoint
pub const GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// supported graph api versions, oldest first
pub const GRAPH_VERSIONS: &[&str] = &["2.2", "2.3", "2.4", "2.5", "2.6", "2.7", "2.8"];

/// newest supported version, used when none is configured
pub const GRAPH_DEFAULT_VERSION: &str = "2.8";

/// default bound on pagination-following
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// configuration for the graph client
#[derive(Clone)]
pub struct ClientConfig {
    /// original base url input
    pub(crate) raw_base_url: String,

    /// base url of the graph api endpoint
    pub(crate) base_url: Url,

    /// whether the provided base url parsed successfully
    pub(crate) base_url_valid: bool,

    /// access token sent with every request
    pub(crate) access_token: String,

    /// default api version for requests that don't override it
    pub(crate) version: String,

    /// maximum number of pages a single read may follow (None = unbounded)
    pub(crate) page_limit: Option<usize>,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// whether to verify ssl certificates
    pub(crate) verify_ssl: bool,

    /// additional headers to send with every request
    pub(crate) extra_headers: HeaderMap,

    /// prebuilt http client (takes precedence over http_client_builder)
    pub(crate) http_client: Option<reqwest::Client>,

    /// callback to customize the http client builder before building
    pub(crate) http_client_builder:
        Option<Arc<dyn Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync>>,
}

impl ClientConfig {
    /// create a new client configuration
    ///
    /// # arguments
    ///
    /// * `access_token` - the token appended to every request
    ///
    /// # example
    ///
    /// ```
    /// use fbgraph::ClientConfig;
    ///
    /// let config = ClientConfig::new("your-token-here");
    /// ```
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            raw_base_url: GRAPH_BASE_URL.to_string(),
            base_url: Url::parse(GRAPH_BASE_URL).expect("default base url"),
            base_url_valid: true,
            access_token: access_token.into(),
            version: GRAPH_DEFAULT_VERSION.to_string(),
            page_limit: Some(DEFAULT_PAGE_LIMIT),
            timeout: Duration::from_secs(30),
            user_agent: format!("fbgraph/{} (Rust)", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            extra_headers: HeaderMap::new(),
            http_client: None,
            http_client_builder: None,
        }
    }

    /// set the default api version
    ///
    /// default: the newest supported version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// point the client at a different endpoint (with or without trailing slash)
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        let raw = base_url.as_ref();
        let normalized = raw.trim_end_matches('/');

        let (base_url, base_url_valid) = match Url::parse(normalized)
            .or_else(|_| Url::parse(&format!("https://{}", normalized)))
        {
            Ok(url) => (url, true),
            Err(_) => (Url::parse("https://invalid.invalid").unwrap(), false),
        };

        self.raw_base_url = raw.to_string();
        self.base_url = base_url;
        self.base_url_valid = base_url_valid;
        self
    }

    /// bound the number of pages a single read may follow.
    ///
    /// `None` removes the bound entirely.
    ///
    /// default: 100 pages
    pub fn with_page_limit(mut self, limit: Option<usize>) -> Self {
        self.page_limit = limit;
        self
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// disable ssl certificate verification (not recommended for production)
    ///
    /// default: enabled
    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// add a header to every request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// access extra headers configured on this client
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// inject a prebuilt http client.
    ///
    /// when set, this client is used as-is and takes precedence over
    /// `with_http_client_builder`. all transport configuration (timeouts,
    /// tls, ssl verification, user agent) comes from the prebuilt client;
    /// the corresponding `ClientConfig` fields are ignored.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// customize the http client builder before the client is created.
    ///
    /// the callback receives a builder that already has the extra headers,
    /// user agent, timeout, and ssl settings applied. use this to add proxy
    /// config, custom tls roots, or other transport settings without
    /// reimplementing the defaults.
    ///
    /// ignored if `with_http_client` is also set.
    pub fn with_http_client_builder<F>(mut self, f: F) -> Self
    where
        F: Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync + 'static,
    {
        self.http_client_builder = Some(Arc::new(f));
        self
    }

    /// validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.base_url_valid {
            return Err(Error::Config(format!(
                "invalid base url: {}",
                self.raw_base_url
            )));
        }

        if self.base_url.scheme() != "http" && self.base_url.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                self.base_url.scheme()
            )));
        }

        check_version(&self.version)?;

        if self.access_token.is_empty() {
            return Err(Error::Config("access token cannot be empty".to_string()));
        }

        Ok(())
    }

    /// build the url for a node under the given api version
    pub(crate) fn node_url(&self, version: &str, node: &str) -> Result<Url> {
        check_version(version)?;

        let base = self.base_url.as_str().trim_end_matches('/');
        let node = node.trim_matches('/');
        let url_str = if node.is_empty() {
            format!("{}/v{}", base, version)
        } else {
            format!("{}/v{}/{}", base, version, node)
        };
        Url::parse(&url_str).map_err(Error::from)
    }
}

/// reject versions outside the supported allow-list
fn check_version(version: &str) -> Result<()> {
    if GRAPH_VERSIONS.contains(&version) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "unsupported graph api version: {}",
            version
        )))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("page_limit", &self.page_limit)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("verify_ssl", &self.verify_ssl)
            .field("extra_headers", &self.extra_headers.len())
            .field("http_client", &self.http_client.is_some())
            .field("http_client_builder", &self.http_client_builder.is_some())
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = ClientConfig::new("test-token");
        assert_eq!(config.base_url.as_str().trim_end_matches('/'), GRAPH_BASE_URL);
        assert_eq!(config.access_token, "test-token");
        assert_eq!(config.version, GRAPH_DEFAULT_VERSION);
        assert_eq!(config.page_limit, Some(DEFAULT_PAGE_LIMIT));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_node_url() {
        let config = ClientConfig::new("token");
        let url = config.node_url("2.8", "me").unwrap();
        assert_eq!(url.as_str(), "https://graph.facebook.com/v2.8/me");
    }

    #[test]
    fn test_node_url_edge_path() {
        let config = ClientConfig::new("token");
        let url = config.node_url("2.8", "me/photos").unwrap();
        assert_eq!(url.as_str(), "https://graph.facebook.com/v2.8/me/photos");
    }

    #[test]
    fn test_node_url_root() {
        // the multi-node lookup goes through the bare versioned root
        let config = ClientConfig::new("token");
        let url = config.node_url("2.8", "/").unwrap();
        assert_eq!(url.as_str(), "https://graph.facebook.com/v2.8");
    }

    #[test]
    fn test_node_url_pinned_version() {
        let config = ClientConfig::new("token");
        let url = config.node_url("2.3", "me/groups").unwrap();
        assert_eq!(url.as_str(), "https://graph.facebook.com/v2.3/me/groups");
    }

    #[test]
    fn test_node_url_unsupported_version() {
        let config = ClientConfig::new("token");
        let err = config.node_url("9.9", "me").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validation() {
        let config = ClientConfig::new("token");
        assert!(config.validate().is_ok());

        let empty_token = ClientConfig::new("");
        assert!(empty_token.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut config = ClientConfig::new("token");
        config.base_url_valid = false;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validation_invalid_scheme() {
        let config = ClientConfig::new("token").with_base_url("ftp://example.com");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validation_unsupported_version() {
        let config = ClientConfig::new("token").with_version("1.0");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_base_url_override() {
        let config = ClientConfig::new("token").with_base_url("http://localhost:1234/");
        let url = config.node_url("2.8", "me").unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/v2.8/me");
    }

    #[test]
    fn test_builder_helpers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-test"),
            HeaderValue::from_static("value"),
        );

        let config = ClientConfig::new("token")
            .with_version("2.5")
            .with_page_limit(None)
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("fbgraph-test")
            .with_ssl_verification(false)
            .with_headers(headers.clone())
            .with_header(
                HeaderName::from_static("x-other"),
                HeaderValue::from_static("other"),
            );

        assert_eq!(config.version, "2.5");
        assert!(config.page_limit.is_none());
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "fbgraph-test");
        assert!(!config.verify_ssl);
        assert_eq!(config.extra_headers.get("x-test").unwrap(), "value");
        assert_eq!(config.extra_headers.get("x-other").unwrap(), "other");
        assert_eq!(config.extra_headers(), &config.extra_headers);
    }

    #[test]
    fn test_with_http_client() {
        let prebuilt = reqwest::Client::new();
        let config = ClientConfig::new("token").with_http_client(prebuilt);
        assert!(config.http_client.is_some());
        assert!(config.http_client_builder.is_none());
    }

    #[test]
    fn test_with_http_client_builder() {
        let config =
            ClientConfig::new("token").with_http_client_builder(|b| b.connection_verbose(true));
        assert!(config.http_client.is_none());
        assert!(config.http_client_builder.is_some());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("secret-token");
        let debug = format!("{config:?}");
        assert!(debug.contains("\"<redacted>\""));
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("http_client: false"));
    }
}
