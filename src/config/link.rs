//! Link-level configuration, built once per link.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use super::TlsConfig;

/// Headers every request starts from unless the caller overrides them.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Configuration shared by every request sent through one link.
///
/// Per-call changes go through [`FetchOptions`](crate::FetchOptions) on the
/// operation context; this struct is never mutated after the link is built.
///
/// ## Default Values
///
/// - `headers`: `accept: */*`, `content-type: application/json`
/// - `include_extensions`: false
/// - `timeout`: none
///
/// ## Example
///
/// ```rust
/// use graphql_upload_link::LinkConfig;
/// use std::time::Duration;
///
/// let config = LinkConfig::builder()
///     .uri("https://api.example.com/graphql".parse().unwrap())
///     .include_extensions(true)
///     .timeout(Duration::from_secs(30))
///     .build();
///
/// assert!(config.include_extensions);
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct LinkConfig {
    /// Endpoint every request is POSTed to.
    pub uri: Url,

    /// Headers sent with every request.
    #[builder(default = default_headers())]
    pub headers: HeaderMap,

    /// Whether operation extensions are sent in the body.
    #[builder(default = false)]
    pub include_extensions: bool,

    /// Whole-request timeout applied by the default HTTP transport.
    pub timeout: Option<Duration>,

    /// TLS settings for the default HTTP transport.
    #[builder(default)]
    pub tls: TlsConfig,
}
