//! Link builder with typestate pattern.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::UploadLink;
use crate::config::{LinkConfig, TlsConfig, default_headers};
use crate::error::Result;
use crate::parse::{DefaultResponseParser, ResponseParser};
use crate::request::{DefaultFileExtractor, FileExtractor};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Marker type: endpoint not yet provided.
pub struct NoUri;

/// Marker type: endpoint has been provided.
pub struct HasUri;

/// Builder for [`UploadLink`].
///
/// The endpoint is required and enforced at compile time; everything else
/// has a default.
///
/// ## Optional Configuration
///
/// - `header()` / `headers()`: request headers
/// - `include_extensions()`: send operation extensions
/// - `timeout()` / `tls_config()` / `insecure()`: default HTTP transport settings
/// - `transport()`: replace the HTTP transport entirely
/// - `file_extractor()` / `response_parser()`: replace the collaborators
///
/// ## Example
///
/// ```rust
/// use graphql_upload_link::UploadLink;
/// use std::time::Duration;
///
/// let link = UploadLink::builder()
///     .uri("https://api.example.com/graphql")
///     .header("x-tenant", "acme")
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(link.config().headers.get("x-tenant").unwrap(), "acme");
/// ```
pub struct UploadLinkBuilder<UriState> {
    uri: Option<String>,
    headers: HeaderMap,
    extra_headers: Vec<(String, String)>,
    include_extensions: bool,
    timeout: Option<Duration>,
    tls_config: TlsConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    extractor: Arc<dyn FileExtractor>,
    parser: Arc<dyn ResponseParser>,
    _uri_state: PhantomData<UriState>,
}

impl UploadLinkBuilder<NoUri> {
    /// Creates a new link builder.
    pub fn new() -> Self {
        Self {
            uri: None,
            headers: default_headers(),
            extra_headers: Vec::new(),
            include_extensions: false,
            timeout: None,
            tls_config: TlsConfig::default(),
            transport: None,
            extractor: Arc::new(DefaultFileExtractor),
            parser: Arc::new(DefaultResponseParser),
            _uri_state: PhantomData,
        }
    }

    /// Sets the GraphQL endpoint. Validated by [`build`](UploadLinkBuilder::build).
    pub fn uri(self, uri: impl Into<String>) -> UploadLinkBuilder<HasUri> {
        UploadLinkBuilder {
            uri: Some(uri.into()),
            headers: self.headers,
            extra_headers: self.extra_headers,
            include_extensions: self.include_extensions,
            timeout: self.timeout,
            tls_config: self.tls_config,
            transport: self.transport,
            extractor: self.extractor,
            parser: self.parser,
            _uri_state: PhantomData,
        }
    }
}

impl Default for UploadLinkBuilder<NoUri> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> UploadLinkBuilder<U> {
    /// Adds a header sent with every request. Validated by `build`.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the base headers, including the defaults.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sends operation extensions in the request body.
    #[must_use]
    pub fn include_extensions(mut self, include: bool) -> Self {
        self.include_extensions = include;
        self
    }

    /// Sets the whole-request timeout of the default transport.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets TLS options of the default transport.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Disables certificate verification. For local development only.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }

    /// Uses `transport` instead of the default reqwest transport.
    ///
    /// `timeout` and TLS settings then no longer apply.
    #[must_use]
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Uses a custom file extractor.
    #[must_use]
    pub fn file_extractor(mut self, extractor: impl FileExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Uses a custom response parser.
    #[must_use]
    pub fn response_parser(mut self, parser: impl ResponseParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }
}

impl UploadLinkBuilder<HasUri> {
    /// Builds the link.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if:
    /// - The URI is invalid
    /// - A header name or value is invalid
    /// - The default HTTP client cannot be built from the TLS settings
    pub fn build(self) -> Result<UploadLink> {
        let uri = Url::parse(self.uri.as_deref().unwrap_or_default())?;

        let mut headers = self.headers;
        for (name, value) in &self.extra_headers {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        let config = LinkConfig::builder()
            .uri(uri)
            .headers(headers)
            .include_extensions(self.include_extensions)
            .maybe_timeout(self.timeout)
            .tls(self.tls_config)
            .build();

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config.tls, config.timeout)?),
        };

        Ok(UploadLink::from_parts(
            config,
            transport,
            self.extractor,
            self.parser,
        ))
    }
}
