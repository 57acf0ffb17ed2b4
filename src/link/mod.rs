//! The upload link: turns operations into executions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphql_upload_link::{Operation, Outcome, Upload, UploadLink};
//!
//! # async fn run() -> Result<(), graphql_upload_link::Error> {
//! let link = UploadLink::builder()
//!     .uri("https://api.example.com/graphql")
//!     .header("authorization", "Bearer t0k3n")
//!     .build()?;
//!
//! let operation = Operation::new(
//!     "mutation Upload($file: Upload!) { upload(file: $file) { id } }",
//! )
//! .variable("file", Upload::from_path("./report.pdf"));
//!
//! match link.execute(operation).await {
//!     Outcome::Completed(response) => println!("{:?}", response.data),
//!     Outcome::PartialFailure { response, error } => {
//!         eprintln!("{error}; partial data: {:?}", response.data)
//!     }
//!     Outcome::Failed(error) => eprintln!("{error}"),
//!     Outcome::Cancelled => {}
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod execution;

pub use builder::{HasUri, NoUri, UploadLinkBuilder};
pub use execution::{Execution, ExecutionState, Outcome};

use std::fmt;
use std::sync::Arc;

use crate::config::{HttpOptions, LinkConfig, ResolvedRequest, resolve_options};
use crate::error::Result;
use crate::parse::{DefaultResponseParser, ResponseParser};
use crate::request::{
    DefaultFileExtractor, Extraction, FileExtractor, RequestBody, encode_body, rewrite_query,
    serialize_payload,
};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::types::Operation;

pub(crate) struct LinkInner {
    config: LinkConfig,
    transport: Arc<dyn HttpTransport>,
    extractor: Arc<dyn FileExtractor>,
    parser: Arc<dyn ResponseParser>,
}

impl LinkInner {
    /// Builds the wire request for an operation.
    ///
    /// Files are pulled out of the body first; the file-free clone is then
    /// rewritten and serialized, and the encoding is chosen by whether any
    /// file was found.
    fn prepare(&self, operation: &Operation) -> Result<HttpRequest> {
        let overrides = operation.context().fetch_options();
        let ResolvedRequest { uri, options } = resolve_options(&self.config, overrides.as_ref());
        let HttpOptions {
            mut headers,
            include_extensions,
        } = options;

        let body = RequestBody::from_operation(operation, include_extensions);
        let Extraction { clone, files } = self.extractor.extract(&body);

        let rewritten = rewrite_query(&clone)?;
        let payload = serialize_payload(&rewritten)?;
        let body = encode_body(payload, files, &mut headers)?;

        Ok(HttpRequest { uri, headers, body })
    }
}

/// Sends GraphQL operations over HTTP, as JSON or as multipart uploads.
///
/// `UploadLink` is cheap to clone; clones share configuration and
/// collaborators. Each call to [`execute`](UploadLink::execute) owns its own
/// cancellation token.
#[derive(Clone)]
pub struct UploadLink {
    inner: Arc<LinkInner>,
}

impl UploadLink {
    /// Creates a new link builder.
    pub fn builder() -> UploadLinkBuilder<NoUri> {
        UploadLinkBuilder::new()
    }

    /// Creates a link from a configuration with the default collaborators.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the HTTP client cannot be built from the TLS settings.
    pub fn new(config: LinkConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.tls, config.timeout)?;
        Ok(Self::from_parts(
            config,
            Arc::new(transport),
            Arc::new(DefaultFileExtractor),
            Arc::new(DefaultResponseParser),
        ))
    }

    pub(crate) fn from_parts(
        config: LinkConfig,
        transport: Arc<dyn HttpTransport>,
        extractor: Arc<dyn FileExtractor>,
        parser: Arc<dyn ResponseParser>,
    ) -> Self {
        Self {
            inner: Arc::new(LinkInner {
                config,
                transport,
                extractor,
                parser,
            }),
        }
    }

    /// Returns the link configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.inner.config
    }

    /// Creates a lazy execution of `operation`.
    ///
    /// No request is sent until the returned [`Execution`] is polled.
    pub fn execute(&self, operation: Operation) -> Execution {
        Execution::new(Arc::clone(&self.inner), operation)
    }

    /// Builds the request `operation` would send, without sending it.
    ///
    /// # Errors
    ///
    /// Returns a [`Serialization`](crate::ErrorKind::Serialization) error if
    /// the body cannot be turned into JSON text.
    pub fn prepare(&self, operation: &Operation) -> Result<HttpRequest> {
        self.inner.prepare(operation)
    }
}

impl fmt::Debug for UploadLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadLink")
            .field("uri", &self.inner.config.uri.as_str())
            .field("transport", &self.inner.transport)
            .field("extractor", &self.inner.extractor)
            .field("parser", &self.inner.parser)
            .finish()
    }
}
