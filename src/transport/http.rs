//! HTTP transport implementation using reqwest.
//!
//! JSON bodies are sent as text; multipart bodies become a
//! `reqwest::multipart::Form` whose fields keep the wire order
//! `operations`, `map`, then the indexed file parts.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{debug, trace};

use crate::Error;
use crate::cancel::AbortSignal;
use crate::config::TlsConfig;
use crate::error::{ErrorKind, Result};
use crate::request::{MultipartBody, WireBody};
use crate::transport::traits::{HttpRequest, HttpResponse, HttpTransport};
use crate::user_agent;

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Default transport: POSTs requests with reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Creates a new transport builder.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }

    /// Wraps an existing reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Creates a new transport with the given configuration.
    pub fn new(tls_config: &TlsConfig, timeout: Option<Duration>) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent::user_agent());

        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client_builder = tls_config.configure(client_builder)?;

        let client = client_builder.build().map_err(|e| {
            Error::new(
                ErrorKind::Configuration,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self { client })
    }

    /// Sends the request and buffers the response body.
    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse> {
        let builder = self.client.post(request.uri).headers(request.headers);

        let builder = match request.body {
            WireBody::Json(text) => builder.body(text),
            WireBody::Multipart(body) => builder.multipart(build_form(&body).await?),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        trace!(status, "response headers received");

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(HttpResponse::new(status, headers, body))
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest, signal: AbortSignal) -> Result<HttpResponse> {
        tokio::select! {
            biased;
            _ = signal.aborted() => {
                debug!("request aborted before the response completed");
                Err(Error::cancelled())
            }
            result = self.exchange(request) => result,
        }
    }
}

/// Builds the multipart form, reading file-backed uploads from disk.
async fn build_form(body: &MultipartBody) -> Result<Form> {
    let mut form = Form::new()
        .text("operations", body.operations().to_owned())
        .text("map", body.map().to_owned());

    for part in body.parts() {
        let content = part.file.read().await?;
        let mut file_part = Part::bytes(content.to_vec());
        if let Some(name) = part.file.file_name() {
            file_part = file_part.file_name(name.to_owned());
        }
        if let Some(content_type) = part.file.content_type() {
            file_part = file_part.mime_str(content_type).map_err(|e| {
                Error::configuration(format!("Invalid content type {:?}: {}", content_type, e))
            })?;
        }
        form = form.part(part.field_name(), file_part);
    }

    Ok(form)
}

// ============================================================================
// Reqwest Transport Builder
// ============================================================================

/// Builder for [`ReqwestTransport`].
pub struct ReqwestTransportBuilder {
    tls_config: TlsConfig,
    timeout: Option<Duration>,
}

impl ReqwestTransportBuilder {
    fn new() -> Self {
        Self {
            tls_config: TlsConfig::default(),
            timeout: None,
        }
    }

    /// Sets the TLS configuration.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the transport.
    pub fn build(self) -> Result<ReqwestTransport> {
        ReqwestTransport::new(&self.tls_config, self.timeout)
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps reqwest errors to link errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("Request timed out: {}", e)).with_source(e)
    } else if e.is_connect() {
        Error::connection(format!("Connection failed: {}", e)).with_source(e)
    } else if e.is_builder() {
        Error::configuration(format!("Invalid request: {}", e)).with_source(e)
    } else {
        Error::transport(format!("HTTP error: {}", e)).with_source(e)
    }
}

// ============================================================================
// Tests
// ============================================================================
