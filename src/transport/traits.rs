//! Transport trait definitions and common types.

use std::fmt;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

use crate::cancel::AbortSignal;
use crate::error::Result;
use crate::request::WireBody;

/// A fully prepared request, ready to be POSTed.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Endpoint to POST to.
    pub uri: Url,

    /// Headers to send. No `content-type` is present for multipart bodies;
    /// the transport sets it along with the boundary.
    pub headers: HeaderMap,

    /// The encoded body.
    pub body: WireBody,
}

/// A fully received HTTP response.
///
/// The body is buffered so the response can be attached to the operation
/// context and parsed afterwards.
#[derive(Clone, PartialEq)]
pub struct HttpResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// The network primitive the link sends requests through.
///
/// Implementations must stop work and return an error of kind
/// [`Cancelled`](crate::ErrorKind::Cancelled) once `signal` is aborted.
/// The link also stops polling the returned future at that point, so an
/// implementation that ignores the signal is still torn down.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Sends one request and buffers the whole response.
    async fn send(&self, request: HttpRequest, signal: AbortSignal) -> Result<HttpResponse>;
}
