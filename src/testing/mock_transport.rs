//! Scripted HTTP transport.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::Error;
use crate::cancel::AbortSignal;
use crate::error::Result;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// What the mock does with the next request.
enum Reply {
    Respond(HttpResponse),
    Fail(Error),
    Hang,
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Reply>,
    requests: Vec<HttpRequest>,
    signals: Vec<AbortSignal>,
}

/// An [`HttpTransport`] that serves scripted replies and records what it was
/// sent.
///
/// Replies are consumed in order, one per request. A request with no reply
/// left fails with a transport error. Clones share the same script and
/// recordings, so a test can keep one clone and hand another to the link.
///
/// ## Example
///
/// ```rust
/// use graphql_upload_link::testing::MockTransport;
/// use serde_json::json;
///
/// let transport = MockTransport::new()
///     .json(200, json!({ "data": { "ok": true } }))
///     .hang();
///
/// assert_eq!(transport.request_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and raw body.
    #[must_use]
    pub fn respond(self, status: u16, body: impl Into<bytes::Bytes>) -> Self {
        self.push(Reply::Respond(HttpResponse::new(status, HeaderMap::new(), body)))
    }

    /// Queues a JSON response.
    #[must_use]
    pub fn json(self, status: u16, body: Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let response = HttpResponse::new(status, headers, body.to_string());
        self.push(Reply::Respond(response))
    }

    /// Queues a failure.
    #[must_use]
    pub fn fail(self, error: Error) -> Self {
        self.push(Reply::Fail(error))
    }

    /// Queues a request that never answers; it resolves only once aborted.
    #[must_use]
    pub fn hang(self) -> Self {
        self.push(Reply::Hang)
    }

    fn push(self, reply: Reply) -> Self {
        self.state.lock().replies.push_back(reply);
        self
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Returns every request received, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Returns the abort signal passed with the most recent request.
    pub fn last_signal(&self) -> Option<AbortSignal> {
        self.state.lock().signals.last().cloned()
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockTransport")
            .field("pending_replies", &state.replies.len())
            .field("requests", &state.requests.len())
            .finish()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest, signal: AbortSignal) -> Result<HttpResponse> {
        let reply = {
            let mut state = self.state.lock();
            state.requests.push(request);
            state.signals.push(signal.clone());
            state.replies.pop_front()
        };

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(error)) => Err(error),
            Some(Reply::Hang) => {
                signal.aborted().await;
                Err(Error::cancelled())
            }
            None => Err(Error::transport("MockTransport has no scripted reply")),
        }
    }
}
