//! Single-shot execution of one operation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FusedFuture};
use tracing::{Instrument, debug, debug_span, warn};

use super::LinkInner;
use crate::Error;
use crate::cancel::{AbortSignal, CancelHandle};
use crate::types::{GraphQLResponse, Operation};

/// The single terminal result of an [`Execution`].
#[derive(Debug)]
pub enum Outcome {
    /// The response was parsed successfully.
    Completed(GraphQLResponse),

    /// The request failed, but the failure carried usable data.
    ///
    /// `response` holds both `data` and `errors`; `error` is the failure it
    /// came with (typically a non-2xx status).
    PartialFailure {
        /// The partial result.
        response: GraphQLResponse,
        /// The failure that carried it.
        error: Error,
    },

    /// The request failed.
    Failed(Error),

    /// The caller cancelled before a response was parsed.
    Cancelled,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    /// Returns `true` for [`Outcome::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// Returns the response, complete or partial.
    pub fn response(&self) -> Option<&GraphQLResponse> {
        match self {
            Outcome::Completed(response) | Outcome::PartialFailure { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Returns the failure, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::PartialFailure { error, .. } | Outcome::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Converts into a `Result`.
    ///
    /// A partial failure becomes its error, which still exposes the partial
    /// data through [`Error::partial_result`]. Cancellation becomes an error
    /// of kind [`Cancelled`](crate::ErrorKind::Cancelled).
    pub fn into_result(self) -> crate::Result<GraphQLResponse> {
        match self {
            Outcome::Completed(response) => Ok(response),
            Outcome::PartialFailure { error, .. } | Outcome::Failed(error) => Err(error),
            Outcome::Cancelled => Err(Error::cancelled()),
        }
    }
}

/// Lifecycle of an [`Execution`].
///
/// `Idle → InFlight → {Completed | Failed | Cancelled}`. A partial failure
/// ends in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionState {
    /// Created but never polled. No request has been sent.
    Idle,
    /// The request is being prepared or is on the wire.
    InFlight,
    /// Resolved to [`Outcome::Completed`].
    Completed,
    /// Resolved to [`Outcome::Failed`] or [`Outcome::PartialFailure`].
    Failed,
    /// Resolved to [`Outcome::Cancelled`].
    Cancelled,
}

impl ExecutionState {
    /// Returns `true` once an outcome has been produced.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ExecutionState::Completed | ExecutionState::Failed | ExecutionState::Cancelled
        )
    }

    fn of(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Completed(_) => ExecutionState::Completed,
            Outcome::PartialFailure { .. } | Outcome::Failed(_) => ExecutionState::Failed,
            Outcome::Cancelled => ExecutionState::Cancelled,
        }
    }
}

// Aborts the transport's signal once, on the terminal state or on drop.
struct Teardown {
    signal: Option<AbortSignal>,
}

impl Teardown {
    fn fire(&mut self) {
        if let Some(signal) = self.signal.take() {
            signal.abort();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.fire();
    }
}

/// A lazy, cancellable request for one operation.
///
/// Nothing happens until the execution is first polled (awaited or spawned);
/// that poll starts the HTTP call. It resolves to exactly one [`Outcome`].
///
/// Dropping an in-flight execution aborts its HTTP call.
///
/// ## Example
///
/// ```rust,no_run
/// use graphql_upload_link::{Operation, Outcome, UploadLink};
///
/// # async fn run(link: UploadLink) {
/// let execution = link.execute(Operation::new("{ me { id } }"));
/// let handle = execution.cancel_handle();
///
/// let task = tokio::spawn(execution);
/// handle.cancel();
///
/// assert!(matches!(task.await.unwrap(), Outcome::Cancelled | Outcome::Completed(_)));
/// # }
/// ```
#[must_use = "executions do nothing unless polled"]
pub struct Execution {
    link: Arc<LinkInner>,
    operation: Option<Operation>,
    handle: CancelHandle,
    state: ExecutionState,
    future: Option<BoxFuture<'static, Outcome>>,
    teardown: Teardown,
}

impl Execution {
    pub(crate) fn new(link: Arc<LinkInner>, operation: Operation) -> Self {
        Self {
            link,
            operation: Some(operation),
            handle: CancelHandle::new(),
            state: ExecutionState::Idle,
            future: None,
            teardown: Teardown { signal: None },
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Requests cancellation.
    ///
    /// Before the first poll this prevents the request from being sent. While
    /// in flight it aborts the HTTP call. After the outcome is produced it has
    /// no effect. The state changes on the next poll.
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Returns a handle that can cancel this execution from elsewhere.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    fn finish(&mut self, outcome: Outcome) -> Poll<Outcome> {
        self.state = ExecutionState::of(&outcome);
        self.future = None;
        self.teardown.fire();
        Poll::Ready(outcome)
    }
}

impl fmt::Debug for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Execution")
            .field("state", &self.state)
            .field("cancelled", &self.handle.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Future for Execution {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Outcome> {
        let this = &mut *self;

        if this.state.is_terminal() {
            return Poll::Pending;
        }

        if this.state == ExecutionState::Idle {
            let Some(operation) = this.operation.take() else {
                return Poll::Pending;
            };
            if this.handle.is_cancelled() {
                debug!(operation = ?operation.name(), "cancelled before start");
                return this.finish(Outcome::Cancelled);
            }

            let signal = this.handle.signal();
            this.teardown.signal = Some(signal.clone());

            let span = debug_span!("graphql_request", operation = ?operation.name());
            let link = Arc::clone(&this.link);
            this.future = Some(Box::pin(run(link, operation, signal).instrument(span)));
            this.state = ExecutionState::InFlight;
        }

        let Some(future) = this.future.as_mut() else {
            return Poll::Pending;
        };
        match future.as_mut().poll(cx) {
            Poll::Ready(outcome) => this.finish(outcome),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl FusedFuture for Execution {
    fn is_terminated(&self) -> bool {
        self.state.is_terminal()
    }
}

async fn run(link: Arc<LinkInner>, operation: Operation, signal: AbortSignal) -> Outcome {
    let request = match link.prepare(&operation) {
        Ok(request) => request,
        Err(error) => {
            warn!(kind = %error.kind(), "request could not be prepared: {}", error);
            return Outcome::Failed(error);
        }
    };

    debug!(
        uri = %request.uri,
        multipart = request.body.is_multipart(),
        file_count = request.body.file_count(),
        "sending request"
    );

    let sent = tokio::select! {
        biased;
        _ = signal.aborted() => {
            debug!("cancelled while in flight");
            return Outcome::Cancelled;
        }
        sent = link.transport.send(request, signal.clone()) => sent,
    };

    let response = match sent {
        Ok(response) => response,
        Err(error) => return classify(error, &signal),
    };
    debug!(status = response.status(), "response received");

    // Published before parsing so a consumer that sees the outcome also sees
    // the response it came from.
    operation.context().set_response(response.clone());

    match link.parser.parse(&response, &operation) {
        Ok(result) => Outcome::Completed(result),
        Err(error) => classify(error, &signal),
    }
}

fn classify(error: Error, signal: &AbortSignal) -> Outcome {
    if error.is_cancelled() || signal.is_aborted() {
        debug!("request aborted");
        return Outcome::Cancelled;
    }

    match error.partial_result().cloned() {
        Some(response) => {
            warn!(kind = %error.kind(), status = ?error.status(), "partial failure: {}", error);
            Outcome::PartialFailure { response, error }
        }
        None => {
            warn!(kind = %error.kind(), status = ?error.status(), "request failed: {}", error);
            Outcome::Failed(error)
        }
    }
}
