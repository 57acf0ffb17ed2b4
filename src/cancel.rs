//! Cancellation handles.
//!
//! A [`CancelHandle`] is held by the caller; an [`AbortSignal`] is what the
//! HTTP transport observes. Each execution owns one handle, and the signal it
//! passes to the transport is derived from it, so cancelling the handle aborts
//! the network call while aborting the signal (at teardown) leaves the
//! caller's handle untouched.

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Creates a new cancel handle.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Cooperative: a request whose response was already
    /// received and parsed is not affected.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Derives a signal that aborts when this handle is cancelled.
    ///
    /// The signal can also be aborted on its own without cancelling the handle.
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            token: self.token.child_token(),
        }
    }
}

/// The abort side observed by an [`HttpTransport`](crate::HttpTransport).
#[derive(Clone, Debug)]
pub struct AbortSignal {
    token: CancellationToken,
}

impl AbortSignal {
    /// Returns `true` once the request should be abandoned.
    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when the request should be abandoned.
    pub fn aborted(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    pub(crate) fn abort(&self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cancel_propagates_to_signal() {
        let handle = CancelHandle::new();
        let signal = handle.signal();
        assert!(!signal.is_aborted());

        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(signal.is_aborted());
    }

    #[test]
    fn test_abort_does_not_cancel_handle() {
        let handle = CancelHandle::new();
        let signal = handle.signal();

        signal.abort();
        assert!(signal.is_aborted());
        assert!(!handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_wakes_waiter() {
        let handle = CancelHandle::new();
        let signal = handle.signal();

        let waiter = tokio::spawn(async move { signal.aborted().await });
        tokio::task::yield_now().await;
        handle.cancel();

        tokio::time::timeout(Duration::from_millis(200), waiter)
            .await
            .expect("cancel should wake the waiting task")
            .expect("task ok");
    }
}
