//! Shared per-operation context.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::config::FetchOptions;
use crate::transport::HttpResponse;

#[derive(Default)]
struct ContextState {
    values: HashMap<String, Value>,
    fetch_options: Option<FetchOptions>,
    response: Option<HttpResponse>,
}

/// Out-of-band store shared between the caller and the link.
///
/// Cloning a context (or the [`Operation`](crate::Operation) that owns it)
/// yields a handle to the same store. The caller uses it to pass per-call
/// [`FetchOptions`]; the link uses it to publish the raw [`HttpResponse`]
/// before the parsed result is delivered.
///
/// # Example
///
/// ```rust
/// use graphql_upload_link::{FetchOptions, OperationContext};
///
/// let context = OperationContext::new();
/// context.insert("trace_id", "abc123");
/// context.set_fetch_options(FetchOptions::new().with_header("x-tenant", "acme"));
///
/// let shared = context.clone();
/// assert_eq!(shared.get("trace_id"), Some(serde_json::json!("abc123")));
/// assert!(shared.fetch_options().is_some());
/// ```
#[derive(Clone, Default)]
pub struct OperationContext {
    state: Arc<RwLock<ContextState>>,
}

impl OperationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key-value pair.
    ///
    /// Returns the previous value if the key was present.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.state.write().values.insert(key.into(), value.into())
    }

    /// Gets a copy of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.state.read().values.get(key).cloned()
    }

    /// Removes a value by key.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.state.write().values.remove(key)
    }

    /// Returns `true` if the context contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.read().values.contains_key(key)
    }

    /// Sets per-call overrides merged over the link configuration.
    pub fn set_fetch_options(&self, options: FetchOptions) {
        self.state.write().fetch_options = Some(options);
    }

    /// Returns the per-call overrides, if any.
    pub fn fetch_options(&self) -> Option<FetchOptions> {
        self.state.read().fetch_options.clone()
    }

    /// Returns the raw response attached by the link, if one arrived.
    pub fn response(&self) -> Option<HttpResponse> {
        self.state.read().response.clone()
    }

    pub(crate) fn set_response(&self, response: HttpResponse) {
        self.state.write().response = Some(response);
    }
}

impl fmt::Debug for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("OperationContext")
            .field("keys", &state.values.keys().collect::<Vec<_>>())
            .field("has_fetch_options", &state.fetch_options.is_some())
            .field("response_status", &state.response.as_ref().map(HttpResponse::status))
            .finish()
    }
}
