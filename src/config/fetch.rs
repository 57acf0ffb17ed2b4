//! Per-call overrides and option resolution.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::LinkConfig;

/// Per-call overrides, placed on the operation context.
///
/// Every field is optional; anything left unset falls back to the
/// [`LinkConfig`]. Headers are merged, with these values winning.
///
/// ## Example
///
/// ```rust
/// use graphql_upload_link::{FetchOptions, Operation};
///
/// let operation = Operation::new("{ me { id } }");
/// operation
///     .context()
///     .set_fetch_options(FetchOptions::new().with_header("authorization", "Bearer t0k3n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Endpoint override.
    pub uri: Option<Url>,

    /// Headers merged over the link headers.
    pub headers: HeaderMap,

    /// Override for sending extensions.
    pub include_extensions: Option<bool>,
}

impl FetchOptions {
    /// Creates empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends this call to a different endpoint.
    #[must_use]
    pub fn with_uri(mut self, uri: Url) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Adds a header value. Repeating a name keeps every value; invalid
    /// names or values are ignored.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Overrides whether extensions are sent.
    #[must_use]
    pub fn with_include_extensions(mut self, include: bool) -> Self {
        self.include_extensions = Some(include);
        self
    }
}

/// Options that shape a single HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpOptions {
    /// Headers to send.
    pub headers: HeaderMap,

    /// Whether extensions belong in the body.
    pub include_extensions: bool,
}

/// The endpoint and options chosen for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    /// Endpoint to POST to.
    pub uri: Url,

    /// Resolved options.
    pub options: HttpOptions,
}

/// Merges per-call overrides over the link configuration.
///
/// Pure: neither input is modified.
pub fn resolve_options(config: &LinkConfig, overrides: Option<&FetchOptions>) -> ResolvedRequest {
    let mut headers = config.headers.clone();
    let mut uri = config.uri.clone();
    let mut include_extensions = config.include_extensions;

    if let Some(overrides) = overrides {
        for name in overrides.headers.keys() {
            headers.remove(name);
            for value in overrides.headers.get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }
        if let Some(ref override_uri) = overrides.uri {
            uri = override_uri.clone();
        }
        if let Some(include) = overrides.include_extensions {
            include_extensions = include;
        }
    }

    ResolvedRequest {
        uri,
        options: HttpOptions {
            headers,
            include_extensions,
        },
    }
}
