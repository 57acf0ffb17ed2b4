//! Main error type for the link.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;
use crate::types::GraphQLResponse;

/// The primary error type for link operations.
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── status: Option           (HTTP status, when a response arrived)
/// ├── result: Option           (parsed body carried by a server error)
/// └── source: Option           (underlying cause)
/// ```
///
/// A server error may carry a parsed GraphQL body. When that body holds both
/// `data` and `errors` it is a *partial result*; see
/// [`partial_result()`](Error::partial_result).
///
/// ## Example
///
/// ```rust
/// use graphql_upload_link::{Error, ErrorKind};
///
/// fn describe(err: &Error) -> String {
///     match err.kind() {
///         ErrorKind::ServerError => format!("HTTP {:?}", err.status()),
///         kind if kind.is_network() => "network trouble".to_string(),
///         _ => err.to_string(),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// HTTP status of the response that produced this error.
    status: Option<u16>,

    /// Parsed response body attached to a server error.
    result: Option<Box<GraphQLResponse>>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// ```rust
    /// use graphql_upload_link::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Configuration, "uri is required");
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            result: None,
            source: None,
        }
    }

    /// Creates an error from a kind with a default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Cancelled => "request cancelled",
            ErrorKind::Connection => "connection failed",
            ErrorKind::Timeout => "request timed out",
            ErrorKind::Transport => "network request failed",
            ErrorKind::ServerError => "response not successful",
            ErrorKind::ServerParse => "response body is not valid JSON",
            ErrorKind::InvalidResponse => "response has neither data nor errors",
            ErrorKind::Serialization => "request body could not be serialized",
            ErrorKind::Io => "file could not be read",
            ErrorKind::Configuration => "configuration error",
        };
        Self::new(kind, message)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status of the response that produced this error.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the parsed response body attached to this error, if any.
    #[inline]
    pub fn result(&self) -> Option<&GraphQLResponse> {
        self.result.as_deref()
    }

    /// Returns the attached body only when it is a partial result: non-null
    /// `data` alongside at least one error.
    pub fn partial_result(&self) -> Option<&GraphQLResponse> {
        self.result().filter(|result| result.is_partial())
    }

    /// Returns `true` if this error represents a caller-initiated abort.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }

    /// Sets the HTTP status for this error.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches a parsed response body to this error.
    #[must_use]
    pub fn with_result(mut self, result: GraphQLResponse) -> Self {
        self.result = Some(Box::new(result));
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for common error types

    /// Creates a cancelled error.
    pub fn cancelled() -> Self {
        Self::from_kind(ErrorKind::Cancelled)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates a server error for the given HTTP status.
    pub fn server_error(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServerError, message).with_status(status)
    }

    /// Creates a server parse error.
    pub fn server_parse(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServerParse, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Io, err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URI: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Error::configuration(format!("invalid header value: {}", err)).with_source(err)
    }
}

impl From<reqwest::header::InvalidHeaderName> for Error {
    fn from(err: reqwest::header::InvalidHeaderName) -> Self {
        Error::configuration(format!("invalid header name: {}", err)).with_source(err)
    }
}
