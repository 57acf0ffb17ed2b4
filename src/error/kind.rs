//! Error kind enumeration for categorizing link errors.

/// Categorization of link errors.
///
/// Every failure an [`Execution`](crate::Execution) can surface maps to exactly
/// one kind. Nothing is retried by the link itself; the kind exists so a
/// higher layer can make that decision.
///
/// | ErrorKind         | Raised                               | Network call made |
/// |-------------------|--------------------------------------|-------------------|
/// | `Serialization`   | body cannot become JSON text         | No                |
/// | `Io`              | a file-backed upload cannot be read  | No                |
/// | `Configuration`   | invalid URI, header or TLS settings  | No                |
/// | `Cancelled`       | the caller aborted the request       | Aborted           |
/// | `Connection`      | DNS, TLS handshake, refused socket   | Yes               |
/// | `Timeout`         | client-side timeout elapsed          | Yes               |
/// | `Transport`       | any other network-level failure      | Yes               |
/// | `ServerError`     | non-2xx status (may carry a result)  | Yes               |
/// | `ServerParse`     | response body is not JSON            | Yes               |
/// | `InvalidResponse` | JSON without `data` or `errors`      | Yes               |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request was aborted by the caller.
    ///
    /// An [`Execution`](crate::Execution) never surfaces this as a failure; it
    /// resolves to [`Outcome::Cancelled`](crate::Outcome::Cancelled) instead.
    #[error("cancelled")]
    Cancelled,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// The HTTP client timeout elapsed.
    #[error("timeout")]
    Timeout,

    /// Network-level failure with no structured payload.
    #[error("transport error")]
    Transport,

    /// The server answered with a non-success status.
    ///
    /// The error may carry the parsed response body as a partial result.
    #[error("server error")]
    ServerError,

    /// The response body could not be parsed as JSON.
    #[error("server parse error")]
    ServerParse,

    /// The response was JSON but had neither `data` nor `errors`.
    #[error("invalid response")]
    InvalidResponse,

    /// The request body could not be turned into transmittable text.
    #[error("serialization error")]
    Serialization,

    /// A file-backed upload could not be read.
    #[error("i/o error")]
    Io,

    /// Configuration error (invalid URI, header, TLS material).
    #[error("configuration error")]
    Configuration,
}

impl ErrorKind {
    /// Returns `true` if the failure happened before anything was sent.
    #[inline]
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            ErrorKind::Serialization | ErrorKind::Io | ErrorKind::Configuration
        )
    }

    /// Returns `true` for failures raised by the network layer itself.
    #[inline]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ErrorKind::Connection | ErrorKind::Timeout | ErrorKind::Transport
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pre_flight() {
        assert!(ErrorKind::Serialization.is_pre_flight());
        assert!(ErrorKind::Io.is_pre_flight());
        assert!(ErrorKind::Configuration.is_pre_flight());

        assert!(!ErrorKind::Cancelled.is_pre_flight());
        assert!(!ErrorKind::Transport.is_pre_flight());
        assert!(!ErrorKind::ServerError.is_pre_flight());
    }

    #[test]
    fn test_is_network() {
        assert!(ErrorKind::Connection.is_network());
        assert!(ErrorKind::Timeout.is_network());
        assert!(ErrorKind::Transport.is_network());

        assert!(!ErrorKind::ServerError.is_network());
        assert!(!ErrorKind::ServerParse.is_network());
        assert!(!ErrorKind::Cancelled.is_network());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorKind::Cancelled), "cancelled");
        assert_eq!(format!("{}", ErrorKind::Connection), "connection error");
        assert_eq!(format!("{}", ErrorKind::Timeout), "timeout");
        assert_eq!(format!("{}", ErrorKind::Transport), "transport error");
        assert_eq!(format!("{}", ErrorKind::ServerError), "server error");
        assert_eq!(format!("{}", ErrorKind::ServerParse), "server parse error");
        assert_eq!(format!("{}", ErrorKind::InvalidResponse), "invalid response");
        assert_eq!(format!("{}", ErrorKind::Serialization), "serialization error");
        assert_eq!(format!("{}", ErrorKind::Io), "i/o error");
        assert_eq!(format!("{}", ErrorKind::Configuration), "configuration error");
    }

    #[test]
    fn test_error_kind_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorKind::Timeout);
        set.insert(ErrorKind::ServerError);
        set.insert(ErrorKind::Timeout);
        assert_eq!(set.len(), 2);
    }
}
