//! Error types for the link.
//!
//! - [`Error`]: every failure the link can surface
//! - [`ErrorKind`]: the category used for matching
//!
//! ## Partial results
//!
//! A server error may carry a GraphQL body holding both `data` and `errors`.
//! The executor reports that case as
//! [`Outcome::PartialFailure`](crate::Outcome::PartialFailure) so the caller
//! sees the partial data and the failure together.

mod core;
mod kind;

pub use self::core::Error;
pub use self::kind::ErrorKind;

/// A specialized `Result` type for link operations.
pub type Result<T> = std::result::Result<T, Error>;
