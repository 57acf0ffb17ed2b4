//! Configuration types for the link.
//!
//! - [`LinkConfig`]: built once per link
//! - [`FetchOptions`]: per-call overrides carried on the operation context
//! - [`resolve_options`]: merges the two into a [`ResolvedRequest`]
//! - [`TlsConfig`]: TLS settings for the default HTTP transport

mod fetch;
mod link;
mod tls;

pub use fetch::{FetchOptions, HttpOptions, ResolvedRequest, resolve_options};
pub use link::{LinkConfig, default_headers};
pub use tls::TlsConfig;
