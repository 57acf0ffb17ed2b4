//! # graphql-upload-link
//!
//! An HTTP transport for GraphQL clients that sends operations as JSON, or as
//! multipart requests when variables hold files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphql_upload_link::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let link = UploadLink::builder()
//!         .uri("https://api.example.com/graphql")
//!         .build()?;
//!
//!     let operation = Operation::new(
//!         "mutation SetAvatar($file: Upload!) { setAvatar(file: $file) { url } }",
//!     )
//!     .operation_name("SetAvatar")
//!     .variable("file", Upload::from_path("avatar.png").with_content_type("image/png"));
//!
//!     let response = link.execute(operation).await.into_result()?;
//!     println!("{:?}", response.data);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Lazy execution**: [`UploadLink::execute`] returns an [`Execution`] that
//!   sends nothing until polled, and resolves to exactly one [`Outcome`]
//! - **Cancellation**: [`Execution::cancel`] or a [`CancelHandle`] aborts the
//!   HTTP call; the outcome is then [`Outcome::Cancelled`], never an error
//! - **Partial failure**: a failed response that still carries `data` resolves
//!   to [`Outcome::PartialFailure`] with both the data and the error
//! - **Query rewriting**: every query is rewritten before sending, with its
//!   variables inlined into the text (see [`request::rewrite_query`])
//! - **Multipart uploads**: files found in variables are sent as parts, per
//!   the GraphQL multipart request convention
//!
//! ## Features
//!
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod cancel;
pub mod config;
pub mod error;
pub mod link;
pub mod parse;
pub mod request;
pub mod types;

// Transport layer
pub mod transport;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

// User-Agent string for the default transport
mod user_agent;

// Re-export main types at crate root for convenience
pub use cancel::{AbortSignal, CancelHandle};
pub use error::{Error, ErrorKind, Result};
pub use link::{Execution, ExecutionState, Outcome, UploadLink, UploadLinkBuilder};
pub use parse::{DefaultResponseParser, ResponseParser};
pub use request::{DefaultFileExtractor, FileExtractor, WireBody};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    ExtractedFile, GraphQLError, GraphQLResponse, InputValue, Operation, OperationContext, Upload,
    Variables,
};

// Re-export config types
pub use config::{FetchOptions, LinkConfig, TlsConfig};
