//! Testing utilities.
//!
//! - [`MockTransport`]: an [`HttpTransport`](crate::HttpTransport) that serves
//!   scripted replies and records requests and abort signals
//!
//! ## Quick Start
//!
//! ```rust
//! use graphql_upload_link::testing::MockTransport;
//! use graphql_upload_link::{Operation, Outcome, UploadLink};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), graphql_upload_link::Error> {
//! let transport = MockTransport::new().json(200, json!({ "data": { "me": { "id": 1 } } }));
//! let link = UploadLink::builder()
//!     .uri("http://localhost/graphql")
//!     .transport(transport.clone())
//!     .build()?;
//!
//! let outcome = link.execute(Operation::new("{ me { id } }")).await;
//! assert!(matches!(outcome, Outcome::Completed(_)));
//! assert_eq!(transport.request_count(), 1);
//! # Ok(())
//! # }
//! ```

mod mock_transport;

pub use mock_transport::MockTransport;
