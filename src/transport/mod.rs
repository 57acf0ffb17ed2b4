//! Transport layer.
//!
//! The link talks to the network only through [`HttpTransport`]:
//!
//! - [`ReqwestTransport`]: the default, backed by reqwest
//! - [`MockTransport`](crate::testing::MockTransport): scripted, for tests
//!
//! Any other implementation can be injected with
//! [`UploadLinkBuilder::transport`](crate::UploadLinkBuilder::transport).

mod http;
mod traits;

pub use http::{ReqwestTransport, ReqwestTransportBuilder};
pub use traits::{HttpRequest, HttpResponse, HttpTransport};
