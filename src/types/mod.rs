//! Core types for the link.
//!
//! - [`Operation`]: the request descriptor handed to the link
//! - [`InputValue`] / [`Variables`]: variable bindings, including files
//! - [`Upload`] / [`ExtractedFile`]: file attachments and where they sat
//! - [`OperationContext`]: the shared per-operation store
//! - [`GraphQLResponse`]: a parsed result

mod context;
mod operation;
mod response;
mod upload;
mod value;

pub use context::OperationContext;
pub use operation::Operation;
pub use response::{GraphQLError, GraphQLLocation, GraphQLResponse, PathSegment};
pub use upload::{ExtractedFile, Upload};
pub use value::{InputValue, Variables};
