//! Prelude module for convenient imports.
//!
//! ```rust
//! use graphql_upload_link::prelude::*;
//! ```
//!
//! This provides access to:
//! - The link, its builder and executions
//! - Operations, variables and uploads
//! - Outcome and error types

pub use crate::{
    cancel::CancelHandle,
    config::{FetchOptions, LinkConfig, TlsConfig},
    error::{Error, ErrorKind, Result},
    link::{Execution, ExecutionState, Outcome, UploadLink},
    types::{GraphQLError, GraphQLResponse, InputValue, Operation, OperationContext, Upload},
};
