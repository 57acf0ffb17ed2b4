//! Integration tests for graphql-upload-link.
//!
//! Each test starts a local wiremock server and drives the link through the
//! default reqwest transport.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With link logging
//! RUST_LOG=graphql_upload_link=debug cargo test --test integration -- --nocapture
//! ```

mod cancel_tests;
mod common;
mod json_tests;
mod multipart_tests;
