//! Response interpretation.

use std::fmt;

use serde_json::Value;

use crate::Error;
use crate::error::Result;
use crate::transport::HttpResponse;
use crate::types::{GraphQLResponse, Operation};

/// Turns a raw HTTP response into a GraphQL result.
///
/// A failure may carry the parsed body via [`Error::with_result`]; when that
/// body holds both `data` and `errors` the link reports a partial failure.
pub trait ResponseParser: Send + Sync + fmt::Debug {
    /// Parses `response`, which was received for `operation`.
    fn parse(&self, response: &HttpResponse, operation: &Operation) -> Result<GraphQLResponse>;
}

/// The standard GraphQL-over-HTTP interpretation.
///
/// - a body that is not JSON fails with `ServerParse`
/// - a status of 300 or above fails with `ServerError`, carrying the parsed
///   body when it has GraphQL shape
/// - a JSON body with neither `data` nor `errors` fails with `InvalidResponse`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResponseParser;

impl ResponseParser for DefaultResponseParser {
    fn parse(&self, response: &HttpResponse, operation: &Operation) -> Result<GraphQLResponse> {
        let status = response.status();

        let json: Value = serde_json::from_slice(response.body()).map_err(|e| {
            Error::server_parse(format!("Failed to parse response body: {}", e))
                .with_status(status)
                .with_source(e)
        })?;

        let has_shape = json
            .as_object()
            .is_some_and(|object| object.contains_key("data") || object.contains_key("errors"));

        if status >= 300 {
            let mut error = Error::server_error(
                status,
                format!("Response not successful: Received status code {}", status),
            );
            if has_shape && let Ok(result) = serde_json::from_value::<GraphQLResponse>(json) {
                error = error.with_result(result);
            }
            return Err(error);
        }

        if !has_shape {
            return Err(Error::invalid_response(format!(
                "Server response was missing for query '{}'",
                operation.name().unwrap_or_default()
            ))
            .with_status(status));
        }

        serde_json::from_value(json).map_err(|e| {
            Error::server_parse(format!("Response is not a GraphQL result: {}", e))
                .with_status(status)
                .with_source(e)
        })
    }
}
