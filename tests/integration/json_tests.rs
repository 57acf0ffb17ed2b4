//! JSON request tests.

use graphql_upload_link::{ErrorKind, FetchOptions, Operation, Outcome};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{link, start_server};

/// The wire body is the rewritten query with variables inlined
#[tokio::test]
async fn test_rewritten_query_on_the_wire() {
    let server = start_server().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "*/*"))
        .and(header_regex("user-agent", r"^graphql-upload-link/\d+\.\d+\.\d+ "))
        .and(body_json(json!({
            "query": " query {   user(id: 5) { name } } ",
            "variables": null
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "req-1")
                .set_body_json(json!({ "data": { "user": { "name": "Ada" } } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let operation = Operation::new("query User($id: ID!) {\n  user(id: $id) { name }\n}")
        .operation_name("User")
        .variable("id", 5);
    let context = operation.context().clone();

    let outcome = link(&server).execute(operation).await;

    let Outcome::Completed(response) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(response.data, Some(json!({ "user": { "name": "Ada" } })));

    let raw = context.response().expect("response attached to context");
    assert_eq!(raw.status(), 200);
    assert_eq!(raw.headers().get("x-request-id").unwrap(), "req-1");
}

/// Per-call headers from the context reach the server
#[tokio::test]
async fn test_fetch_options_headers() {
    let server = start_server().await;

    Mock::given(method("POST"))
        .and(header("authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "me": null } })))
        .expect(1)
        .mount(&server)
        .await;

    let operation = Operation::new("{ me { id } }");
    operation
        .context()
        .set_fetch_options(FetchOptions::new().with_header("authorization", "Bearer t0k3n"));

    assert!(link(&server).execute(operation).await.is_completed());
}

/// A failed status with data and errors yields one partial failure
#[tokio::test]
async fn test_partial_failure() {
    let server = start_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "data": { "a": 1, "b": null },
            "errors": [{ "message": "b unavailable", "path": ["b"] }]
        })))
        .mount(&server)
        .await;

    let outcome = link(&server).execute(Operation::new("{ a b }")).await;

    let Outcome::PartialFailure { response, error } = outcome else {
        panic!("expected partial failure, got {outcome:?}");
    };
    assert_eq!(response.data, Some(json!({ "a": 1, "b": null })));
    assert_eq!(response.errors[0].to_string(), "b unavailable (at b)");
    assert_eq!(error.kind(), ErrorKind::ServerError);
    assert_eq!(error.message(), "Response not successful: Received status code 502");
}

/// Errors returned with a success status are part of the result
#[tokio::test]
async fn test_graphql_errors_with_ok_status() {
    let server = start_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "not found" }]
        })))
        .mount(&server)
        .await;

    let outcome = link(&server).execute(Operation::new("{ a }")).await;
    let response = outcome.response().expect("completed response");
    assert!(outcome.is_completed());
    assert_eq!(response.error_message().as_deref(), Some("not found"));
}

/// A body that is not JSON fails with a parse error
#[tokio::test]
async fn test_non_json_response() {
    let server = start_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let outcome = link(&server).execute(Operation::new("{ a }")).await;
    let error = outcome.error().expect("failure");
    assert_eq!(error.kind(), ErrorKind::ServerParse);
    assert_eq!(error.status(), Some(503));
}

/// JSON without data or errors is rejected
#[tokio::test]
async fn test_missing_data_and_errors() {
    let server = start_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let outcome = link(&server)
        .execute(Operation::new("query Health { ok }").operation_name("Health"))
        .await;
    let error = outcome.error().expect("failure");
    assert_eq!(error.kind(), ErrorKind::InvalidResponse);
    assert_eq!(error.message(), "Server response was missing for query 'Health'");
}

/// Unrepresentable variables fail before anything is sent
#[tokio::test]
async fn test_serialization_failure_sends_nothing() {
    let server = start_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let operation = Operation::new("{ a(x: $x) }").variable("x", vec![f64::INFINITY]);
    let outcome = link(&server).execute(operation).await;

    assert_eq!(outcome.error().unwrap().kind(), ErrorKind::Serialization);
}
