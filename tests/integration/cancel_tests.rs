//! Cancellation and timeout tests.

use std::time::{Duration, Instant};

use graphql_upload_link::{ErrorKind, ExecutionState, Operation, Outcome, UploadLink};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use crate::common::{link, start_server};

fn slow_reply() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(json!({ "data": { "slow": true } }))
        .set_delay(Duration::from_secs(10))
}

/// Cancelling while in flight resolves promptly with no result or error
#[tokio::test]
async fn test_cancel_in_flight() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .respond_with(slow_reply())
        .mount(&server)
        .await;

    let execution = link(&server).execute(Operation::new("{ slow }"));
    assert_eq!(execution.state(), ExecutionState::Idle);
    let handle = execution.cancel_handle();

    let started = Instant::now();
    let task = tokio::spawn(execution);
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.cancel();

    let outcome = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("cancelled execution should resolve")
        .unwrap();

    assert!(matches!(outcome, Outcome::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
}

/// A cancelled execution that was never polled sends nothing
#[tokio::test]
async fn test_cancel_before_poll() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .respond_with(slow_reply())
        .expect(0)
        .mount(&server)
        .await;

    let execution = link(&server).execute(Operation::new("{ slow }"));
    execution.cancel();

    assert!(execution.await.is_cancelled());
}

/// Cancelling after completion leaves the outcome untouched
#[tokio::test]
async fn test_cancel_after_completion() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "a": 1 } })))
        .mount(&server)
        .await;

    let execution = link(&server).execute(Operation::new("{ a }"));
    let handle = execution.cancel_handle();
    let outcome = execution.await;
    handle.cancel();

    assert!(outcome.is_completed());
}

/// The link's HTTP timeout surfaces as a timeout failure
#[tokio::test]
async fn test_timeout() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .respond_with(slow_reply())
        .mount(&server)
        .await;

    let link = UploadLink::builder()
        .uri(format!("{}/graphql", server.uri()))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let outcome = link.execute(Operation::new("{ slow }")).await;
    assert_eq!(outcome.error().unwrap().kind(), ErrorKind::Timeout);
}

/// Unreachable servers fail with a network error
#[tokio::test]
async fn test_connection_refused() {
    let link = UploadLink::builder()
        .uri("http://127.0.0.1:1/graphql")
        .build()
        .unwrap();

    let outcome = link.execute(Operation::new("{ a }")).await;
    assert!(outcome.error().unwrap().kind().is_network());
}
