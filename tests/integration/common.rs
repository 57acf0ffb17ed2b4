//! Shared harness: server setup, link construction and a multipart reader.

use std::sync::Once;

use graphql_upload_link::UploadLink;
use tracing_subscriber::EnvFilter;
use wiremock::{MockServer, Request};

static TRACING: Once = Once::new();

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Starts a mock server with logging enabled.
pub async fn start_server() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Builds a link pointed at `<server>/graphql`.
pub fn link(server: &MockServer) -> UploadLink {
    UploadLink::builder()
        .uri(format!("{}/graphql", server.uri()))
        .build()
        .expect("link should build")
}

/// One decoded multipart field.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub file_name: Option<String>,
    pub content: Vec<u8>,
}

impl FormField {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Decodes a `multipart/form-data` request body, in wire order.
pub fn read_form(request: &Request) -> Vec<FormField> {
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .expect("content-type header");
    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .expect("multipart boundary")
        .trim_matches('"');

    let delimiter = format!("--{boundary}");
    let body = &request.body;
    let mut fields = Vec::new();

    for chunk in split(body, delimiter.as_bytes()).into_iter().skip(1) {
        if chunk.starts_with(b"--") {
            break;
        }
        let chunk = chunk.strip_prefix(b"\r\n").unwrap_or(chunk);
        let split_at = find(chunk, b"\r\n\r\n").expect("part header terminator");
        let head = String::from_utf8_lossy(&chunk[..split_at]).into_owned();
        let content = chunk[split_at + 4..]
            .strip_suffix(b"\r\n")
            .unwrap_or(&chunk[split_at + 4..])
            .to_vec();

        fields.push(FormField {
            name: disposition_param(&head, "name").expect("field name"),
            file_name: disposition_param(&head, "filename"),
            content,
        });
    }

    fields
}

fn disposition_param(head: &str, key: &str) -> Option<String> {
    let marker = format!("; {key}=\"");
    let start = head.find(&marker)? + marker.len();
    let end = head[start..].find('"')? + start;
    Some(head[start..end].to_owned())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn split<'a>(mut haystack: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut pieces = Vec::new();
    while let Some(at) = find(haystack, delimiter) {
        pieces.push(&haystack[..at]);
        haystack = &haystack[at + delimiter.len()..];
    }
    pieces.push(haystack);
    pieces
}
