//! Multipart upload tests.

use std::io::Write;

use graphql_upload_link::{ErrorKind, Operation, Upload};
use serde_json::{Value, json};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{link, read_form, start_server};

async fn mount_ok(server: &wiremock::MockServer) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "ok": true } })))
        .expect(1)
        .mount(server)
        .await;
}

/// A file on disk is sent as part `0`, after `operations` and `map`
#[tokio::test]
async fn test_single_file_from_disk() {
    let server = start_server().await;
    mount_ok(&server).await;

    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"hello from disk").unwrap();
    let file_name = file
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();

    let operation = Operation::new("mutation($file: Upload!) { upload(file: $file) }")
        .variable("file", Upload::from_path(file.path()).with_content_type("text/plain"));

    assert!(link(&server).execute(operation).await.is_completed());

    let requests = server.received_requests().await.unwrap();
    let fields = read_form(&requests[0]);
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["operations", "map", "0"]);

    let operations: Value = serde_json::from_slice(&fields[0].content).unwrap();
    assert_eq!(
        operations,
        json!({ "query": " query {  upload(file: 'null')  } ", "variables": null })
    );
    assert_eq!(fields[1].text(), r#"{"0":["variables.file"]}"#);
    assert_eq!(fields[2].file_name.as_deref(), Some(file_name.as_str()));
    assert_eq!(fields[2].text(), "hello from disk");
}

/// Every map entry resolves to a part by index, whatever order parts arrive in
#[tokio::test]
async fn test_file_list_resolves_by_index() {
    let server = start_server().await;
    mount_ok(&server).await;

    let operation = Operation::new("mutation($files: [Upload!]!) { uploadMany(files: $files) }")
        .variable(
            "files",
            vec![
                Upload::from_bytes(&b"first"[..]).with_file_name("1.bin"),
                Upload::from_bytes(&b"second"[..]).with_file_name("2.bin"),
            ],
        );

    assert!(link(&server).execute(operation).await.is_completed());

    let requests = server.received_requests().await.unwrap();
    let mut fields = read_form(&requests[0]);
    let map: serde_json::Map<String, Value> = serde_json::from_slice(&fields[1].content).unwrap();
    assert_eq!(
        Value::Object(map.clone()),
        json!({ "0": ["variables.files.0"], "1": ["variables.files.1"] })
    );

    fields.reverse();
    let resolved: Vec<_> = map
        .iter()
        .map(|(index, paths)| {
            let part = fields.iter().find(|f| f.name == *index).unwrap();
            (paths[0].as_str().unwrap().to_owned(), part.text())
        })
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("variables.files.0".to_owned(), "first".to_owned()),
            ("variables.files.1".to_owned(), "second".to_owned()),
        ]
    );

    // File content never leaks into the operations field.
    let operations = String::from_utf8_lossy(&fields.last().unwrap().content).into_owned();
    assert!(!operations.contains("first"));
}

/// An unreadable file fails without a request reaching the server
#[tokio::test]
async fn test_missing_file() {
    let server = start_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let operation = Operation::new("mutation($f: Upload!) { upload(file: $f) }")
        .variable("f", Upload::from_path(dir.path().join("missing.bin")));

    let outcome = link(&server).execute(operation).await;
    assert_eq!(outcome.error().unwrap().kind(), ErrorKind::Io);
}
