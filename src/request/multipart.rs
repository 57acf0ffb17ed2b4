//! Wire body encoding.
//!
//! Bodies without files go out as JSON. Bodies with files follow the GraphQL
//! multipart request convention: an `operations` field holding the JSON
//! payload, a `map` field assigning each file index to the paths it fills,
//! and one part per file named by its index.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::request::serialize_payload;
use crate::types::{ExtractedFile, Upload};

/// The body handed to the HTTP transport.
#[derive(Debug, Clone, PartialEq)]
pub enum WireBody {
    /// A JSON document.
    Json(String),

    /// A multipart form with file parts.
    Multipart(MultipartBody),
}

impl WireBody {
    /// Returns `true` for multipart bodies.
    pub fn is_multipart(&self) -> bool {
        matches!(self, WireBody::Multipart(_))
    }

    /// Number of file parts; zero for JSON bodies.
    pub fn file_count(&self) -> usize {
        match self {
            WireBody::Multipart(body) => body.parts().len(),
            WireBody::Json(_) => 0,
        }
    }
}

/// A multipart body before it is framed.
///
/// The transport emits `operations`, then `map`, then the file parts.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    operations: String,
    map: String,
    parts: Vec<FilePart>,
}

impl MultipartBody {
    /// The JSON payload, with every file slot nulled.
    pub fn operations(&self) -> &str {
        &self.operations
    }

    /// The JSON `map` field: `{"<index>": ["<path>"], ...}`.
    pub fn map(&self) -> &str {
        &self.map
    }

    /// The file parts, in index order.
    pub fn parts(&self) -> &[FilePart] {
        &self.parts
    }

    /// Looks up a part by its field name.
    pub fn part(&self, field_name: &str) -> Option<&FilePart> {
        self.parts.iter().find(|part| part.field_name() == field_name)
    }
}

/// One file in a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Position of the file; also its field name.
    pub index: usize,

    /// The file content.
    pub file: Upload,
}

impl FilePart {
    /// Returns the multipart field name.
    pub fn field_name(&self) -> String {
        self.index.to_string()
    }
}

/// Chooses the wire encoding for a serialized payload.
///
/// Without files the payload is sent as JSON and `content-type` is set to
/// `application/json`. With files, `content-type` is removed from `headers`
/// so the transport can set the multipart boundary, and file `i` is mapped
/// to `[files[i].path]`.
pub fn encode_body(
    payload: String,
    files: Vec<ExtractedFile>,
    headers: &mut HeaderMap,
) -> Result<WireBody> {
    if files.is_empty() {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        return Ok(WireBody::Json(payload));
    }

    headers.remove(CONTENT_TYPE);

    let mut map = Map::new();
    let mut parts = Vec::with_capacity(files.len());
    for (index, ExtractedFile { path, file }) in files.into_iter().enumerate() {
        map.insert(index.to_string(), Value::Array(vec![Value::String(path)]));
        parts.push(FilePart { index, file });
    }

    Ok(WireBody::Multipart(MultipartBody {
        operations: payload,
        map: serialize_payload(&map)?,
        parts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file(path: &str, content: &'static [u8]) -> ExtractedFile {
        ExtractedFile::new(path, Upload::from_bytes(content))
    }

    #[test]
    fn test_no_files_is_json() {
        let mut headers = HeaderMap::new();
        let body = encode_body(r#"{"query":"q"}"#.into(), vec![], &mut headers).unwrap();

        assert_eq!(body, WireBody::Json(r#"{"query":"q"}"#.into()));
        assert_eq!(body.file_count(), 0);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_single_file() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-tenant", HeaderValue::from_static("acme"));

        let body = encode_body(
            r#"{"query":"q","variables":null}"#.into(),
            vec![file("variables.file", b"abc")],
            &mut headers,
        )
        .unwrap();

        let WireBody::Multipart(body) = body else {
            unreachable!("multipart expected");
        };
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert_eq!(headers.get("x-tenant").unwrap(), "acme");
        assert_eq!(body.operations(), r#"{"query":"q","variables":null}"#);
        assert_eq!(body.map(), r#"{"0":["variables.file"]}"#);
        assert_eq!(body.parts().len(), 1);
        assert_eq!(body.parts()[0].field_name(), "0");
    }

    #[test]
    fn test_every_map_index_has_a_part() {
        let mut headers = HeaderMap::new();
        let body = encode_body(
            "{}".into(),
            vec![
                file("variables.a", b"a"),
                file("variables.list.0", b"b"),
                file("variables.list.1", b"c"),
            ],
            &mut headers,
        )
        .unwrap();
        assert_eq!(body.file_count(), 3);
        let WireBody::Multipart(body) = body else {
            unreachable!("multipart expected");
        };

        let map: Map<String, Value> = serde_json::from_str(body.map()).unwrap();
        assert_eq!(
            Value::Object(map.clone()),
            json!({
                "0": ["variables.a"],
                "1": ["variables.list.0"],
                "2": ["variables.list.1"]
            })
        );
        for index in map.keys() {
            assert!(body.part(index).is_some(), "missing part {index}");
        }
    }

    #[tokio::test]
    async fn test_parts_resolve_by_index_in_any_order() {
        let mut headers = HeaderMap::new();
        let body = encode_body(
            "{}".into(),
            vec![file("variables.first", b"one"), file("variables.second", b"two")],
            &mut headers,
        )
        .unwrap();
        let WireBody::Multipart(body) = body else {
            unreachable!("multipart expected");
        };

        // A receiver sees the parts shuffled and resolves them through the map.
        let mut received: Vec<_> = body.parts().to_vec();
        received.reverse();

        let map: Map<String, Value> = serde_json::from_str(body.map()).unwrap();
        let mut resolved = Vec::new();
        for (index, paths) in &map {
            let part = received
                .iter()
                .find(|part| part.field_name() == *index)
                .unwrap();
            resolved.push((paths[0].as_str().unwrap().to_owned(), part.file.read().await.unwrap()));
        }

        assert_eq!(resolved[0].0, "variables.first");
        assert_eq!(&resolved[0].1[..], b"one");
        assert_eq!(resolved[1].0, "variables.second");
        assert_eq!(&resolved[1].1[..], b"two");
    }
}
