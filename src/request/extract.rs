//! File extraction.

use std::fmt;

use crate::request::RequestBody;
use crate::types::{ExtractedFile, InputValue};

/// The result of pulling files out of a request body.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Copy of the body with every upload replaced by null.
    pub clone: RequestBody,

    /// The uploads, with the dot-separated path each one occupied.
    pub files: Vec<ExtractedFile>,
}

impl Extraction {
    /// Returns `true` if at least one file was found.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Finds file uploads in a request body.
///
/// Implementations must leave the input untouched and return a clone in which
/// every reported file has been replaced, so the clone can be serialized.
pub trait FileExtractor: Send + Sync + fmt::Debug {
    /// Splits `body` into a file-free clone and the files it held.
    fn extract(&self, body: &RequestBody) -> Extraction;
}

/// Walks the variables depth-first and records uploads as
/// `variables.<key>[.<segment>...]`, with list positions as numeric segments.
///
/// The same upload bound twice is reported twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFileExtractor;

impl FileExtractor for DefaultFileExtractor {
    fn extract(&self, body: &RequestBody) -> Extraction {
        let mut clone = body.clone();
        let mut files = Vec::new();

        for (key, value) in clone.variables.iter_mut() {
            let path = format!("variables.{key}");
            take_uploads(value, path, &mut files);
        }

        Extraction { clone, files }
    }
}

fn take_uploads(value: &mut InputValue, path: String, files: &mut Vec<ExtractedFile>) {
    match value {
        InputValue::Upload(_) => {
            if let InputValue::Upload(file) = std::mem::take(value) {
                files.push(ExtractedFile::new(path, file));
            }
        }
        InputValue::List(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                take_uploads(item, format!("{path}.{index}"), files);
            }
        }
        InputValue::Object(fields) => {
            for (name, field) in fields.iter_mut() {
                take_uploads(field, format!("{path}.{name}"), files);
            }
        }
        _ => {}
    }
}
