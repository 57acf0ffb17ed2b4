//! File attachments.

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::Result;

/// Where an upload's bytes come from.
#[derive(Clone, PartialEq)]
enum UploadSource {
    /// Read from disk when the request is sent.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Bytes),
}

/// An opaque handle to binary content sent as a multipart file part.
///
/// Uploads are either filesystem-backed (read lazily when the request is
/// sent) or in-memory.
///
/// # Example
///
/// ```rust
/// use graphql_upload_link::Upload;
///
/// let avatar = Upload::from_bytes(vec![0x89, 0x50, 0x4e, 0x47])
///     .with_file_name("avatar.png")
///     .with_content_type("image/png");
///
/// assert_eq!(avatar.file_name(), Some("avatar.png"));
///
/// let report = Upload::from_path("/tmp/report.pdf");
/// assert_eq!(report.file_name(), Some("report.pdf"));
/// ```
#[derive(Clone, PartialEq)]
pub struct Upload {
    source: UploadSource,
    file_name: Option<String>,
    content_type: Option<String>,
}

impl Upload {
    /// Creates a filesystem-backed upload.
    ///
    /// The file name defaults to the last path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Self {
            source: UploadSource::Path(path),
            file_name,
            content_type: None,
        }
    }

    /// Creates an in-memory upload.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            source: UploadSource::Bytes(bytes.into()),
            file_name: None,
            content_type: None,
        }
    }

    /// Sets the declared file name.
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Sets the declared content type (e.g. `image/png`).
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the declared file name, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Returns the declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the backing path for filesystem uploads.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            UploadSource::Path(path) => Some(path),
            UploadSource::Bytes(_) => None,
        }
    }

    /// Reads the upload's content.
    ///
    /// In-memory uploads are returned without copying.
    pub async fn read(&self) -> Result<Bytes> {
        match &self.source {
            UploadSource::Bytes(bytes) => Ok(bytes.clone()),
            UploadSource::Path(path) => {
                let content = tokio::fs::read(path).await?;
                Ok(Bytes::from(content))
            }
        }
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Upload");
        match &self.source {
            UploadSource::Path(path) => debug.field("path", path),
            UploadSource::Bytes(bytes) => debug.field("len", &bytes.len()),
        };
        debug
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// A file found in a request body, paired with where it sat.
///
/// `path` is dot-separated and addresses the value inside the body,
/// e.g. `variables.avatar` or `variables.input.files.1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFile {
    /// Location of the file in the original body.
    pub path: String,

    /// The file itself.
    pub file: Upload,
}

impl ExtractedFile {
    /// Creates a new extracted file entry.
    pub fn new(path: impl Into<String>, file: Upload) -> Self {
        Self {
            path: path.into(),
            file,
        }
    }
}
