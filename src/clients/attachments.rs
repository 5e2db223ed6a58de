//! Inline file attachments.
//!
//! Files are never sent as multipart form data. Each one is normalized into
//! an [`Attachment`] (`{file, mime, name}`, content base64-encoded) and placed
//! in the JSON body under the `attachments` key.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::clients::errors::{AttachmentField, ClientError};

/// Argument key that normalized attachments are stored under.
pub const ATTACHMENTS_KEY: &str = "attachments";

/// A file to attach to a request, as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileInput {
    /// Path to a local file; its content is read and encoded at request time.
    Path(PathBuf),
    /// A pre-encoded record. Missing keys are reported by the engine.
    Record(AttachmentRecord),
}

impl From<PathBuf> for FileInput {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileInput {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<AttachmentRecord> for FileInput {
    fn from(record: AttachmentRecord) -> Self {
        Self::Record(record)
    }
}

impl From<Attachment> for FileInput {
    fn from(attachment: Attachment) -> Self {
        Self::Record(AttachmentRecord {
            file: Some(attachment.file),
            name: Some(attachment.name),
            mime: Some(attachment.mime),
        })
    }
}

/// A caller-built attachment whose keys may be incomplete.
///
/// Deserializes from an object such as
/// `{"file": "aGVsbG8=", "name": "a.txt", "mime": "text/plain"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Base64-encoded file content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// File name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

/// A normalized attachment as sent on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Base64-encoded file content.
    pub file: String,
    /// MIME type.
    pub mime: String,
    /// File name.
    pub name: String,
}

impl Attachment {
    /// Creates an attachment from raw bytes, encoding them as base64.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            file: STANDARD.encode(bytes),
            mime: mime.into(),
            name: name.into(),
        }
    }

    /// Reads a local file and builds an attachment from it.
    ///
    /// The MIME type is guessed from the extension, falling back to
    /// `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidAttachment`] if `path` is not a regular
    /// file or cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        if !path.is_file() {
            return Err(ClientError::InvalidAttachment {
                reason: format!("'{}' is not a file", path.display()),
            });
        }

        let content = fs::read(path).map_err(|e| ClientError::InvalidAttachment {
            reason: format!("'{}' could not be read: {e}", path.display()),
        })?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::from_bytes(&content, name, mime.essence_str()))
    }

    /// Validates a caller-built record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] for the first absent key, checked
    /// in `file`, `name`, `mime` order.
    pub fn from_record(record: &AttachmentRecord) -> Result<Self, ClientError> {
        let missing = |field| ClientError::MissingField { field };

        let file = record.file.clone().ok_or_else(|| missing(AttachmentField::File))?;
        let name = record.name.clone().ok_or_else(|| missing(AttachmentField::Name))?;
        let mime = record.mime.clone().ok_or_else(|| missing(AttachmentField::Mime))?;

        Ok(Self { file, mime, name })
    }
}

/// Normalizes every file input, aborting on the first invalid one.
///
/// # Errors
///
/// Returns the error of the first input that cannot be normalized; no
/// partial list is produced.
pub fn normalize(files: &[FileInput]) -> Result<Vec<Attachment>, ClientError> {
    files
        .iter()
        .map(|input| {
            let attachment = match input {
                FileInput::Path(path) => Attachment::from_path(path)?,
                FileInput::Record(record) => Attachment::from_record(record)?,
            };
            tracing::trace!(name = %attachment.name, mime = %attachment.mime, "normalized attachment");
            Ok(attachment)
        })
        .collect()
}
