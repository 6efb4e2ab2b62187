use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use bytes::Bytes;

use super::validate::attachment_too_large;
use crate::error::{Result, SupportError};

/// A file the customer attached to the ticket
///
/// The contents are reference-counted, so snapshots and payloads share one buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    content_type: String,
    data: Bytes,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, guessing its content type from the extension.
    ///
    /// Files larger than `max_bytes` are refused from their metadata, before
    /// any content is read.
    pub fn from_path(path: &Path, max_bytes: u64) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                SupportError::Other(format!("'{}' is not a file", path.display()))
            })?;

        let read_error = |e: io::Error| {
            SupportError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read attachment {}: {}", path.display(), e),
            ))
        };

        let metadata = fs::metadata(path).map_err(read_error)?;
        if !metadata.is_file() {
            return Err(SupportError::Other(format!(
                "'{}' is not a file",
                path.display()
            )));
        }
        if metadata.len() > max_bytes {
            return Err(SupportError::Validation(attachment_too_large(
                &file_name,
                metadata.len(),
                max_bytes,
            )));
        }

        // The file may grow between the metadata call and the read
        let mut data = Vec::with_capacity(metadata.len() as usize);
        File::open(path)
            .and_then(|file| file.take(max_bytes.saturating_add(1)).read_to_end(&mut data))
            .map_err(read_error)?;
        if data.len() as u64 > max_bytes {
            return Err(SupportError::Validation(attachment_too_large(
                &file_name,
                data.len() as u64,
                max_bytes,
            )));
        }

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self::new(file_name, content_type, data))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A shared handle to the contents
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Lowercased extension without the dot, if the file name has one
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}
