use std::path::Path;

use bytes::Bytes;

/// A file received from the client, owned by a single pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
    pub declared_size: u64,
    pub content_type: Option<String>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            filename: filename.into(),
            declared_size: data.len() as u64,
            data,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Overrides the size reported by the transport. Used when the body was
    /// larger than what was kept in memory.
    pub fn with_declared_size(mut self, declared_size: u64) -> Self {
        self.declared_size = declared_size;
        self
    }

    pub fn extension(&self) -> Option<String> {
        file_extension(&self.filename)
    }
}

/// Lowercased extension without the leading dot.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Normalizes a configured extension (`".PDF"`, `"pdf"`) to registry form.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}
