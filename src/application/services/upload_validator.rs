use std::collections::BTreeSet;

use crate::domain::{file_extension, normalize_extension};

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Size and extension gate applied before any content is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadValidator {
    max_file_size_bytes: u64,
    allowed_extensions: BTreeSet<String>,
}

impl UploadValidator {
    pub fn new<I, S>(max_file_size_bytes: u64, allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            max_file_size_bytes,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    pub fn allowed_extensions(&self) -> impl Iterator<Item = &String> {
        self.allowed_extensions.iter()
    }

    pub fn validate(&self, declared_size: u64, filename: &str) -> Result<String, ValidationError> {
        self.check_size(declared_size)?;
        self.check_extension(filename)
    }

    pub fn check_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size_bytes {
            return Err(ValidationError::TooLarge {
                size,
                limit: self.max_file_size_bytes,
            });
        }
        Ok(())
    }

    /// Returns the normalized extension when it is allowed.
    pub fn check_extension(&self, filename: &str) -> Result<String, ValidationError> {
        match file_extension(filename) {
            Some(ext) if self.allowed_extensions.contains(&ext) => Ok(ext),
            other => Err(ValidationError::UnsupportedType {
                extension: other.unwrap_or_default(),
                allowed: self.allowed_list(),
            }),
        }
    }

    fn allowed_list(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File size exceeds maximum limit of {}MB", megabytes(.limit))]
    TooLarge { size: u64, limit: u64 },
    #[error("Unsupported file type. Allowed types: {allowed}")]
    UnsupportedType { extension: String, allowed: String },
}

fn megabytes(bytes: &u64) -> String {
    let mb = *bytes as f64 / (1024.0 * 1024.0);
    if mb.fract() == 0.0 {
        format!("{}", mb as u64)
    } else {
        format!("{mb:.1}")
    }
}

