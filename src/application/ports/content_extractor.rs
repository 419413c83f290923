use crate::domain::{ExtractedContent, Handling};

/// Pulls text out of document bytes. Implementations block and are run on
/// the worker pool.
pub trait ContentExtractor: Send + Sync {
    fn extract(
        &self,
        data: &[u8],
        filename: &str,
        handling: Handling,
    ) -> Result<ExtractedContent, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported handling: {0}")]
    UnsupportedHandling(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
    #[error("{0} is empty")]
    EmptyFile(String),
    #[error("{0} is malformed: {1}")]
    Malformed(String, String),
    #[error("staging failed: {0}")]
    Staging(String),
}
