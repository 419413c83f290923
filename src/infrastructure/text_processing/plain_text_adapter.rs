use crate::application::ports::{ContentExtractor, ExtractionError};
use crate::domain::{ExtractedContent, Handling};

#[derive(Debug, Default)]
pub struct PlainTextAdapter;

impl ContentExtractor for PlainTextAdapter {
    fn extract(
        &self,
        data: &[u8],
        filename: &str,
        handling: Handling,
    ) -> Result<ExtractedContent, ExtractionError> {
        if handling != Handling::PlainText {
            return Err(ExtractionError::UnsupportedHandling(handling.to_string()));
        }

        let text = std::str::from_utf8(data)
            .map_err(|e| ExtractionError::Malformed(filename.to_string(), e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoTextFound(filename.to_string()));
        }

        Ok(ExtractedContent::from_text(text))
    }
}
