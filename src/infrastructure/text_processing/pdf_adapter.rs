use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::application::ports::{ContentExtractor, ExtractionError};
use crate::domain::{ExtractedContent, Handling};

use super::text_sanitizer::sanitize_extracted_text;

/// Text-layer extraction for PDFs. Scanned documents without a text layer
/// yield `NoTextFound`.
#[derive(Debug, Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8], filename: &str) -> Result<Vec<String>, ExtractionError> {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }));

        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ExtractionError::ExtractionFailed(format!(
                "failed to parse PDF {filename}: {e}"
            ))),
            Err(_) => Err(ExtractionError::ExtractionFailed(format!(
                "PDF parser panicked on {filename}"
            ))),
        }
    }
}

impl ContentExtractor for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    fn extract(
        &self,
        data: &[u8],
        filename: &str,
        handling: Handling,
    ) -> Result<ExtractedContent, ExtractionError> {
        if handling != Handling::PdfText {
            return Err(ExtractionError::UnsupportedHandling(handling.to_string()));
        }

        let pages = Self::extract_pages(data, filename)?;
        let page_count = pages.len();

        let text_pages: Vec<String> = pages
            .iter()
            .map(|page| sanitize_extracted_text(page))
            .filter(|page| !page.is_empty())
            .collect();

        tracing::info!(
            page_count,
            text_pages = text_pages.len(),
            "PDF text extraction complete"
        );

        if text_pages.is_empty() {
            return Err(ExtractionError::NoTextFound(filename.to_string()));
        }

        Ok(ExtractedContent::from_text(text_pages.join("\n")).with_metadata("pages", page_count))
    }
}
