use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{ContentExtractor, ExtractionError};
use crate::domain::{ExtractedContent, Handling};

use super::{CsvAdapter, PdfAdapter, PlainTextAdapter};

/// Dispatches to the extractor registered for a handling strategy.
pub struct CompositeExtractor {
    adapters: HashMap<Handling, Arc<dyn ContentExtractor>>,
}

impl CompositeExtractor {
    pub fn new(adapters: Vec<(Handling, Arc<dyn ContentExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    pub fn with_defaults() -> Self {
        let pdf: Arc<dyn ContentExtractor> = Arc::new(PdfAdapter::new());
        let csv: Arc<dyn ContentExtractor> = Arc::new(CsvAdapter::new());
        let plain_text: Arc<dyn ContentExtractor> = Arc::new(PlainTextAdapter);

        Self::new(vec![
            (Handling::PdfText, pdf),
            (Handling::Tabular, csv),
            (Handling::PlainText, plain_text),
        ])
    }
}

impl ContentExtractor for CompositeExtractor {
    fn extract(
        &self,
        data: &[u8],
        filename: &str,
        handling: Handling,
    ) -> Result<ExtractedContent, ExtractionError> {
        let adapter = self
            .adapters
            .get(&handling)
            .ok_or_else(|| ExtractionError::UnsupportedHandling(handling.to_string()))?;

        adapter.extract(data, filename, handling)
    }
}
