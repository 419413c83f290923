mod composite_extractor;
mod csv_adapter;
mod pdf_adapter;
mod plain_text_adapter;
mod text_sanitizer;

pub use composite_extractor::CompositeExtractor;
pub use csv_adapter::{CsvAdapter, render_table};
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use text_sanitizer::sanitize_extracted_text;
