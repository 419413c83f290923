mod analysis_prompt;
mod batch;
mod extracted_content;
mod file_type;
mod model_response;
mod uploaded_file;

pub use analysis_prompt::{AnalysisPrompt, MAX_EMBEDDED_TEXT_CHARS, truncate_chars};
pub use batch::{BatchFailure, BatchRequest, BatchResult, BatchSuccess};
pub use extracted_content::{EncodedBlob, ExtractedContent, NormalizedPayload};
pub use file_type::{DEFAULT_MIME_TYPE, FileTypeRegistry, FileTypeRule, Handling, TemplateClass};
pub use model_response::{FileInfo, FileState, MissingField, ModelResponse, RawModelResponse};
pub use uploaded_file::{UploadedFile, file_extension, normalize_extension};
