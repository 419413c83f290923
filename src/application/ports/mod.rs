mod content_extractor;
mod generative_model;

pub use content_extractor::{ContentExtractor, ExtractionError};
pub use generative_model::{GenerationRequest, GenerativeModel, ModelInvocationError, Part};
