use base64::{Engine as _, engine::general_purpose};
use serde_json::{Map, Value};

use super::model_response::FileState;

/// Text pulled out of a document together with kind-specific metadata
/// (`pages` for PDFs, `rows`/`columns` for tabular input).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedContent {
    pub text: String,
    pub images: Vec<Vec<u8>>,
    pub metadata: Map<String, Value>,
}

impl ExtractedContent {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// Whole-file payload sent to the model as an inline attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    pub mime_type: String,
    pub data: String,
    pub byte_size: u64,
}

impl EncodedBlob {
    pub fn encode(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: general_purpose::STANDARD.encode(bytes),
            byte_size: bytes.len() as u64,
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        general_purpose::STANDARD.decode(&self.data)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedPayload {
    Extracted(ExtractedContent),
    Encoded(EncodedBlob),
}

impl NormalizedPayload {
    pub fn state(&self) -> FileState {
        match self {
            Self::Extracted(_) => FileState::Extracted,
            Self::Encoded(_) => FileState::Encoded,
        }
    }

    pub fn metadata(&self) -> Map<String, Value> {
        match self {
            Self::Extracted(content) => content.metadata.clone(),
            Self::Encoded(_) => Map::new(),
        }
    }
}
