use async_trait::async_trait;

use crate::domain::{AnalysisPrompt, EncodedBlob, RawModelResponse};

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<RawModelResponse, ModelInvocationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: String },
}

/// Ordered parts of a single user turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub parts: Vec<Part>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into())],
        }
    }

    pub fn from_prompt(prompt: &AnalysisPrompt, attachment: Option<&EncodedBlob>) -> Self {
        let mut parts = vec![Part::Text(prompt.instruction().to_string())];

        if let Some(text) = prompt.embedded_text() {
            parts.push(Part::Text(text.to_string()));
        }

        if let Some(blob) = attachment {
            parts.push(Part::InlineData {
                mime_type: blob.mime_type.clone(),
                data: blob.data.clone(),
            });
        }

        Self { parts }
    }

    pub fn instruction(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            Part::Text(text) => Some(text.as_str()),
            Part::InlineData { .. } => None,
        })
    }

    pub fn attachment(&self) -> Option<(&str, &str)> {
        self.parts.iter().find_map(|part| match part {
            Part::InlineData { mime_type, data } => Some((mime_type.as_str(), data.as_str())),
            Part::Text(_) => None,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelInvocationError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
