use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle of an uploaded file as reported back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    Extracted,
    Encoded,
    Analyzed,
}

impl FileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileState::Extracted => "EXTRACTED",
            FileState::Encoded => "ENCODED",
            FileState::Analyzed => "ANALYZED",
        }
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub mime_type: String,
    pub byte_size: u64,
    pub state: FileState,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model response has no usable `{0}` field")]
pub struct MissingField(pub &'static str);

/// Body returned by the model provider. Its shape varies between model
/// versions, so every field is read through a fallible accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct RawModelResponse(Value);

impl RawModelResponse {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Result<String, MissingField> {
        let parts = self
            .0
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
            .ok_or(MissingField("text"))?;

        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();

        if texts.is_empty() {
            return Err(MissingField("text"));
        }

        Ok(texts.concat())
    }

    pub fn prompt_feedback(&self) -> Result<String, MissingField> {
        self.0
            .get("promptFeedback")
            .filter(|feedback| !feedback.is_null())
            .map(Value::to_string)
            .ok_or(MissingField("promptFeedback"))
    }

    pub fn candidates(&self) -> Result<Vec<String>, MissingField> {
        self.0
            .get("candidates")
            .and_then(Value::as_array)
            .map(|candidates| candidates.iter().map(Value::to_string).collect())
            .ok_or(MissingField("candidates"))
    }
}

/// Normalized model output relayed to the client. Every field is
/// independently nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    pub text: Option<String>,
    pub prompt_feedback: Option<String>,
    pub candidates: Option<Vec<String>>,
    pub file_info: Option<FileInfo>,
}

impl ModelResponse {
    pub fn from_raw(raw: &RawModelResponse) -> Self {
        Self {
            text: present(raw.text()),
            prompt_feedback: present(raw.prompt_feedback()),
            candidates: present(raw.candidates()),
            file_info: None,
        }
    }

    pub fn with_file_info(mut self, file_info: FileInfo) -> Self {
        self.file_info = Some(file_info);
        self
    }

    /// The model answered with feedback but no text, typically a block.
    pub fn is_declined(&self) -> bool {
        self.text.is_none() && self.prompt_feedback.is_some()
    }
}

fn present<T>(field: Result<T, MissingField>) -> Option<T> {
    match field {
        Ok(value) => Some(value),
        Err(missing) => {
            tracing::debug!(field = missing.0, "Model response field absent");
            None
        }
    }
}
