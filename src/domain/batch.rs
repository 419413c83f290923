use std::collections::HashMap;

use super::model_response::ModelResponse;
use super::uploaded_file::UploadedFile;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchRequest {
    pub files: Vec<UploadedFile>,
    pub prompts: HashMap<String, String>,
}

impl BatchRequest {
    pub fn new(files: Vec<UploadedFile>, prompts: HashMap<String, String>) -> Self {
        Self { files, prompts }
    }

    pub fn prompt_for(&self, file_id: &str) -> Option<&str> {
        self.prompts.get(file_id).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSuccess {
    pub file_id: String,
    pub prompt: String,
    pub response: ModelResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub file_id: String,
    pub error: String,
}

/// Per-file outcomes in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    pub successes: Vec<BatchSuccess>,
    pub failures: Vec<BatchFailure>,
}

impl BatchResult {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
