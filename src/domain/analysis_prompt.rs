/// Embedded document text is capped before it goes into a request.
pub const MAX_EMBEDDED_TEXT_CHARS: usize = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPrompt {
    instruction: String,
    embedded_text: Option<String>,
}

impl AnalysisPrompt {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            embedded_text: None,
        }
    }

    pub fn with_embedded_text(mut self, text: &str) -> Self {
        let truncated = truncate_chars(text, MAX_EMBEDDED_TEXT_CHARS);
        if !truncated.trim().is_empty() {
            self.embedded_text = Some(truncated.to_string());
        }
        self
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn embedded_text(&self) -> Option<&str> {
        self.embedded_text.as_deref()
    }
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
