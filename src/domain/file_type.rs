use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::uploaded_file::normalize_extension;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Category used to pick the default analysis prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateClass {
    Document,
    Tabular,
    Image,
    Generic,
}

/// How the bytes of a file reach the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handling {
    PdfText,
    Tabular,
    PlainText,
    Inline,
}

impl Handling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PdfText => "pdf_text",
            Self::Tabular => "tabular",
            Self::PlainText => "plain_text",
            Self::Inline => "inline",
        }
    }
}

impl fmt::Display for Handling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeRule {
    pub mime_type: String,
    pub template: TemplateClass,
    pub handling: Handling,
}

impl FileTypeRule {
    pub fn new(mime_type: &str, template: TemplateClass, handling: Handling) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            template,
            handling,
        }
    }
}

/// Extension-keyed table of MIME type, prompt template and handling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileTypeRegistry {
    rules: HashMap<String, FileTypeRule>,
}

impl FileTypeRegistry {
    pub fn new(rules: impl IntoIterator<Item = (String, FileTypeRule)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(ext, rule)| (normalize_extension(&ext), rule))
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        use Handling::{Inline, PdfText, PlainText, Tabular};
        use TemplateClass::{Document, Generic, Image};

        let table = [
            ("pdf", "application/pdf", Document, PdfText),
            ("csv", "text/csv", TemplateClass::Tabular, Tabular),
            ("txt", "text/plain", Document, PlainText),
            ("md", "text/markdown", Document, PlainText),
            ("json", "application/json", Document, PlainText),
            ("png", "image/png", Image, Inline),
            ("jpg", "image/jpeg", Image, Inline),
            ("jpeg", "image/jpeg", Image, Inline),
            ("gif", "image/gif", Image, Inline),
            ("webp", "image/webp", Image, Inline),
            ("mp3", "audio/mpeg", Generic, Inline),
            ("wav", "audio/wav", Generic, Inline),
            ("ogg", "audio/ogg", Generic, Inline),
            ("mp4", "video/mp4", Generic, Inline),
            ("webm", "video/webm", Generic, Inline),
            ("mov", "video/quicktime", Generic, Inline),
        ];

        Self::new(table.into_iter().map(|(ext, mime, template, handling)| {
            (ext.to_string(), FileTypeRule::new(mime, template, handling))
        }))
    }

    /// Configured rules replace built-in ones extension by extension.
    pub fn with_overrides(mut self, overrides: HashMap<String, FileTypeRule>) -> Self {
        for (ext, rule) in overrides {
            self.rules.insert(normalize_extension(&ext), rule);
        }
        self
    }

    pub fn get(&self, extension: &str) -> Option<&FileTypeRule> {
        self.rules.get(&normalize_extension(extension))
    }

    pub fn mime_type(&self, extension: &str) -> &str {
        self.get(extension)
            .map(|rule| rule.mime_type.as_str())
            .unwrap_or(DEFAULT_MIME_TYPE)
    }

    pub fn template(&self, extension: &str) -> TemplateClass {
        self.get(extension)
            .map(|rule| rule.template)
            .unwrap_or(TemplateClass::Generic)
    }

    pub fn handling(&self, extension: &str) -> Handling {
        self.get(extension)
            .map(|rule| rule.handling)
            .unwrap_or(Handling::Inline)
    }

    /// Extensions from `allowed` that have no rule, sorted.
    pub fn missing_rules<'a>(&self, allowed: impl IntoIterator<Item = &'a String>) -> Vec<String> {
        let mut missing: Vec<String> = allowed
            .into_iter()
            .map(|ext| normalize_extension(ext))
            .filter(|ext| !self.rules.contains_key(ext))
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}
