use std::sync::Arc;

use crate::domain::{FileTypeRegistry, TemplateClass};

/// Picks the analysis instruction for a file.
pub struct PromptBuilder {
    registry: Arc<FileTypeRegistry>,
}

impl PromptBuilder {
    pub fn new(registry: Arc<FileTypeRegistry>) -> Self {
        Self { registry }
    }

    /// A non-blank `user_prompt` wins verbatim; otherwise the template for the
    /// extension's class is rendered with the file name.
    pub fn build(&self, file_name: &str, extension: &str, user_prompt: Option<&str>) -> String {
        match user_prompt {
            Some(prompt) if !prompt.trim().is_empty() => prompt.to_string(),
            _ => render_template(self.registry.template(extension), file_name),
        }
    }
}

pub fn render_template(class: TemplateClass, file_name: &str) -> String {
    match class {
        TemplateClass::Document => format!(
            "Please analyze the following content from {file_name} and provide a detailed summary.\n\n\
             Please provide:\n\
             1. A brief overview\n\
             2. Key points or findings\n\
             3. Any notable patterns or insights\n\
             4. Recommendations if applicable"
        ),
        TemplateClass::Tabular => format!(
            "Please analyze the tabular data from {file_name}.\n\n\
             Please provide:\n\
             1. The data structure (columns and what they represent)\n\
             2. Key statistics and distributions\n\
             3. Any anomalies, outliers or missing values\n\
             4. Actionable insights"
        ),
        TemplateClass::Image => format!(
            "Please describe the image {file_name}.\n\n\
             Please provide:\n\
             1. The main subjects\n\
             2. Visual characteristics such as composition, colors and style\n\
             3. The context or setting\n\
             4. Any notable details"
        ),
        TemplateClass::Generic => {
            format!("Please analyze the file {file_name} and describe its contents.")
        }
    }
}
