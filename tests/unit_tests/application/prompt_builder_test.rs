use std::sync::Arc;

use lumen_relay::application::services::{PromptBuilder, render_template};
use lumen_relay::domain::{FileTypeRegistry, TemplateClass};

fn builder() -> PromptBuilder {
    PromptBuilder::new(Arc::new(FileTypeRegistry::builtin()))
}

#[test]
fn given_user_prompt_when_building_then_returns_it_verbatim() {
    let prompt = builder().build("a.pdf", "pdf", Some("  Summarize in one line  "));

    assert_eq!(prompt, "  Summarize in one line  ");
}

#[test]
fn given_blank_user_prompt_when_building_then_uses_template() {
    let prompt = builder().build("a.pdf", "pdf", Some("   "));

    assert_eq!(prompt, render_template(TemplateClass::Document, "a.pdf"));
}

#[test]
fn given_csv_without_prompt_when_building_then_uses_tabular_template() {
    let prompt = builder().build("report.csv", "csv", None);

    assert!(prompt.starts_with("Please analyze the tabular data from report.csv."));
    assert!(prompt.contains("Actionable insights"));
}

#[test]
fn given_image_without_prompt_when_building_then_uses_image_template() {
    let prompt = builder().build("cat.png", "png", None);

    assert!(prompt.contains("cat.png"));
    assert!(prompt.contains("Visual characteristics"));
}

#[test]
fn given_unknown_extension_when_building_then_uses_generic_one_liner() {
    let prompt = builder().build("blob.bin", "bin", None);

    assert_eq!(
        prompt,
        "Please analyze the file blob.bin and describe its contents."
    );
}

#[test]
fn given_document_template_when_rendering_then_lists_four_points() {
    let prompt = render_template(TemplateClass::Document, "notes.txt");

    assert!(prompt.starts_with(
        "Please analyze the following content from notes.txt and provide a detailed summary."
    ));
    assert!(prompt.contains("1. A brief overview"));
    assert!(prompt.ends_with("4. Recommendations if applicable"));
}
