use std::collections::HashMap;

use lumen_relay::domain::{
    DEFAULT_MIME_TYPE, FileTypeRegistry, FileTypeRule, Handling, TemplateClass,
};

#[test]
fn given_builtin_registry_when_looking_up_pdf_then_returns_document_rule() {
    let registry = FileTypeRegistry::builtin();

    assert_eq!(registry.mime_type("pdf"), "application/pdf");
    assert_eq!(registry.template("pdf"), TemplateClass::Document);
    assert_eq!(registry.handling("pdf"), Handling::PdfText);
}

#[test]
fn given_dotted_uppercase_extension_when_looking_up_then_matches_rule() {
    let registry = FileTypeRegistry::builtin();

    assert_eq!(registry.mime_type(".CSV"), "text/csv");
    assert_eq!(registry.template(".CSV"), TemplateClass::Tabular);
}

#[test]
fn given_unknown_extension_when_looking_up_then_falls_back_to_generic_inline() {
    let registry = FileTypeRegistry::builtin();

    assert_eq!(registry.mime_type("xyz"), DEFAULT_MIME_TYPE);
    assert_eq!(registry.template("xyz"), TemplateClass::Generic);
    assert_eq!(registry.handling("xyz"), Handling::Inline);
}

#[test]
fn given_override_when_building_registry_then_replaces_builtin_rule() {
    let overrides = HashMap::from([(
        ".pdf".to_string(),
        FileTypeRule::new("application/pdf", TemplateClass::Document, Handling::Inline),
    )]);

    let registry = FileTypeRegistry::builtin().with_overrides(overrides);

    assert_eq!(registry.handling("pdf"), Handling::Inline);
}

#[test]
fn given_allowed_extensions_without_rules_when_checking_then_lists_them_sorted() {
    let registry = FileTypeRegistry::builtin();
    let allowed = vec![
        "pdf".to_string(),
        "xlsx".to_string(),
        ".DOCX".to_string(),
        "xlsx".to_string(),
    ];

    assert_eq!(registry.missing_rules(&allowed), vec!["docx", "xlsx"]);
}
