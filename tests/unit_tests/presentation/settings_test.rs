use std::collections::HashMap;

use tempfile::TempDir;

use lumen_relay::domain::{FileTypeRule, Handling, TemplateClass};
use lumen_relay::presentation::config::{PLACEHOLDER_API_KEY, Settings};
use lumen_relay::presentation::{ConfigurationError, Environment};

fn valid_settings() -> Settings {
    let mut settings = Settings::default();
    settings.model.api_key = "real-key".to_string();
    settings
}

#[test]
fn given_default_settings_when_inspecting_then_uses_documented_limits() {
    let settings = Settings::default();

    assert_eq!(settings.server.port, 5000);
    assert_eq!(settings.upload.max_file_size_bytes, 10 * 1024 * 1024);
    assert_eq!(settings.upload.allowed_extensions, vec!["pdf", "csv"]);
    assert_eq!(settings.batch.allowed_extensions, vec!["pdf"]);
    assert_eq!(settings.worker_pool.size, 4);
    assert_eq!(settings.model.name, "gemini-2.0-flash");
}

#[test]
fn given_credential_when_validating_then_accepts() {
    assert!(valid_settings().validate().is_ok());
}

#[test]
fn given_missing_credential_when_validating_then_rejects() {
    let result = Settings::default().validate();

    assert!(matches!(result, Err(ConfigurationError::MissingCredential)));
}

#[test]
fn given_placeholder_credential_when_validating_then_rejects() {
    let mut settings = Settings::default();
    settings.model.api_key = PLACEHOLDER_API_KEY.to_string();

    assert!(matches!(
        settings.validate(),
        Err(ConfigurationError::PlaceholderCredential)
    ));
}

#[test]
fn given_allowed_extension_without_rule_when_validating_then_names_it() {
    let mut settings = valid_settings();
    settings.upload.allowed_extensions.push(".xlsx".to_string());

    match settings.validate() {
        Err(ConfigurationError::MissingFileTypeRules(missing)) => {
            assert_eq!(missing, vec!["xlsx"]);
        }
        other => panic!("expected MissingFileTypeRules, got {other:?}"),
    }
}

#[test]
fn given_configured_rule_for_new_extension_when_validating_then_accepts() {
    let mut settings = valid_settings();
    settings.upload.allowed_extensions.push("tsv".to_string());
    settings.file_types = HashMap::from([(
        "tsv".to_string(),
        FileTypeRule::new("text/tab-separated-values", TemplateClass::Tabular, Handling::PlainText),
    )]);

    assert!(settings.validate().is_ok());
    assert_eq!(settings.registry().template("tsv"), TemplateClass::Tabular);
}

#[test]
fn given_zero_worker_pool_when_validating_then_rejects() {
    let mut settings = valid_settings();
    settings.worker_pool.size = 0;

    assert!(matches!(
        settings.validate(),
        Err(ConfigurationError::InvalidValue { key: "worker_pool.size", .. })
    ));
}

#[test]
fn given_environment_file_when_loading_then_overrides_base_file_and_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("appsettings.base.toml"),
        "[server]\nport = 6000\n\n[worker_pool]\nsize = 2\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("appsettings.test.toml"),
        "[server]\nport = 7000\n\n[upload]\nallowed_extensions = [\"pdf\", \"csv\", \"png\"]\n\n[file_types.tsv]\nmime_type = \"text/tab-separated-values\"\ntemplate = \"tabular\"\nhandling = \"plain_text\"\n",
    )
    .unwrap();

    let settings = Settings::load_from(dir.path(), Environment::Test).unwrap();

    assert_eq!(settings.server.port, 7000);
    assert_eq!(settings.worker_pool.size, 2);
    assert_eq!(settings.upload.allowed_extensions, vec!["pdf", "csv", "png"]);
    assert_eq!(settings.upload.max_file_size_bytes, 10 * 1024 * 1024);
    assert_eq!(settings.file_types["tsv"].handling, Handling::PlainText);
}

#[test]
fn given_no_settings_files_when_loading_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load_from(dir.path(), Environment::Prod).unwrap();

    assert_eq!(settings.server.port, 5000);
    assert_eq!(settings.batch.allowed_extensions, vec!["pdf"]);
}
