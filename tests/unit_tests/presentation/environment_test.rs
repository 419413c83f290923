use lumen_relay::presentation::Environment;

#[test]
fn given_known_names_when_parsing_environment_then_maps_case_insensitively() {
    assert_eq!(Environment::try_from("Local".to_string()), Ok(Environment::Local));
    assert_eq!(Environment::try_from("TEST".to_string()), Ok(Environment::Test));
    assert_eq!(Environment::try_from("production".to_string()), Ok(Environment::Prod));
}

#[test]
fn given_unknown_name_when_parsing_environment_then_returns_error() {
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_formatting_then_matches_settings_file_suffix() {
    assert_eq!(Environment::Prod.to_string(), "prod");
    assert_eq!(Environment::default(), Environment::Local);
}
