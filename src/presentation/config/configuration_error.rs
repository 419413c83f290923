/// Fatal startup problems. The process refuses to serve when any is raised.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
    #[error("GOOGLE_API_KEY is not set")]
    MissingCredential,
    #[error("GOOGLE_API_KEY still holds the placeholder value")]
    PlaceholderCredential,
    #[error("no file type rule for allowed extensions: {}", .0.join(", "))]
    MissingFileTypeRules(Vec<String>),
    #[error("invalid setting `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("model connection test failed: {0}")]
    ConnectionTest(String),
}
