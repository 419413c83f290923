use super::init_tracing::DEFAULT_LOG_FILTER;

/// Configuration for tracing initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub filter: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces the JSON formatter even when the settings
    /// ask for plain text.
    pub fn new(environment: impl Into<String>, level: Option<&str>, json: bool) -> Self {
        let filter = match level.map(str::trim).filter(|l| !l.is_empty()) {
            Some(level) if level.contains('=') || level.contains(',') => level.to_string(),
            Some(level) => format!("{level},lumen_relay={level},tower_http={level}"),
            None => DEFAULT_LOG_FILTER.to_string(),
        };

        Self {
            environment: environment.into(),
            filter,
            json_format: json || log_format_is_json(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            filter: DEFAULT_LOG_FILTER.to_string(),
            json_format: log_format_is_json(),
        }
    }
}

fn log_format_is_json() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
