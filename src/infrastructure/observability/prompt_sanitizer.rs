use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 100;

static SECRET_ASSIGNMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(api_key|key|password|secret|token)=[^\s&"']+"#).ok()
});

static BEARER_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[A-Za-z0-9._~+/=-]+").ok());

static GOOGLE_API_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z_-]{10,}").ok());

/// Sanitizes prompt text for safe logging: truncates to a visible prefix and
/// redacts anything that looks like a credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let visible = if total > MAX_VISIBLE_CHARS {
        let prefix: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{prefix}... ({total} chars total)")
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&visible)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let mut result = text.to_string();

    if let Some(re) = SECRET_ASSIGNMENT.as_ref() {
        result = re.replace_all(&result, "${1}=[REDACTED]").into_owned();
    }
    if let Some(re) = BEARER_TOKEN.as_ref() {
        result = re.replace_all(&result, "Bearer [REDACTED]").into_owned();
    }
    if let Some(re) = GOOGLE_API_KEY.as_ref() {
        result = re.replace_all(&result, "[REDACTED]").into_owned();
    }

    result
}
