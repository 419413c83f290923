use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").ok()
});

/// NFKC-normalizes extracted text, rejoins words hyphenated across line
/// breaks, drops control characters and collapses runs of whitespace. Blank
/// line runs become a single paragraph break.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    let de_hyphenated = match HYPHEN_NEWLINE.as_ref() {
        Some(re) => re.replace_all(&normalized, "$prefix$suffix").into_owned(),
        None => normalized,
    };

    let mut result = String::with_capacity(de_hyphenated.len());
    let mut prev_was_blank = false;

    for line in de_hyphenated.lines().map(str::trim) {
        if line.is_empty() {
            prev_was_blank = true;
            continue;
        }

        if !result.is_empty() {
            result.push_str(if prev_was_blank { "\n\n" } else { "\n" });
        }
        line.split_whitespace().enumerate().for_each(|(i, word)| {
            if i > 0 {
                result.push(' ');
            }
            result.push_str(word);
        });
        prev_was_blank = false;
    }

    result
}
