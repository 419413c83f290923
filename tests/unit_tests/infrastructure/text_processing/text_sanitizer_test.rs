use lumen_relay::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_ligatures_when_sanitizing_then_decomposes_them() {
    assert_eq!(sanitize_extracted_text("ﬁnding a ﬂood"), "finding a flood");
}

#[test]
fn given_blank_line_runs_and_space_runs_when_sanitizing_then_collapses_both() {
    let input = "The ﬁrst   page\n\n\n\nSecond    page";
    assert_eq!(sanitize_extracted_text(input), "The first page\n\nSecond page");
}

#[test]
fn given_whitespace_only_text_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text(""), "");
    assert_eq!(sanitize_extracted_text(" \n\n\t "), "");
}

#[test]
fn given_word_hyphenated_across_lines_when_sanitizing_then_rejoins_it() {
    assert_eq!(
        sanitize_extracted_text("quarterly reve-\nnue grew"),
        "quarterly revenue grew"
    );
}

#[test]
fn given_compound_word_and_bullet_list_when_sanitizing_then_keeps_hyphens() {
    let input = "A well-known result:\n- first point\n- second point";
    assert_eq!(sanitize_extracted_text(input), input);
}

#[test]
fn given_control_characters_when_sanitizing_then_strips_them() {
    assert_eq!(sanitize_extracted_text("page\u{0c}one\u{0} end"), "pageone end");
}

#[test]
fn given_carriage_return_line_endings_when_sanitizing_then_normalizes_lines() {
    assert_eq!(
        sanitize_extracted_text("first line\r\nsecond line"),
        "first line\nsecond line"
    );
}
