use lumen_relay::application::ports::{ContentExtractor, ExtractionError};
use lumen_relay::domain::Handling;
use lumen_relay::infrastructure::text_processing::{CsvAdapter, render_table};
use serde_json::json;

#[test]
fn given_report_csv_when_extracting_then_renders_indexed_table_with_metadata() {
    let data = b"colA,colB\n1,x\n22,yy\n333,zzz\n";

    let content = CsvAdapter::new()
        .extract(data, "report.csv", Handling::Tabular)
        .unwrap();

    assert_eq!(
        content.text,
        "   colA  colB\n0     1     x\n1    22    yy\n2   333   zzz"
    );
    assert_eq!(content.metadata["rows"], 3);
    assert_eq!(content.metadata["columns"], json!(["colA", "colB"]));
}

#[test]
fn given_empty_cell_when_extracting_then_renders_nan() {
    let data = b"name,score\nada,\nbob,7\n";

    let content = CsvAdapter::new()
        .extract(data, "scores.csv", Handling::Tabular)
        .unwrap();

    assert!(content.text.contains("ada    NaN"));
}

#[test]
fn given_row_with_extra_fields_when_extracting_then_error_names_row() {
    let data = b"a,b\n1,2\n3,4,5\n";

    let result = CsvAdapter::new().extract(data, "ragged.csv", Handling::Tabular);

    match result {
        Err(ExtractionError::Malformed(file, reason)) => {
            assert_eq!(file, "ragged.csv");
            assert!(reason.starts_with("row 3:"), "unexpected reason: {reason}");
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn given_empty_input_when_extracting_then_reports_no_columns() {
    let result = CsvAdapter::new().extract(b"", "empty.csv", Handling::Tabular);

    assert!(matches!(
        result,
        Err(ExtractionError::Malformed(_, ref reason)) if reason == "No columns to parse from file"
    ));
}

#[test]
fn given_wrong_handling_when_extracting_then_returns_unsupported() {
    let result = CsvAdapter::new().extract(b"a\n1\n", "a.csv", Handling::PdfText);

    assert!(matches!(result, Err(ExtractionError::UnsupportedHandling(_))));
}

#[test]
fn given_header_only_when_rendering_then_outputs_header_line() {
    let headers = vec!["id".to_string(), "label".to_string()];

    assert_eq!(render_table(&headers, &[]), "  id  label");
}

#[test]
fn given_short_row_when_extracting_then_pads_missing_cells_with_nan() {
    let data = b"a,b\n1\n2,3\n";

    let content = CsvAdapter::new()
        .extract(data, "short.csv", Handling::Tabular)
        .unwrap();

    assert_eq!(content.text, "   a    b\n0  1  NaN\n1  2    3");
    assert_eq!(content.metadata["rows"], 2);
}

#[test]
fn given_cells_with_surrounding_spaces_when_extracting_then_keeps_them() {
    let data = b"name,city\nada, Oslo\n";

    let content = CsvAdapter::new()
        .extract(data, "people.csv", Handling::Tabular)
        .unwrap();

    assert_eq!(content.text, "   name   city\n0   ada   Oslo");
}
