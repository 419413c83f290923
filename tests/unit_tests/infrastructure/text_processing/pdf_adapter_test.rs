use lumen_relay::application::ports::{ContentExtractor, ExtractionError};
use lumen_relay::domain::Handling;
use lumen_relay::infrastructure::text_processing::PdfAdapter;

use crate::helpers::text_pdf;

#[test]
fn given_non_pdf_handling_when_extracting_then_returns_unsupported_handling() {
    let result = PdfAdapter::new().extract(b"%PDF-1.4", "file.pdf", Handling::Tabular);

    assert!(
        matches!(result, Err(ExtractionError::UnsupportedHandling(_))),
        "expected UnsupportedHandling but got: {:?}",
        result
    );
}

#[test]
fn given_garbage_bytes_when_extracting_then_returns_extraction_failed() {
    let result = PdfAdapter::new().extract(b"this is not a pdf", "junk.pdf", Handling::PdfText);

    match result {
        Err(ExtractionError::ExtractionFailed(reason)) => assert!(reason.contains("junk.pdf")),
        other => panic!("expected ExtractionFailed, got {other:?}"),
    }
}

#[test]
fn given_two_text_pages_when_extracting_then_joins_pages_in_order_and_counts_them() {
    let pdf = text_pdf(&["Alpha page one", "Bravo page two"]);

    let content = PdfAdapter::new()
        .extract(&pdf, "two-pages.pdf", Handling::PdfText)
        .unwrap();

    let first = content.text.find("Alpha page one").expect("first page text");
    let second = content.text.find("Bravo page two").expect("second page text");
    assert!(first < second);
    assert!(content.text[first..second].contains('\n'));
    assert_eq!(content.metadata["pages"], 2);
}
