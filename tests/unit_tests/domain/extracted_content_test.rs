use lumen_relay::domain::{EncodedBlob, ExtractedContent, FileState, NormalizedPayload};

#[test]
fn given_binary_bytes_when_encoding_then_decoding_restores_them() {
    let bytes: Vec<u8> = (0..=255).collect();

    let blob = EncodedBlob::encode(&bytes, "image/png");

    assert_eq!(blob.mime_type, "image/png");
    assert_eq!(blob.byte_size, 256);
    assert_eq!(blob.decode().unwrap(), bytes);
}

#[test]
fn given_extracted_content_when_wrapped_then_reports_extracted_state_and_metadata() {
    let content = ExtractedContent::from_text("hello")
        .with_metadata("rows", 3)
        .with_metadata("columns", vec!["colA", "colB"]);

    let payload = NormalizedPayload::Extracted(content);

    assert_eq!(payload.state(), FileState::Extracted);
    assert_eq!(payload.metadata()["rows"], 3);
    assert_eq!(payload.metadata()["columns"][1], "colB");
}

#[test]
fn given_encoded_blob_when_wrapped_then_reports_encoded_state() {
    let payload = NormalizedPayload::Encoded(EncodedBlob::encode(b"abc", "audio/mpeg"));

    assert_eq!(payload.state(), FileState::Encoded);
}
