use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tempfile::TempDir;

use lumen_relay::application::ports::ExtractionError;
use lumen_relay::application::services::{
    ContentNormalizer, NormalizeError, NormalizeMode, WorkerPool,
};
use lumen_relay::domain::{FileState, FileTypeRegistry, NormalizedPayload, UploadedFile};
use lumen_relay::infrastructure::text_processing::CompositeExtractor;

use crate::helpers::{FAKE_PDF, staged_files};

fn normalizer(staging_dir: &Path) -> ContentNormalizer {
    ContentNormalizer::new(
        Arc::new(FileTypeRegistry::builtin()),
        Arc::new(CompositeExtractor::with_defaults()),
        WorkerPool::new(2),
        staging_dir.to_path_buf(),
    )
}

#[tokio::test]
async fn given_image_when_normalizing_then_encodes_with_registry_mime() {
    let staging = TempDir::new().unwrap();
    let bytes = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3];
    let file = UploadedFile::new("photo.png", bytes.clone());

    let payload = normalizer(staging.path())
        .normalize(&file, NormalizeMode::ByFileType)
        .await
        .unwrap();

    let NormalizedPayload::Encoded(blob) = payload else {
        panic!("expected an encoded payload");
    };
    assert_eq!(blob.mime_type, "image/png");
    assert_eq!(blob.decode().unwrap(), bytes);
    assert_eq!(staged_files(staging.path()), 0);
}

#[tokio::test]
async fn given_unknown_extension_when_normalizing_then_falls_back_to_octet_stream() {
    let staging = TempDir::new().unwrap();
    let file = UploadedFile::new("data.bin", vec![1, 2, 3]);

    let payload = normalizer(staging.path())
        .normalize(&file, NormalizeMode::ByFileType)
        .await
        .unwrap();

    assert!(matches!(
        payload,
        NormalizedPayload::Encoded(ref blob) if blob.mime_type == "application/octet-stream"
    ));
}

#[tokio::test]
async fn given_pdf_in_pass_through_mode_when_normalizing_then_skips_text_extraction() {
    let staging = TempDir::new().unwrap();
    let file = UploadedFile::new("paper.pdf", Bytes::from_static(FAKE_PDF));

    let payload = normalizer(staging.path())
        .normalize(&file, NormalizeMode::PassThrough)
        .await
        .unwrap();

    assert_eq!(payload.state(), FileState::Encoded);
    assert_eq!(staged_files(staging.path()), 0);
}

#[tokio::test]
async fn given_pdf_without_signature_when_normalizing_inline_then_rejects_and_leaves_no_staging_file() {
    let staging = TempDir::new().unwrap();
    let file = UploadedFile::new("fake.pdf", b"hello world".to_vec());

    let result = normalizer(staging.path())
        .normalize(&file, NormalizeMode::PassThrough)
        .await;

    assert!(matches!(
        result,
        Err(NormalizeError::Extraction(ExtractionError::Malformed(..)))
    ));
    assert_eq!(staged_files(staging.path()), 0);
}

#[tokio::test]
async fn given_missing_staging_dir_when_normalizing_inline_then_reports_staging_error() {
    let staging = TempDir::new().unwrap();
    let missing = staging.path().join("does-not-exist");
    let file = UploadedFile::new("photo.png", vec![1, 2, 3]);

    let result = normalizer(&missing)
        .normalize(&file, NormalizeMode::ByFileType)
        .await;

    assert!(matches!(
        result,
        Err(NormalizeError::Extraction(ExtractionError::Staging(_)))
    ));
}

#[tokio::test]
async fn given_empty_upload_when_normalizing_then_rejects_as_empty() {
    let staging = TempDir::new().unwrap();
    let file = UploadedFile::new("empty.csv", Vec::new());

    let result = normalizer(staging.path())
        .normalize(&file, NormalizeMode::ByFileType)
        .await;

    assert!(matches!(
        result,
        Err(NormalizeError::Extraction(ExtractionError::EmptyFile(_)))
    ));
}

#[tokio::test]
async fn given_csv_when_normalizing_then_extracts_table_and_metadata() {
    let staging = TempDir::new().unwrap();
    let file = UploadedFile::new("report.csv", b"colA,colB\n1,x\n22,yy\n333,zzz\n".to_vec());

    let payload = normalizer(staging.path())
        .normalize(&file, NormalizeMode::ByFileType)
        .await
        .unwrap();

    let NormalizedPayload::Extracted(content) = payload else {
        panic!("expected extracted content");
    };
    assert_eq!(content.metadata["rows"], 3);
    assert_eq!(content.metadata["columns"], serde_json::json!(["colA", "colB"]));
    assert!(content.text.contains("333   zzz"));
}
