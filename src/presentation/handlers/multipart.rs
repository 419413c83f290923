use axum::extract::multipart::{Field, MultipartError};
use bytes::BytesMut;

use crate::domain::UploadedFile;

/// Reads a file field chunk by chunk. Buffering stops once `max_bytes` is
/// exceeded; the returned file then carries the size seen so far, which is
/// enough for the size check to reject it.
pub async fn read_upload(
    mut field: Field<'_>,
    max_bytes: u64,
) -> Result<UploadedFile, MultipartError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);

    let mut buffer = BytesMut::new();
    let mut seen: u64 = 0;

    while let Some(chunk) = field.chunk().await? {
        seen += chunk.len() as u64;
        if seen > max_bytes {
            tracing::warn!(filename = %filename, seen, max_bytes, "Upload exceeds size limit");
            break;
        }
        buffer.extend_from_slice(&chunk);
    }

    let mut file = UploadedFile::new(filename, buffer.freeze()).with_declared_size(seen);
    if let Some(content_type) = content_type {
        file = file.with_content_type(content_type);
    }

    Ok(file)
}
