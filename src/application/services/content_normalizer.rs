use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{ContentExtractor, ExtractionError};
use crate::domain::{EncodedBlob, FileTypeRegistry, Handling, NormalizedPayload, UploadedFile};

use super::worker_pool::{WorkerPool, WorkerPoolError};

const PDF_SIGNATURE: &[u8] = b"%PDF-";
const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Handling comes from the file type registry.
    ByFileType,
    /// Bytes go to the model untouched, whatever the registry says.
    PassThrough,
}

/// Turns uploaded bytes into extracted text or an inline attachment.
pub struct ContentNormalizer {
    registry: Arc<FileTypeRegistry>,
    extractor: Arc<dyn ContentExtractor>,
    pool: WorkerPool,
    staging_dir: PathBuf,
}

impl ContentNormalizer {
    pub fn new(
        registry: Arc<FileTypeRegistry>,
        extractor: Arc<dyn ContentExtractor>,
        pool: WorkerPool,
        staging_dir: PathBuf,
    ) -> Self {
        Self {
            registry,
            extractor,
            pool,
            staging_dir,
        }
    }

    pub fn registry(&self) -> &FileTypeRegistry {
        &self.registry
    }

    #[tracing::instrument(
        skip(self, file),
        fields(filename = %file.filename, bytes = file.data.len())
    )]
    pub async fn normalize(
        &self,
        file: &UploadedFile,
        mode: NormalizeMode,
    ) -> Result<NormalizedPayload, NormalizeError> {
        if file.data.is_empty() {
            return Err(ExtractionError::EmptyFile(file.filename.clone()).into());
        }

        let extension = file.extension().unwrap_or_default();
        let handling = match mode {
            NormalizeMode::PassThrough => Handling::Inline,
            NormalizeMode::ByFileType => self.registry.handling(&extension),
        };

        tracing::debug!(handling = %handling, "Normalizing upload");

        let data = file.data.clone();
        let filename = file.filename.clone();

        let payload = match handling {
            Handling::Inline => {
                let mime_type = self.registry.mime_type(&extension).to_string();
                let staging_dir = self.staging_dir.clone();
                let blob = self
                    .pool
                    .run_blocking(move || {
                        stage_and_encode(&staging_dir, &filename, &extension, &data, mime_type)
                    })
                    .await??;
                NormalizedPayload::Encoded(blob)
            }
            handling => {
                let extractor = Arc::clone(&self.extractor);
                let content = self
                    .pool
                    .run_blocking(move || extractor.extract(&data, &filename, handling))
                    .await??;
                tracing::info!(
                    characters = content.text.chars().count(),
                    "Text extraction complete"
                );
                NormalizedPayload::Extracted(content)
            }
        };

        Ok(payload)
    }
}

/// Writes the upload to a named temporary file and encodes it from disk. The
/// staging file is removed when `staged` drops, on every return path.
fn stage_and_encode(
    staging_dir: &Path,
    filename: &str,
    extension: &str,
    data: &Bytes,
    mime_type: String,
) -> Result<EncodedBlob, ExtractionError> {
    if mime_type == PDF_MIME_TYPE && !data.starts_with(PDF_SIGNATURE) {
        return Err(ExtractionError::Malformed(
            filename.to_string(),
            "missing %PDF- header".to_string(),
        ));
    }

    let suffix = if extension.is_empty() {
        String::new()
    } else {
        format!(".{extension}")
    };

    let mut staged = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile_in(staging_dir)
        .map_err(|e| ExtractionError::Staging(format!("failed to create staging file: {e}")))?;

    staged
        .write_all(data)
        .and_then(|_| staged.flush())
        .map_err(|e| ExtractionError::Staging(format!("failed to write staging file: {e}")))?;

    let staged_bytes = std::fs::read(staged.path())
        .map_err(|e| ExtractionError::Staging(format!("failed to read staging file: {e}")))?;

    Ok(EncodedBlob::encode(&staged_bytes, mime_type))
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    WorkerPool(#[from] WorkerPoolError),
}
