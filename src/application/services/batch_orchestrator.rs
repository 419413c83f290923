use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};

use crate::application::ports::GenerativeModel;
use crate::domain::{BatchFailure, BatchRequest, BatchResult, BatchSuccess, UploadedFile};

use super::analysis_service::{AnalysisError, AnalysisService, FileAnalysis};
use super::content_normalizer::NormalizeMode;
use super::upload_validator::UploadValidator;

/// Runs the single-file pipeline over many files. Files are processed
/// concurrently, at most `concurrency` at a time, and reported in input order.
pub struct BatchOrchestrator<M>
where
    M: GenerativeModel,
{
    analysis: Arc<AnalysisService<M>>,
    validator: Arc<UploadValidator>,
    concurrency: usize,
}

type ItemOutcome = (String, Result<FileAnalysis, AnalysisError>);

impl<M> BatchOrchestrator<M>
where
    M: GenerativeModel + 'static,
{
    pub fn new(
        analysis: Arc<AnalysisService<M>>,
        validator: UploadValidator,
        concurrency: usize,
    ) -> Self {
        Self {
            analysis,
            validator: Arc::new(validator),
            concurrency: concurrency.max(1),
        }
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    #[tracing::instrument(skip_all, fields(files = request.files.len()))]
    pub async fn run(&self, request: BatchRequest) -> BatchResult {
        let BatchRequest { files, prompts } = request;

        // Each item owns its file and prompt so the futures carry no borrows.
        let pending: Vec<BoxFuture<'static, ItemOutcome>> = files
            .into_iter()
            .map(|file| {
                let prompt = prompts.get(&file.filename).cloned();
                let analysis = Arc::clone(&self.analysis);
                let validator = Arc::clone(&self.validator);
                async move {
                    let outcome =
                        Self::process_one(&analysis, &validator, &file, prompt.as_deref()).await;
                    (file.filename, outcome)
                }
                .boxed()
            })
            .collect();

        let outcomes: Vec<ItemOutcome> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut result = BatchResult::default();
        for (file_id, outcome) in outcomes {
            match outcome {
                Ok(analysis) => result.successes.push(BatchSuccess {
                    file_id,
                    prompt: analysis.prompt,
                    response: analysis.analysis,
                }),
                Err(e) => {
                    tracing::warn!(file_id = %file_id, error = %e, "Batch item failed");
                    result.failures.push(BatchFailure {
                        file_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            succeeded = result.successes.len(),
            failed = result.failures.len(),
            "Batch complete"
        );

        result
    }

    async fn process_one(
        analysis: &AnalysisService<M>,
        validator: &UploadValidator,
        file: &UploadedFile,
        prompt: Option<&str>,
    ) -> Result<FileAnalysis, AnalysisError> {
        let extension = validator.validate(file.declared_size, &file.filename)?;
        analysis
            .analyze_validated(file, &extension, prompt, NormalizeMode::PassThrough)
            .await
    }
}
