use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::ports::{
    ExtractionError, GenerationRequest, GenerativeModel, ModelInvocationError,
};
use crate::domain::{
    AnalysisPrompt, FileInfo, FileState, ModelResponse, NormalizedPayload, UploadedFile,
};

use super::content_normalizer::{ContentNormalizer, NormalizeError, NormalizeMode};
use super::model_invoker::{InvocationError, ModelInvoker};
use super::prompt_builder::PromptBuilder;
use super::upload_validator::{UploadValidator, ValidationError};
use super::worker_pool::WorkerPoolError;

/// Outcome of the single-file pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAnalysis {
    pub file_name: String,
    pub prompt: String,
    pub analysis: ModelResponse,
    pub metadata: Map<String, Value>,
}

/// Validator → normalizer → prompt builder → model invoker.
pub struct AnalysisService<M>
where
    M: GenerativeModel,
{
    validator: UploadValidator,
    normalizer: Arc<ContentNormalizer>,
    prompt_builder: Arc<PromptBuilder>,
    invoker: Arc<ModelInvoker<M>>,
}

impl<M> AnalysisService<M>
where
    M: GenerativeModel + 'static,
{
    pub fn new(
        validator: UploadValidator,
        normalizer: Arc<ContentNormalizer>,
        prompt_builder: Arc<PromptBuilder>,
        invoker: Arc<ModelInvoker<M>>,
    ) -> Self {
        Self {
            validator,
            normalizer,
            prompt_builder,
            invoker,
        }
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    #[tracing::instrument(skip(self, file, user_prompt), fields(filename = %file.filename))]
    pub async fn analyze(
        &self,
        file: &UploadedFile,
        user_prompt: Option<&str>,
    ) -> Result<FileAnalysis, AnalysisError> {
        let extension = self.validator.validate(file.declared_size, &file.filename)?;
        self.analyze_validated(file, &extension, user_prompt, NormalizeMode::ByFileType)
            .await
    }

    /// Runs the pipeline for a file whose extension was already checked by
    /// the caller.
    pub async fn analyze_validated(
        &self,
        file: &UploadedFile,
        extension: &str,
        user_prompt: Option<&str>,
        mode: NormalizeMode,
    ) -> Result<FileAnalysis, AnalysisError> {
        let payload = self.normalizer.normalize(file, mode).await?;
        let instruction = self
            .prompt_builder
            .build(&file.filename, extension, user_prompt);

        let prompt = AnalysisPrompt::new(instruction.clone());
        let request = match &payload {
            NormalizedPayload::Extracted(content) => {
                GenerationRequest::from_prompt(&prompt.with_embedded_text(&content.text), None)
            }
            NormalizedPayload::Encoded(blob) => GenerationRequest::from_prompt(&prompt, Some(blob)),
        };

        tracing::debug!(state = %payload.state(), "Invoking model");
        let analysis = self.invoker.invoke(request).await?;

        let file_info = FileInfo {
            name: file.filename.clone(),
            mime_type: self.normalizer.registry().mime_type(extension).to_string(),
            byte_size: file.data.len() as u64,
            state: FileState::Analyzed,
        };

        tracing::info!(
            has_text = analysis.text.is_some(),
            "File analysis complete"
        );

        Ok(FileAnalysis {
            file_name: file.filename.clone(),
            prompt: instruction,
            analysis: analysis.with_file_info(file_info),
            metadata: payload.metadata(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Error processing file: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Error analyzing content: {0}")]
    ModelInvocation(#[from] ModelInvocationError),
    #[error(transparent)]
    WorkerPool(#[from] WorkerPoolError),
}

impl From<NormalizeError> for AnalysisError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Extraction(e) => AnalysisError::Extraction(e),
            NormalizeError::WorkerPool(e) => AnalysisError::WorkerPool(e),
        }
    }
}

impl From<InvocationError> for AnalysisError {
    fn from(err: InvocationError) -> Self {
        match err {
            InvocationError::Model(e) => AnalysisError::ModelInvocation(e),
            InvocationError::WorkerPool(e) => AnalysisError::WorkerPool(e),
        }
    }
}
