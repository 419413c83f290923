use std::sync::Arc;

use crate::application::ports::{ContentExtractor, GenerativeModel};
use crate::application::services::{
    AnalysisService, BatchOrchestrator, ChatService, ContentNormalizer, ModelInvoker,
    PromptBuilder, UploadValidator, WorkerPool,
};
use crate::infrastructure::text_processing::CompositeExtractor;
use crate::presentation::config::Settings;

pub struct AppState<M>
where
    M: GenerativeModel,
{
    pub analysis_service: Arc<AnalysisService<M>>,
    pub batch_orchestrator: Arc<BatchOrchestrator<M>>,
    pub chat_service: Arc<ChatService<M>>,
    pub settings: Arc<Settings>,
}

impl<M> AppState<M>
where
    M: GenerativeModel + 'static,
{
    /// Wires the services around a model client, using the default
    /// extractors.
    pub fn new(settings: Settings, model: Arc<M>, pool: WorkerPool) -> Self {
        Self::with_extractor(
            settings,
            model,
            pool,
            Arc::new(CompositeExtractor::with_defaults()),
        )
    }

    pub fn with_extractor(
        settings: Settings,
        model: Arc<M>,
        pool: WorkerPool,
        extractor: Arc<dyn ContentExtractor>,
    ) -> Self {
        let registry = Arc::new(settings.registry());
        let max_file_size = settings.upload.max_file_size_bytes;

        let normalizer = Arc::new(ContentNormalizer::new(
            Arc::clone(&registry),
            extractor,
            pool.clone(),
            settings.upload.staging_dir.clone(),
        ));
        let prompt_builder = Arc::new(PromptBuilder::new(Arc::clone(&registry)));
        let invoker = Arc::new(ModelInvoker::new(model, pool.clone()));

        let analysis_service = Arc::new(AnalysisService::new(
            UploadValidator::new(max_file_size, &settings.upload.allowed_extensions),
            normalizer,
            prompt_builder,
            Arc::clone(&invoker),
        ));

        let batch_orchestrator = Arc::new(BatchOrchestrator::new(
            Arc::clone(&analysis_service),
            UploadValidator::new(max_file_size, &settings.batch.allowed_extensions),
            pool.size(),
        ));

        let chat_service = Arc::new(ChatService::new(invoker));

        Self {
            analysis_service,
            batch_orchestrator,
            chat_service,
            settings: Arc::new(settings),
        }
    }
}

impl<M> Clone for AppState<M>
where
    M: GenerativeModel,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            batch_orchestrator: Arc::clone(&self.batch_orchestrator),
            chat_service: Arc::clone(&self.chat_service),
            settings: Arc::clone(&self.settings),
        }
    }
}
