mod analysis_service;
mod batch_orchestrator;
mod chat_service;
mod content_normalizer;
mod model_invoker;
mod prompt_builder;
mod upload_validator;
mod worker_pool;

pub use analysis_service::{AnalysisError, AnalysisService, FileAnalysis};
pub use batch_orchestrator::BatchOrchestrator;
pub use chat_service::{ChatError, ChatService, DEFAULT_SYSTEM_PROMPT, compose_chat_prompt};
pub use content_normalizer::{ContentNormalizer, NormalizeError, NormalizeMode};
pub use model_invoker::{InvocationError, ModelInvoker};
pub use prompt_builder::{PromptBuilder, render_template};
pub use upload_validator::{DEFAULT_MAX_FILE_SIZE_BYTES, UploadValidator, ValidationError};
pub use worker_pool::{DEFAULT_WORKER_POOL_SIZE, WorkerPool, WorkerPoolError};
