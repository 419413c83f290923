use std::sync::Arc;

use crate::application::ports::{GenerationRequest, GenerativeModel, ModelInvocationError};
use crate::domain::ModelResponse;

use super::worker_pool::{WorkerPool, WorkerPoolError};

/// Runs model calls on the worker pool and normalizes whatever comes back.
pub struct ModelInvoker<M>
where
    M: GenerativeModel,
{
    model: Arc<M>,
    pool: WorkerPool,
}

impl<M> ModelInvoker<M>
where
    M: GenerativeModel + 'static,
{
    pub fn new(model: Arc<M>, pool: WorkerPool) -> Self {
        Self { model, pool }
    }

    #[tracing::instrument(skip(self, request), fields(parts = request.parts.len()))]
    pub async fn invoke(&self, request: GenerationRequest) -> Result<ModelResponse, InvocationError> {
        let model = Arc::clone(&self.model);
        let raw = self
            .pool
            .run(async move { model.generate(&request).await })
            .await??;

        let response = ModelResponse::from_raw(&raw);

        if response.is_declined() {
            tracing::warn!(
                feedback = response.prompt_feedback.as_deref().unwrap_or_default(),
                "Model returned feedback without text"
            );
        }

        Ok(response)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error(transparent)]
    Model(#[from] ModelInvocationError),
    #[error(transparent)]
    WorkerPool(#[from] WorkerPoolError),
}
