use std::sync::Arc;

use crate::application::ports::{GenerationRequest, GenerativeModel};

use super::model_invoker::{InvocationError, ModelInvoker};

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Please provide clear and concise responses.";

pub struct ChatService<M>
where
    M: GenerativeModel,
{
    invoker: Arc<ModelInvoker<M>>,
}

impl<M> ChatService<M>
where
    M: GenerativeModel + 'static,
{
    pub fn new(invoker: Arc<ModelInvoker<M>>) -> Self {
        Self { invoker }
    }

    pub async fn chat(
        &self,
        message: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let prompt = compose_chat_prompt(message, system_prompt);
        let response = self.invoker.invoke(GenerationRequest::text(prompt)).await?;

        response.text.ok_or_else(|| {
            ChatError::NoText(
                response
                    .prompt_feedback
                    .unwrap_or_else(|| "no feedback".to_string()),
            )
        })
    }
}

pub fn compose_chat_prompt(message: &str, system_prompt: Option<&str>) -> String {
    let system = system_prompt
        .filter(|prompt| !prompt.trim().is_empty())
        .unwrap_or(DEFAULT_SYSTEM_PROMPT);
    format!("{system}\n\nUser: {message}\nAssistant:")
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("No message provided")]
    EmptyMessage,
    #[error("Error generating response: {0}")]
    Invocation(#[from] InvocationError),
    #[error("Model returned no text ({0})")]
    NoText(String),
}
