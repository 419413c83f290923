use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::GenerativeModel;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    fn failed(error: String) -> Self {
        Self {
            success: false,
            response: String::new(),
            error: Some(error),
        }
    }
}

/// Failures are reported inside a 200 body.
#[tracing::instrument(skip(state, payload))]
pub async fn chat_handler<M>(
    State(state): State<AppState<M>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse
where
    M: GenerativeModel + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Invalid chat request");
            return (
                StatusCode::OK,
                Json(ChatResponse::failed(format!("Invalid request: {}", rejection.body_text()))),
            );
        }
    };

    tracing::debug!(message = %sanitize_prompt(&request.message), "Chat request");

    let response = match state
        .chat_service
        .chat(&request.message, request.system_prompt.as_deref())
        .await
    {
        Ok(text) => ChatResponse {
            success: true,
            response: text,
            error: None,
        },
        Err(e) => {
            tracing::error!(error = %e, "Chat failed");
            ChatResponse::failed(e.to_string())
        }
    };

    (StatusCode::OK, Json(response))
}
