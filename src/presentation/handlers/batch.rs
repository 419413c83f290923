use std::collections::HashMap;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::GenerativeModel;
use crate::domain::{BatchRequest, BatchResult, ModelResponse};
use crate::presentation::state::AppState;

use super::error_response::ErrorResponse;
use super::multipart::read_upload;

const FILES_FIELD: &str = "files";
const PROMPTS_FIELD: &str = "prompts";

#[derive(Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub results: Vec<BatchResultItem>,
    pub errors: Vec<BatchErrorItem>,
}

#[derive(Serialize)]
pub struct BatchResultItem {
    pub file_id: String,
    pub success: bool,
    pub prompt: String,
    pub summary: ModelResponse,
}

#[derive(Serialize)]
pub struct BatchErrorItem {
    pub file_id: String,
    pub error: String,
}

impl From<BatchResult> for BatchResponse {
    fn from(result: BatchResult) -> Self {
        Self {
            success: result.success(),
            results: result
                .successes
                .into_iter()
                .map(|s| BatchResultItem {
                    file_id: s.file_id,
                    success: true,
                    prompt: s.prompt,
                    summary: s.response,
                })
                .collect(),
            errors: result
                .failures
                .into_iter()
                .map(|f| BatchErrorItem {
                    file_id: f.file_id,
                    error: f.error,
                })
                .collect(),
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn batch_handler<M>(
    State(state): State<AppState<M>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    M: GenerativeModel + 'static,
{
    let max_bytes = state.batch_orchestrator.validator().max_file_size_bytes();
    let mut files = Vec::new();
    let mut prompts: HashMap<String, String> = HashMap::new();
    let mut oversize_seen = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            // The unread tail of an oversize file can exceed the request body
            // limit. Files read so far are still processed.
            Err(e) if oversize_seen => {
                tracing::warn!(error = %e, "Stopped reading batch after oversize file");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return ErrorResponse::new(format!("Failed to read multipart: {}", e))
                    .into_response_with(e.status());
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILES_FIELD) => match read_upload(field, max_bytes).await {
                Ok(file) => {
                    oversize_seen |= file.declared_size > max_bytes;
                    files.push(file);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read file bytes");
                    return ErrorResponse::new(format!("Failed to read file: {}", e))
                        .into_response_with(e.status());
                }
            },
            Some(PROMPTS_FIELD) => {
                let raw = match field.text().await {
                    Ok(raw) => raw,
                    Err(e) => {
                        return ErrorResponse::new(format!("Failed to read prompts: {}", e))
                            .into_response_with(e.status());
                    }
                };
                if raw.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str(&raw) {
                    Ok(parsed) => prompts = parsed,
                    Err(e) => {
                        tracing::warn!(error = %e, "Invalid prompts field");
                        return ErrorResponse::new(format!("Invalid prompts JSON: {}", e))
                            .into_response_with(StatusCode::BAD_REQUEST);
                    }
                }
            }
            other => tracing::debug!(field = ?other, "Ignoring multipart field"),
        }
    }

    tracing::info!(files = files.len(), prompts = prompts.len(), "Batch received");

    let result = state
        .batch_orchestrator
        .run(BatchRequest::new(files, prompts))
        .await;

    (StatusCode::OK, Json(BatchResponse::from(result))).into_response()
}
