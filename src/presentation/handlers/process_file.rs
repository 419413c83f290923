use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::GenerativeModel;
use crate::domain::{ModelResponse, UploadedFile};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::{ErrorResponse, analysis_error_status};
use super::multipart::read_upload;

const FILE_FIELD: &str = "file";
const PROMPT_FIELD: &str = "prompt";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessFileResponse {
    pub success: bool,
    pub file_name: String,
    pub analysis: ModelResponse,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_file_handler<M>(
    State(state): State<AppState<M>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    M: GenerativeModel + 'static,
{
    let validator = state.analysis_service.validator();
    let mut upload: Option<UploadedFile> = None;
    let mut prompt: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return ErrorResponse::new(format!("Failed to read multipart: {}", e))
                    .into_response_with(e.status());
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    return ErrorResponse::new("No file selected")
                        .into_response_with(StatusCode::BAD_REQUEST);
                }

                if let Err(e) = validator.check_extension(&filename) {
                    tracing::warn!(filename = %filename, error = %e, "Rejected upload");
                    return ErrorResponse::for_file(filename, e.to_string())
                        .into_response_with(StatusCode::BAD_REQUEST);
                }

                match read_upload(field, validator.max_file_size_bytes()).await {
                    // Rejected here, before the rest of an oversize body is drained.
                    Ok(file) => {
                        if let Err(e) = validator.check_size(file.declared_size) {
                            tracing::warn!(filename = %filename, error = %e, "Rejected upload");
                            return ErrorResponse::for_file(filename, e.to_string())
                                .into_response_with(StatusCode::BAD_REQUEST);
                        }
                        upload = Some(file);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return ErrorResponse::for_file(filename, format!("Failed to read file: {}", e))
                            .into_response_with(e.status());
                    }
                }
            }
            Some(PROMPT_FIELD) => match field.text().await {
                Ok(text) => prompt = Some(text),
                Err(e) => {
                    return ErrorResponse::new(format!("Failed to read prompt: {}", e))
                        .into_response_with(e.status());
                }
            },
            other => tracing::debug!(field = ?other, "Ignoring multipart field"),
        }
    }

    let Some(file) = upload else {
        tracing::warn!("Process request with no file");
        return ErrorResponse::new("No file uploaded").into_response_with(StatusCode::BAD_REQUEST);
    };

    if let Some(prompt) = prompt.as_deref() {
        tracing::debug!(prompt = %sanitize_prompt(prompt), "Custom prompt supplied");
    }

    match state
        .analysis_service
        .analyze(&file, prompt.as_deref())
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ProcessFileResponse {
                success: true,
                file_name: result.file_name,
                analysis: result.analysis,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = analysis_error_status(&e);
            tracing::error!(filename = %file.filename, error = %e, status = %status, "File processing failed");
            ErrorResponse::for_file(file.filename.clone(), e.to_string()).into_response_with(status)
        }
    }
}
