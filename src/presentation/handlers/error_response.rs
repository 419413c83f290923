use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{AnalysisError, WorkerPoolError};

/// Failure envelope shared by the file endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            file_name: None,
            error: error.into(),
        }
    }

    pub fn for_file(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            file_name: Some(file_name.into()),
            error: error.into(),
        }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub fn analysis_error_status(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::Validation(_) | AnalysisError::Extraction(_) => StatusCode::BAD_REQUEST,
        AnalysisError::ModelInvocation(_) => StatusCode::BAD_GATEWAY,
        AnalysisError::WorkerPool(WorkerPoolError::ShuttingDown) => StatusCode::SERVICE_UNAVAILABLE,
        AnalysisError::WorkerPool(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
