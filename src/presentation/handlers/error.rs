use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::AnalysisError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn status_for(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::NoInputProvided => StatusCode::BAD_REQUEST,
        AnalysisError::DecodeFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::TranscriptionFailure(_) | AnalysisError::ReportGenerationFailure(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        error_response(status_for(&self), self.to_string())
    }
}
