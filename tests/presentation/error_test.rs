use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;

use speechlens::application::ports::{LlmClientError, TranscriptionError};
use speechlens::application::services::{AnalysisError, AudioDecoderError};
use speechlens::presentation::handlers::status_for;

#[test]
fn given_each_analysis_error_when_mapping_then_uses_expected_status() {
    assert_eq!(
        status_for(&AnalysisError::NoInputProvided),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(&AnalysisError::DecodeFailure(AudioDecoderError::EmptyPayload)),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        status_for(&AnalysisError::TranscriptionFailure(
            TranscriptionError::TimedOut(Duration::from_secs(300))
        )),
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(
        status_for(&AnalysisError::ReportGenerationFailure(
            LlmClientError::RateLimited
        )),
        StatusCode::BAD_GATEWAY
    );
}

#[tokio::test]
async fn given_analysis_error_when_converted_to_response_then_body_carries_message() {
    let response = AnalysisError::NoInputProvided.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json["error"],
        "No audio or transcription provided. Please record or enter text before analyzing."
    );
}
