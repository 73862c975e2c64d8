use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ports::LlmClient;
use crate::domain::{AnalysisHints, AudioPayload, RawInput};
use crate::presentation::state::AppState;

use super::dto::{AnalyzeRequest, AnalyzeResponse};
use super::error::error_response;

/// Recording flow: manual text, live captured text and/or a base64 recording.
#[tracing::instrument(skip(state, payload))]
pub async fn analyze_handler<L>(
    State(state): State<AppState<L>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response
where
    L: LlmClient + 'static,
{
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed analyze request");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    let audio = request
        .audio_base64
        .filter(|data| !data.trim().is_empty())
        .map(AudioPayload::recorded);
    let input = RawInput::new(request.manual_text, request.captured_text, audio);

    let expected_topic = request
        .expected_topic
        .or_else(|| state.settings.analysis.default_topic.clone());
    let hints = AnalysisHints::new(request.language_hint, expected_topic);

    tracing::debug!(
        has_manual = input.manual_text().is_some(),
        has_captured = input.captured_text().is_some(),
        audio_source = input.audio_source().as_str(),
        "Analyze request received"
    );

    match state.pipeline.analyze(input, hints).await {
        Ok(outcome) => (StatusCode::OK, Json(AnalyzeResponse::from(outcome))).into_response(),
        Err(e) => e.into_response(),
    }
}
