use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ports::LlmClient;
use crate::domain::{AnalysisHints, AudioPayload, RawInput};
use crate::presentation::state::AppState;

use super::dto::AnalyzeResponse;
use super::error::error_response;

/// Upload flow: a WAV/MP3 file is always transcribed; text fields other
/// than the hints are ignored.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<L>(
    State(state): State<AppState<L>>,
    mut multipart: Multipart,
) -> Response
where
    L: LlmClient + 'static,
{
    let max_bytes = state.settings.analysis.max_upload_bytes();
    let mut audio: Option<AudioPayload> = None;
    let mut language_hint: Option<String> = None;
    let mut expected_topic: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(e.status(), format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let data = match field.bytes().await {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read uploaded file");
                        return error_response(e.status(), format!("Failed to read file: {}", e));
                    }
                };
                if data.len() > max_bytes {
                    return error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        format!("Audio file exceeds {} bytes", max_bytes),
                    );
                }
                tracing::debug!(bytes = data.len(), file_name = ?file_name, "Audio upload received");
                audio = Some(AudioPayload::uploaded(data.to_vec(), file_name.as_deref()));
            }
            "language_hint" | "expected_topic" => {
                let value = match field.text().await {
                    Ok(value) => value,
                    Err(e) => {
                        return error_response(e.status(), format!("Failed to read {}: {}", name, e));
                    }
                };
                if name == "language_hint" {
                    language_hint = Some(value);
                } else {
                    expected_topic = Some(value);
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let Some(audio) = audio else {
        tracing::warn!("Upload request with no file");
        return error_response(StatusCode::BAD_REQUEST, "No audio file uploaded");
    };

    let input = RawInput::from_upload(audio);
    let hints = AnalysisHints::new(language_hint, expected_topic);

    match state.pipeline.analyze(input, hints).await {
        Ok(outcome) => (StatusCode::OK, Json(AnalyzeResponse::from(outcome))).into_response(),
        Err(e) => e.into_response(),
    }
}
