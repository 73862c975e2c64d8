use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::AnalysisOutcome;
use crate::domain::{Metrics, PhonemeMap, TranscriptOrigin};

/// Body of `POST /api/v1/analyze`, as produced by the recording widget.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub manual_text: Option<String>,
    #[serde(default)]
    pub captured_text: Option<String>,
    /// Base64 recording, bare or as a `data:` URL.
    #[serde(default)]
    pub audio_base64: Option<String>,
    #[serde(default)]
    pub language_hint: Option<String>,
    #[serde(default)]
    pub expected_topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: String,
    pub transcript: String,
    pub transcript_origin: TranscriptOrigin,
    pub metrics: Metrics,
    pub phonemes: PhonemeMap,
    pub report: String,
    pub generated_at: DateTime<Utc>,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            session_id: outcome.session_id.to_string(),
            transcript_origin: outcome.transcript.origin(),
            transcript: outcome.transcript.to_string(),
            metrics: outcome.metrics,
            phonemes: outcome.phonemes,
            report: outcome.report.content,
            generated_at: outcome.report.generated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub topic: Option<String>,
}
