use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{RawInput, TempAudioResource, Transcript, TranscriptOrigin};

/// Picks the canonical transcript for a submission.
///
/// Precedence: manual text, then audio (through the ASR engine), then live
/// captured text, then the empty sentinel. The engine is only called when
/// no manual text was supplied.
pub struct TranscriptResolver {
    engine: Arc<dyn TranscriptionEngine>,
    timeout: Duration,
}

impl TranscriptResolver {
    pub fn new(engine: Arc<dyn TranscriptionEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub async fn resolve(
        &self,
        input: &RawInput,
        audio: Option<&TempAudioResource>,
    ) -> Result<Transcript, TranscriptionError> {
        if let Some(text) = input.manual_text() {
            if audio.is_some() {
                tracing::debug!("Manual text supplied, skipping speech recognition");
            }
            return Ok(Transcript::new(text, TranscriptOrigin::Manual));
        }

        if let Some(resource) = audio {
            let text = tokio::time::timeout(self.timeout, self.engine.transcribe(resource.path()))
                .await
                .map_err(|_| TranscriptionError::TimedOut(self.timeout))??;
            return Ok(Transcript::new(text, TranscriptOrigin::Audio));
        }

        if let Some(text) = input.captured_text() {
            return Ok(Transcript::new(text, TranscriptOrigin::Captured));
        }

        Ok(Transcript::empty())
    }
}
