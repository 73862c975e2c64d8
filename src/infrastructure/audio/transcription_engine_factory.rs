use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProvider, TranscriptionSettings};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

/// Hugging Face repo loaded when the local provider has no model configured.
pub const DEFAULT_LOCAL_MODEL: &str = "openai/whisper-base";

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match settings.provider {
            TranscriptionProvider::Local => {
                let engine = CandleWhisperEngine::new(
                    settings.model.as_deref().unwrap_or(DEFAULT_LOCAL_MODEL),
                )?;
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| {
                        TranscriptionError::ModelLoadFailed(
                            "API key required for OpenAI Whisper".to_string(),
                        )
                    })?;
                let engine = OpenAiWhisperEngine::new(
                    key,
                    settings.base_url.clone(),
                    settings.model.clone(),
                    Duration::from_secs(settings.timeout_secs),
                )?;
                Ok(Arc::new(engine))
            }
        }
    }
}
