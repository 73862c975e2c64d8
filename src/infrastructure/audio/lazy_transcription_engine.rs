use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

type EngineInit =
    dyn Fn() -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> + Send + Sync;

/// Process-wide engine built on first use.
///
/// Concurrent first callers wait on a single initialization. The load runs on
/// its own task, so a caller that gives up (timeout, dropped request) leaves it
/// running and later callers pick up the result. A failed initialization is not
/// cached, so the next call tries again. The engine is read-only once built.
pub struct LazyTranscriptionEngine {
    init: Arc<EngineInit>,
    engine: Arc<OnceCell<Arc<dyn TranscriptionEngine>>>,
}

impl LazyTranscriptionEngine {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            init: Arc::new(init),
            engine: Arc::new(OnceCell::new()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.engine.initialized()
    }

    pub async fn engine(&self) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        if let Some(engine) = self.engine.get() {
            return Ok(Arc::clone(engine));
        }

        let cell = Arc::clone(&self.engine);
        let init = Arc::clone(&self.init);

        tokio::spawn(async move {
            cell.get_or_try_init(|| async move {
                let started = Instant::now();

                // Model loading does blocking file and network IO.
                let engine = tokio::task::spawn_blocking(move || init())
                    .await
                    .map_err(|e| TranscriptionError::ModelLoadFailed(format!("init task: {}", e)))??;

                tracing::info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Transcription engine initialized"
                );
                Ok::<_, TranscriptionError>(engine)
            })
            .await
            .map(Arc::clone)
        })
        .await
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("init task: {}", e)))?
    }
}

#[async_trait]
impl TranscriptionEngine for LazyTranscriptionEngine {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        self.engine().await?.transcribe(audio_path).await
    }
}
