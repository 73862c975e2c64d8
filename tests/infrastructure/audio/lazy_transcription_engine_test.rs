use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use speechlens::application::ports::{TranscriptionEngine, TranscriptionError};
use speechlens::infrastructure::audio::LazyTranscriptionEngine;

use crate::helpers::SpyTranscriptionEngine;

#[tokio::test]
async fn given_unused_engine_when_created_then_model_is_not_loaded() {
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&inits);
    let engine = LazyTranscriptionEngine::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(SpyTranscriptionEngine::new("hi")) as Arc<dyn TranscriptionEngine>)
    });

    assert!(!engine.is_loaded());
    assert_eq!(inits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_concurrent_first_calls_when_transcribing_then_model_loads_once() {
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&inits);
    let engine = Arc::new(LazyTranscriptionEngine::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(Arc::new(SpyTranscriptionEngine::new("hello there")) as Arc<dyn TranscriptionEngine>)
    }));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.transcribe(Path::new("clip.wav")).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "hello there");
    }
    assert_eq!(inits.load(Ordering::SeqCst), 1);
    assert!(engine.is_loaded());
}

#[tokio::test]
async fn given_failed_initialization_when_called_again_then_retries() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let engine = LazyTranscriptionEngine::new(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(TranscriptionError::ModelLoadFailed("hub unreachable".to_string()))
        } else {
            Ok(Arc::new(SpyTranscriptionEngine::new("second time")) as Arc<dyn TranscriptionEngine>)
        }
    });

    let first = engine.transcribe(Path::new("clip.wav")).await;
    assert!(matches!(first, Err(TranscriptionError::ModelLoadFailed(_))));
    assert!(!engine.is_loaded());

    let second = engine.transcribe(Path::new("clip.wav")).await.unwrap();
    assert_eq!(second, "second time");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
