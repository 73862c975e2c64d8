use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use speechlens::application::ports::{TranscriptionEngine, TranscriptionError};
use speechlens::application::services::TranscriptResolver;
use speechlens::domain::{AudioPayload, RawInput, TempAudioResource, TranscriptOrigin};
use speechlens::infrastructure::audio::LazyTranscriptionEngine;

use crate::helpers::{
    FailingTranscriptionEngine, SlowTranscriptionEngine, SpyTranscriptionEngine, TEST_TIMEOUT,
};

fn staged_audio() -> TempAudioResource {
    let mut file = tempfile::Builder::new()
        .suffix(".webm")
        .tempfile()
        .unwrap();
    file.write_all(b"webm").unwrap();
    TempAudioResource::new(file.into_temp_path())
}

fn recording() -> Option<AudioPayload> {
    Some(AudioPayload::recorded("d2VibQ=="))
}

#[tokio::test]
async fn given_manual_text_and_audio_when_resolving_then_manual_wins_without_asr() {
    let engine = Arc::new(SpyTranscriptionEngine::new("from audio"));
    let resolver = TranscriptResolver::new(Arc::clone(&engine) as Arc<dyn TranscriptionEngine>, TEST_TIMEOUT);
    let input = RawInput::new(
        Some("typed by hand".to_string()),
        Some("captured live".to_string()),
        recording(),
    );
    let audio = staged_audio();

    let transcript = resolver.resolve(&input, Some(&audio)).await.unwrap();

    assert_eq!(transcript.as_str(), "typed by hand");
    assert_eq!(transcript.origin(), TranscriptOrigin::Manual);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_audio_and_captured_text_when_resolving_then_asr_output_wins() {
    let engine = Arc::new(SpyTranscriptionEngine::new("from audio"));
    let resolver = TranscriptResolver::new(Arc::clone(&engine) as Arc<dyn TranscriptionEngine>, TEST_TIMEOUT);
    let input = RawInput::new(None, Some("captured live".to_string()), recording());
    let audio = staged_audio();

    let transcript = resolver.resolve(&input, Some(&audio)).await.unwrap();

    assert_eq!(transcript.as_str(), "from audio");
    assert_eq!(transcript.origin(), TranscriptOrigin::Audio);
    assert_eq!(engine.seen_paths()[0].0, audio.path());
}

#[tokio::test]
async fn given_only_captured_text_when_resolving_then_captured_text_is_used() {
    let engine = Arc::new(SpyTranscriptionEngine::new("from audio"));
    let resolver = TranscriptResolver::new(Arc::clone(&engine) as Arc<dyn TranscriptionEngine>, TEST_TIMEOUT);
    let input = RawInput::new(None, Some("captured live".to_string()), None);

    let transcript = resolver.resolve(&input, None).await.unwrap();

    assert_eq!(transcript.as_str(), "captured live");
    assert_eq!(transcript.origin(), TranscriptOrigin::Captured);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_nothing_when_resolving_then_returns_empty_sentinel() {
    let resolver = TranscriptResolver::new(Arc::new(SpyTranscriptionEngine::new("x")), TEST_TIMEOUT);

    let transcript = resolver.resolve(&RawInput::default(), None).await.unwrap();

    assert!(transcript.is_empty());
    assert_eq!(transcript.origin(), TranscriptOrigin::None);
}

#[tokio::test]
async fn given_failing_engine_when_resolving_audio_then_error_propagates() {
    let resolver = TranscriptResolver::new(Arc::new(FailingTranscriptionEngine), TEST_TIMEOUT);
    let input = RawInput::new(None, Some("fallback".to_string()), recording());
    let audio = staged_audio();

    let result = resolver.resolve(&input, Some(&audio)).await;

    assert!(matches!(
        result,
        Err(TranscriptionError::TranscriptionFailed(_))
    ));
}

#[tokio::test]
async fn given_slow_engine_when_resolving_audio_then_times_out() {
    let timeout = Duration::from_millis(20);
    let resolver = TranscriptResolver::new(
        Arc::new(SlowTranscriptionEngine(Duration::from_secs(5))),
        timeout,
    );
    let input = RawInput::new(None, None, recording());
    let audio = staged_audio();

    let result = resolver.resolve(&input, Some(&audio)).await;

    assert!(matches!(result, Err(TranscriptionError::TimedOut(d)) if d == timeout));
}

#[tokio::test]
async fn given_model_load_slower_than_timeout_when_resolving_twice_then_model_loads_once() {
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&inits);
    let engine = Arc::new(LazyTranscriptionEngine::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(400));
        Ok(Arc::new(SpyTranscriptionEngine::new("loaded")) as Arc<dyn TranscriptionEngine>)
    }));
    let resolver = TranscriptResolver::new(
        Arc::clone(&engine) as Arc<dyn TranscriptionEngine>,
        Duration::from_millis(100),
    );
    let input = RawInput::new(None, None, recording());
    let audio = staged_audio();

    let first = resolver.resolve(&input, Some(&audio)).await;
    let second = resolver.resolve(&input, Some(&audio)).await;
    assert!(matches!(first, Err(TranscriptionError::TimedOut(_))));
    assert!(matches!(second, Err(TranscriptionError::TimedOut(_))));

    tokio::time::sleep(Duration::from_millis(800)).await;

    assert_eq!(inits.load(Ordering::SeqCst), 1);
    assert!(engine.is_loaded());
    let third = resolver.resolve(&input, Some(&audio)).await.unwrap();
    assert_eq!(third.as_str(), "loaded");
}
