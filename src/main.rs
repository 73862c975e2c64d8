use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use speechlens::application::services::{
    AnalysisPipeline, AssessmentService, AudioDecoder, PhoneticAnnotator, TranscriptResolver,
};
use speechlens::infrastructure::audio::{
    LazyTranscriptionEngine, SymphoniaAudioProbe, TranscriptionEngineFactory,
};
use speechlens::infrastructure::llm::OpenAiClient;
use speechlens::infrastructure::observability::{TracingConfig, init_tracing};
use speechlens::infrastructure::phonemes::CmuDictionary;
use speechlens::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;

    // A missing assessment credential is fatal before anything is served.
    let settings = Arc::new(Settings::load(environment)?);

    init_tracing(&TracingConfig::new(environment, &settings.logging));

    let dictionary = Arc::new(
        CmuDictionary::from_path(&settings.phonemes.dictionary_path)
            .context("loading phoneme dictionary")?,
    );

    let transcription_settings = settings.transcription.clone();
    let transcription_engine = Arc::new(LazyTranscriptionEngine::new(move || {
        TranscriptionEngineFactory::create(&transcription_settings)
    }));

    let llm_client = Arc::new(OpenAiClient::new(&settings.assessment)?);

    let pipeline = Arc::new(AnalysisPipeline::new(
        AudioDecoder::new(Arc::new(SymphoniaAudioProbe)),
        TranscriptResolver::new(
            transcription_engine,
            Duration::from_secs(settings.transcription.timeout_secs),
        ),
        PhoneticAnnotator::new(dictionary),
        AssessmentService::new(
            llm_client,
            Duration::from_secs(settings.assessment.timeout_secs),
        ),
    ));

    let state = AppState {
        pipeline,
        settings: Arc::clone(&settings),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(
        %addr,
        transcription_provider = ?settings.transcription.provider,
        assessment_model = %settings.assessment.model,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
