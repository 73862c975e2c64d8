use tracing::Instrument;

use crate::application::ports::{LlmClient, LlmClientError, TranscriptionError};
use crate::domain::{
    AnalysisHints, AnalysisReport, Metrics, PhonemeMap, RawInput, SessionId, Transcript,
};

use super::assessment_service::AssessmentService;
use super::audio_decoder::{AudioDecoder, AudioDecoderError};
use super::metric_deriver::derive_metrics;
use super::phonetic_annotator::PhoneticAnnotator;
use super::report_request_builder::ReportRequestBuilder;
use super::transcript_resolver::TranscriptResolver;

/// Everything produced for a successful submission.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub session_id: SessionId,
    pub transcript: Transcript,
    pub metrics: Metrics,
    pub phonemes: PhonemeMap,
    pub report: AnalysisReport,
}

/// Runs one submission end to end.
///
/// Audio is staged into a [`crate::domain::TempAudioResource`] whose scope
/// ends once the transcript and duration are known; every exit from that
/// scope, including errors and panics, deletes the file. A caller receives
/// either a complete [`AnalysisOutcome`] or a single [`AnalysisError`].
pub struct AnalysisPipeline<L>
where
    L: LlmClient,
{
    audio_decoder: AudioDecoder,
    transcript_resolver: TranscriptResolver,
    phonetic_annotator: PhoneticAnnotator,
    request_builder: ReportRequestBuilder,
    assessment_service: AssessmentService<L>,
}

impl<L> AnalysisPipeline<L>
where
    L: LlmClient,
{
    pub fn new(
        audio_decoder: AudioDecoder,
        transcript_resolver: TranscriptResolver,
        phonetic_annotator: PhoneticAnnotator,
        assessment_service: AssessmentService<L>,
    ) -> Self {
        Self {
            audio_decoder,
            transcript_resolver,
            phonetic_annotator,
            request_builder: ReportRequestBuilder::new(),
            assessment_service,
        }
    }

    pub async fn analyze(
        &self,
        input: RawInput,
        hints: AnalysisHints,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let session_id = SessionId::new();
        let span = tracing::info_span!(
            "analysis",
            session_id = %session_id,
            audio_source = input.audio_source().as_str()
        );

        let result = self.run(session_id, input, hints).instrument(span.clone()).await;

        span.in_scope(|| match &result {
            Ok(outcome) => tracing::info!(
                words = outcome.metrics.word_count,
                report_chars = outcome.report.content.len(),
                "Analysis completed"
            ),
            Err(e) => tracing::warn!(error = %e, "Analysis failed"),
        });

        result
    }

    async fn run(
        &self,
        session_id: SessionId,
        input: RawInput,
        hints: AnalysisHints,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        if input.is_empty() {
            return Err(AnalysisError::NoInputProvided);
        }

        let (transcript, duration_seconds) = {
            let decoded = match input.audio() {
                Some(payload) => Some(self.audio_decoder.decode(payload)?),
                None => None,
            };

            let transcript = self
                .transcript_resolver
                .resolve(&input, decoded.as_ref().map(|d| &d.resource))
                .await?;

            let duration_seconds = match decoded {
                Some(decoded) => {
                    let duration = decoded.duration_seconds;
                    if let Err(e) = decoded.resource.release() {
                        tracing::warn!(error = %e, "Failed to delete temporary audio file");
                    }
                    Some(duration)
                }
                None => None,
            };

            (transcript, duration_seconds)
        };

        if transcript.is_empty() {
            return Err(AnalysisError::NoInputProvided);
        }

        tracing::debug!(
            origin = ?transcript.origin(),
            chars = transcript.as_str().len(),
            "Transcript resolved"
        );

        let metrics = derive_metrics(&transcript, duration_seconds);
        let phonemes = self.phonetic_annotator.annotate(&transcript);
        let request = self
            .request_builder
            .build(&transcript, &phonemes, &metrics, &hints);

        let report = self.assessment_service.generate(&request).await?;

        Ok(AnalysisOutcome {
            session_id,
            transcript,
            metrics,
            phonemes,
            report,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No audio or transcription provided. Please record or enter text before analyzing.")]
    NoInputProvided,
    #[error("The audio could not be decoded, please re-record or re-upload it ({0})")]
    DecodeFailure(#[from] AudioDecoderError),
    #[error("Speech recognition failed ({0})")]
    TranscriptionFailure(#[from] TranscriptionError),
    #[error("The assessment report could not be generated, please retry ({0})")]
    ReportGenerationFailure(#[from] LlmClientError),
}
