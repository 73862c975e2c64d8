mod analysis_pipeline;
mod assessment_service;
mod audio_decoder;
mod metric_deriver;
mod phonetic_annotator;
mod report_request_builder;
mod transcript_resolver;

pub use analysis_pipeline::{AnalysisError, AnalysisOutcome, AnalysisPipeline};
pub use assessment_service::AssessmentService;
pub use audio_decoder::{AudioDecoder, AudioDecoderError, DecodedAudio};
pub use metric_deriver::{derive_metrics, speaking_rate_wpm, word_count};
pub use phonetic_annotator::{PhoneticAnnotator, normalize_word};
pub use report_request_builder::{NONE_SUPPLIED, ReportRequestBuilder};
pub use transcript_resolver::TranscriptResolver;
