use serde::Serialize;

/// Quantitative speech measurements for one transcript.
///
/// `speaking_rate_wpm` is present only when there is at least one word and a
/// positive audio duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub word_count: usize,
    pub audio_duration_seconds: Option<f64>,
    pub speaking_rate_wpm: Option<u32>,
}
