use crate::domain::{Metrics, Transcript};

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Words per minute, rounded half away from zero.
///
/// `None` when there are no words or the duration is missing, zero,
/// negative, or not finite.
pub fn speaking_rate_wpm(word_count: usize, duration_seconds: Option<f64>) -> Option<u32> {
    let duration = duration_seconds.filter(|d| d.is_finite() && *d > 0.0)?;
    if word_count == 0 {
        return None;
    }
    let rate = word_count as f64 / (duration / 60.0);
    Some(rate.round() as u32)
}

pub fn derive_metrics(transcript: &Transcript, duration_seconds: Option<f64>) -> Metrics {
    let word_count = word_count(transcript.as_str());
    Metrics {
        word_count,
        audio_duration_seconds: duration_seconds,
        speaking_rate_wpm: speaking_rate_wpm(word_count, duration_seconds),
    }
}
