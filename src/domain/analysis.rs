use chrono::{DateTime, Utc};

/// The fully rendered prompt sent to the assessment service.
///
/// Built fresh per submission and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    prompt: String,
}

impl AnalysisRequest {
    pub fn new(prompt: String) -> Self {
        Self { prompt }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Marked-up text returned by the assessment service, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(content: String) -> Self {
        Self {
            content,
            generated_at: Utc::now(),
        }
    }
}
