use std::fmt;

use serde::Serialize;

/// Which input the canonical transcript was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptOrigin {
    Manual,
    Audio,
    Captured,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
    origin: TranscriptOrigin,
}

impl Transcript {
    pub fn new(text: impl Into<String>, origin: TranscriptOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    /// The "no input" sentinel.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            origin: TranscriptOrigin::None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> TranscriptOrigin {
        self.origin
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
