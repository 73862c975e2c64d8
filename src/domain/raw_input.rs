/// Where an audio payload came from. Determines how its bytes are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSource {
    None,
    /// Browser recording, delivered as base64 text (optionally a `data:` URL).
    Recorded,
    /// File upload, delivered as raw container bytes.
    Uploaded,
}

impl AudioSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Recorded => "recorded",
            Self::Uploaded => "uploaded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    source: AudioSource,
    data: Vec<u8>,
    extension: Option<String>,
}

impl AudioPayload {
    pub fn recorded(base64_data: impl Into<Vec<u8>>) -> Self {
        Self {
            source: AudioSource::Recorded,
            data: base64_data.into(),
            extension: None,
        }
    }

    /// `file_name` is only used to keep the upload's extension as a format hint.
    pub fn uploaded(data: Vec<u8>, file_name: Option<&str>) -> Self {
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        Self {
            source: AudioSource::Uploaded,
            data,
            extension,
        }
    }

    pub fn source(&self) -> AudioSource {
        self.source
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File suffix used when staging the payload on disk.
    pub fn file_suffix(&self) -> String {
        match (self.source, &self.extension) {
            (AudioSource::Uploaded, Some(ext)) => format!(".{}", ext),
            (AudioSource::Uploaded, None) => ".wav".to_string(),
            _ => ".webm".to_string(),
        }
    }
}

/// One submission as captured by the front-end, validated once at the boundary.
///
/// Blank text fields are stored as absent so later stages only ever need to
/// check for presence. An audio payload always carries its source, so a
/// blob without a source (or the reverse) cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    manual_text: Option<String>,
    captured_text: Option<String>,
    audio: Option<AudioPayload>,
}

impl RawInput {
    pub fn new(
        manual_text: Option<String>,
        captured_text: Option<String>,
        audio: Option<AudioPayload>,
    ) -> Self {
        Self {
            manual_text: non_blank(manual_text),
            captured_text: non_blank(captured_text),
            audio: audio.filter(|payload| !payload.is_empty()),
        }
    }

    pub fn from_text(manual_text: impl Into<String>) -> Self {
        Self::new(Some(manual_text.into()), None, None)
    }

    pub fn from_upload(payload: AudioPayload) -> Self {
        Self::new(None, None, Some(payload))
    }

    pub fn manual_text(&self) -> Option<&str> {
        self.manual_text.as_deref()
    }

    pub fn captured_text(&self) -> Option<&str> {
        self.captured_text.as_deref()
    }

    pub fn audio(&self) -> Option<&AudioPayload> {
        self.audio.as_ref()
    }

    pub fn audio_source(&self) -> AudioSource {
        self.audio
            .as_ref()
            .map(AudioPayload::source)
            .unwrap_or(AudioSource::None)
    }

    pub fn is_empty(&self) -> bool {
        self.manual_text.is_none() && self.captured_text.is_none() && self.audio.is_none()
    }
}

/// Optional context forwarded to the assessment service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisHints {
    language_hint: Option<String>,
    expected_topic: Option<String>,
}

impl AnalysisHints {
    pub fn new(language_hint: Option<String>, expected_topic: Option<String>) -> Self {
        Self {
            language_hint: non_blank(language_hint).map(|s| s.trim().to_string()),
            expected_topic: non_blank(expected_topic).map(|s| s.trim().to_string()),
        }
    }

    pub fn language_hint(&self) -> Option<&str> {
        self.language_hint.as_deref()
    }

    pub fn expected_topic(&self) -> Option<&str> {
        self.expected_topic.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
