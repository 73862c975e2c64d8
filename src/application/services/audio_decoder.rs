use std::io::Write;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::application::ports::{AudioProbe, AudioProbeError};
use crate::domain::{AudioPayload, AudioSource, TempAudioResource};

const TEMP_FILE_PREFIX: &str = "speechlens-";

/// Audio staged on disk together with its measured length.
#[derive(Debug)]
pub struct DecodedAudio {
    pub resource: TempAudioResource,
    pub duration_seconds: f64,
}

/// Materializes submitted audio as a temporary file and measures it.
pub struct AudioDecoder {
    probe: Arc<dyn AudioProbe>,
}

impl AudioDecoder {
    pub fn new(probe: Arc<dyn AudioProbe>) -> Self {
        Self { probe }
    }

    pub fn decode(&self, payload: &AudioPayload) -> Result<DecodedAudio, AudioDecoderError> {
        let bytes = match payload.source() {
            AudioSource::Recorded => decode_base64_payload(payload.data())?,
            AudioSource::Uploaded => payload.data().to_vec(),
            AudioSource::None => return Err(AudioDecoderError::EmptyPayload),
        };

        if bytes.is_empty() {
            return Err(AudioDecoderError::EmptyPayload);
        }

        let mut file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(&payload.file_suffix())
            .tempfile()
            .map_err(AudioDecoderError::Staging)?;
        file.write_all(&bytes).map_err(AudioDecoderError::Staging)?;
        file.flush().map_err(AudioDecoderError::Staging)?;

        // From here on the file is owned by the resource and removed on drop.
        let resource = TempAudioResource::new(file.into_temp_path());

        let duration_seconds = self.probe.duration_seconds(resource.path())?;
        if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
            return Err(AudioDecoderError::InvalidDuration(duration_seconds));
        }

        tracing::debug!(
            source = payload.source().as_str(),
            bytes = bytes.len(),
            duration_secs = duration_seconds,
            "Audio staged for analysis"
        );

        Ok(DecodedAudio {
            resource,
            duration_seconds,
        })
    }
}

/// Accepts bare base64 or a `data:<mime>;base64,<payload>` URL.
fn decode_base64_payload(data: &[u8]) -> Result<Vec<u8>, AudioDecoderError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| AudioDecoderError::InvalidEncoding(format!("utf-8: {}", e)))?
        .trim();

    let encoded = match text.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| AudioDecoderError::InvalidEncoding("malformed data url".to_string()))?,
        None => text,
    };

    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| AudioDecoderError::InvalidEncoding(format!("base64: {}", e)))
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio payload is empty")]
    EmptyPayload,
    #[error("invalid audio encoding: {0}")]
    InvalidEncoding(String),
    #[error("failed to stage audio: {0}")]
    Staging(std::io::Error),
    #[error("probe: {0}")]
    Probe(#[from] AudioProbeError),
    #[error("invalid audio duration: {0} seconds")]
    InvalidDuration(f64),
}
