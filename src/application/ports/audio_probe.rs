use std::path::Path;

pub trait AudioProbe: Send + Sync {
    fn duration_seconds(&self, path: &Path) -> Result<f64, AudioProbeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioProbeError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("no audio track found")]
    NoAudioTrack,
    #[error("duration could not be determined")]
    UnknownDuration,
    #[error("corrupt audio stream: {0}")]
    Corrupt(String),
}
