mod analysis;
mod metrics;
mod phoneme_map;
mod raw_input;
mod session_id;
mod temp_audio;
mod transcript;

pub use analysis::{AnalysisReport, AnalysisRequest};
pub use metrics::Metrics;
pub use phoneme_map::{PHONEME_NOT_FOUND, PhonemeMap, Pronunciations};
pub use raw_input::{AnalysisHints, AudioPayload, AudioSource, RawInput};
pub use session_id::SessionId;
pub use temp_audio::TempAudioResource;
pub use transcript::{Transcript, TranscriptOrigin};
