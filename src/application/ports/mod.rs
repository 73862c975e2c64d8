mod audio_probe;
mod llm_client;
mod phoneme_dictionary;
mod transcription_engine;

pub use audio_probe::{AudioProbe, AudioProbeError};
pub use llm_client::{LlmClient, LlmClientError};
pub use phoneme_dictionary::PhonemeDictionary;
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
