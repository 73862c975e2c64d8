mod candle_whisper_engine;
mod lazy_transcription_engine;
mod media;
mod openai_whisper_engine;
pub mod pcm_decoder;
mod symphonia_probe;
mod transcription_engine_factory;

pub use candle_whisper_engine::CandleWhisperEngine;
pub use lazy_transcription_engine::LazyTranscriptionEngine;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use symphonia_probe::{SymphoniaAudioProbe, last_packet_end};
pub use transcription_engine_factory::TranscriptionEngineFactory;
