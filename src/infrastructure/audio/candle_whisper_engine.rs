use std::path::{Path, PathBuf};

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::{Api, ApiRepo};
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::pcm_decoder::decode_to_pcm;

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const MAX_DECODE_TOKENS: usize = 224;

/// Whisper running in-process on the CPU through candle.
///
/// Construction downloads (or reuses cached) weights from the Hugging Face
/// hub and is slow; wrap it in a [`super::LazyTranscriptionEngine`].
pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokens: SpecialTokens,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

struct SpecialTokens {
    sot: u32,
    transcribe: u32,
    no_timestamps: u32,
    eot: u32,
}

impl CandleWhisperEngine {
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Loading Whisper model"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));
        let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));

        let config: Config = serde_json::from_str(&read_to_string(&fetch(&repo, "config.json")?)?)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(fetch(&repo, "tokenizer.json")?)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;
        let tokens = SpecialTokens::resolve(&tokenizer)?;

        let mel_bytes = std::fs::read(fetch(&mel_repo, "melfilters.bytes")?)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = parse_mel_filters(&mel_bytes, &config)?;

        let weights = fetch(&repo, "model.safetensors")?;
        // SAFETY: the safetensors file is memory-mapped read-only and outlives the builder.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };
        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(model = model_id, "Whisper model ready");

        Ok(Self {
            model: Mutex::new(model),
            tokens,
            tokenizer,
            config,
            device,
            mel_filters,
        })
    }

    fn mel_segments(&self, pcm: &[f32]) -> Result<Vec<Tensor>, TranscriptionError> {
        let n_mel = self.config.num_mel_bins;

        pcm.chunks(m::N_SAMPLES)
            .map(|chunk| {
                let mut samples = chunk.to_vec();
                samples.resize(m::N_SAMPLES, 0.0);

                let mel = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
                let n_frames = mel.len() / n_mel;
                infer(
                    Tensor::from_vec(mel, (1, n_mel, n_frames), &self.device),
                    "mel tensor",
                )
            })
            .collect()
    }

    fn greedy_decode(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
    ) -> Result<String, TranscriptionError> {
        let audio_features = infer(model.encoder.forward(mel, true), "encoder")?;

        let prompt = [self.tokens.sot, self.tokens.transcribe, self.tokens.no_timestamps];
        let mut tokens = prompt.to_vec();
        let mut text = String::new();

        for _ in 0..MAX_DECODE_TOKENS {
            let input = infer(
                Tensor::new(tokens.as_slice(), &self.device).and_then(|t| t.unsqueeze(0)),
                "token tensor",
            )?;
            let hidden = infer(
                model
                    .decoder
                    .forward(&input, &audio_features, tokens.len() == prompt.len()),
                "decoder",
            )?;
            let logits = infer(
                hidden
                    .squeeze(0)
                    .and_then(|h| model.decoder.final_linear(&h)),
                "final linear",
            )?;
            let next = infer(
                logits
                    .dim(0)
                    .and_then(|len| logits.get(len - 1))
                    .and_then(|last| last.argmax(0))
                    .and_then(|t| t.to_scalar::<u32>()),
                "argmax",
            )?;

            if next == self.tokens.eot {
                break;
            }
            tokens.push(next);

            if let Some(piece) = self.tokenizer.id_to_token(next) {
                text.push_str(&piece.replace('Ġ', " ").replace('▁', " "));
            }
        }

        model.reset_kv_cache();

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let data = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TranscriptionError::DecodingFailed(format!("read audio: {}", e)))?;
        let extension = audio_path.extension().and_then(|e| e.to_str());

        let pcm = decode_to_pcm(data, extension)?;
        let segments = self.mel_segments(&pcm)?;

        let mut model = self.model.lock().await;
        let mut texts = Vec::with_capacity(segments.len());
        for (index, mel) in segments.iter().enumerate() {
            tracing::debug!(segment = index, "Transcribing audio segment");
            let text = self.greedy_decode(&mut model, mel)?;
            if !text.is_empty() {
                texts.push(text);
            }
        }

        let transcript = texts.join(" ");
        tracing::info!(
            segments = segments.len(),
            chars = transcript.len(),
            "Local Whisper transcription completed"
        );

        Ok(transcript)
    }
}

impl SpecialTokens {
    fn resolve(tokenizer: &Tokenizer) -> Result<Self, TranscriptionError> {
        let id = |token: &str| {
            tokenizer.token_to_id(token).ok_or_else(|| {
                TranscriptionError::ModelLoadFailed(format!("token not found: {}", token))
            })
        };
        Ok(Self {
            sot: id(m::SOT_TOKEN)?,
            transcribe: id(m::TRANSCRIBE_TOKEN)?,
            no_timestamps: id(m::NO_TIMESTAMPS_TOKEN)?,
            eot: id(m::EOT_TOKEN)?,
        })
    }
}

fn infer<T>(result: candle_core::Result<T>, stage: &str) -> Result<T, TranscriptionError> {
    result.map_err(|e| TranscriptionError::TranscriptionFailed(format!("{}: {}", stage, e)))
}

fn fetch(repo: &ApiRepo, file: &str) -> Result<PathBuf, TranscriptionError> {
    repo.get(file)
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", file, e)))
}

fn read_to_string(path: &Path) -> Result<String, TranscriptionError> {
    std::fs::read_to_string(path)
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read {}: {}", path.display(), e)))
}

fn parse_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
