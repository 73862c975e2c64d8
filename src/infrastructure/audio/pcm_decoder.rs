use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_OPUS, CodecParameters, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::Packet;

use crate::application::ports::TranscriptionError;

use super::media::{is_end_of_stream, open_format};

pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// libopus always decodes at this rate here; the stream's own input rate is only advisory.
const OPUS_SAMPLE_RATE: u32 = 48_000;

/// 120 ms at 48 kHz, the longest frame an Opus packet can carry.
const OPUS_MAX_FRAME: usize = 5_760;

enum PacketDecoder {
    Symphonia(Box<dyn Decoder>),
    Opus {
        decoder: opus::Decoder,
        channels: usize,
        buffer: Vec<f32>,
    },
}

impl PacketDecoder {
    fn for_track(params: &CodecParameters) -> Result<(Self, u32, usize), TranscriptionError> {
        if params.codec == CODEC_TYPE_OPUS {
            let channels = opus_channel_count(params);
            let layout = match channels {
                1 => opus::Channels::Mono,
                2 => opus::Channels::Stereo,
                n => {
                    return Err(TranscriptionError::DecodingFailed(format!(
                        "opus: unsupported channel count {}",
                        n
                    )));
                }
            };
            let decoder = opus::Decoder::new(OPUS_SAMPLE_RATE, layout)
                .map_err(|e| TranscriptionError::DecodingFailed(format!("codec: {}", e)))?;
            let opus = PacketDecoder::Opus {
                decoder,
                channels,
                buffer: vec![0.0; OPUS_MAX_FRAME * channels],
            };
            return Ok((opus, OPUS_SAMPLE_RATE, channels));
        }

        let source_rate = params
            .sample_rate
            .ok_or_else(|| TranscriptionError::DecodingFailed("unknown sample rate".to_string()))?;
        let channels = params.channels.map(|c| c.count()).unwrap_or(1).max(1);
        let decoder = symphonia::default::get_codecs()
            .make(params, &DecoderOptions::default())
            .map_err(|e| TranscriptionError::DecodingFailed(format!("codec: {}", e)))?;
        Ok((PacketDecoder::Symphonia(decoder), source_rate, channels))
    }

    /// Appends the packet's interleaved samples to `out`; corrupt frames are skipped.
    fn decode_into(&mut self, packet: &Packet, out: &mut Vec<f32>) -> Result<(), TranscriptionError> {
        match self {
            PacketDecoder::Symphonia(decoder) => {
                let decoded = match decoder.decode(packet) {
                    Ok(d) => d,
                    Err(SymphoniaError::DecodeError(e)) => {
                        tracing::warn!(error = %e, "Skipping corrupt audio frame");
                        return Ok(());
                    }
                    Err(e) => {
                        return Err(TranscriptionError::DecodingFailed(format!("decode: {}", e)));
                    }
                };
                if decoded.frames() == 0 {
                    return Ok(());
                }
                let mut buffer = SampleBuffer::<f32>::new(decoded.frames() as u64, *decoded.spec());
                buffer.copy_interleaved_ref(decoded);
                out.extend_from_slice(buffer.samples());
            }
            PacketDecoder::Opus {
                decoder,
                channels,
                buffer,
            } => {
                match decoder.decode_float(&packet.data, buffer, false) {
                    Ok(frames) => out.extend_from_slice(&buffer[..frames * *channels]),
                    Err(e) => tracing::warn!(error = %e, "Skipping corrupt audio frame"),
                }
            }
        }
        Ok(())
    }
}

/// Channel count from the `OpusHead` block a WebM/Ogg track carries, falling back to the
/// container's layout and then mono.
pub fn opus_channel_count(params: &CodecParameters) -> usize {
    params
        .extra_data
        .as_deref()
        .filter(|head| head.starts_with(b"OpusHead"))
        .and_then(|head| head.get(9))
        .map(|&n| n as usize)
        .or_else(|| params.channels.map(|c| c.count()))
        .unwrap_or(1)
        .max(1)
}

/// Decodes a container to mono `f32` PCM at [`TARGET_SAMPLE_RATE`].
pub fn decode_to_pcm(data: Vec<u8>, extension: Option<&str>) -> Result<Vec<f32>, TranscriptionError> {
    let mut format = open_format(Box::new(Cursor::new(data)), extension)
        .map_err(|e| TranscriptionError::DecodingFailed(format!("probe: {}", e)))?;

    let track = format
        .default_track()
        .ok_or_else(|| TranscriptionError::DecodingFailed("no audio track found".to_string()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut packets = Vec::new();
    loop {
        match format.next_packet() {
            Ok(p) if p.track_id() == track_id => packets.push(p),
            Ok(_) => continue,
            Err(e) if is_end_of_stream(&e) => break,
            Err(e) => {
                return Err(TranscriptionError::DecodingFailed(format!("packet: {}", e)));
            }
        }
    }

    decode_track(&codec_params, packets)
}

/// Decodes the packets of one track to mono `f32` PCM at [`TARGET_SAMPLE_RATE`].
///
/// Opus tracks go through libopus; every other codec through symphonia's registry.
pub fn decode_track(
    codec_params: &CodecParameters,
    packets: impl IntoIterator<Item = Packet>,
) -> Result<Vec<f32>, TranscriptionError> {
    let (mut decoder, source_rate, channels) = PacketDecoder::for_track(codec_params)?;

    let mut mono: Vec<f32> = Vec::new();
    let mut interleaved: Vec<f32> = Vec::new();

    for packet in packets {
        interleaved.clear();
        decoder.decode_into(&packet, &mut interleaved)?;
        downmix_into(&mut mono, &interleaved, channels);
    }

    if mono.is_empty() {
        return Err(TranscriptionError::DecodingFailed(
            "no audio samples decoded".to_string(),
        ));
    }

    if source_rate != TARGET_SAMPLE_RATE {
        mono = resample(&mono, source_rate, TARGET_SAMPLE_RATE)?;
    }

    tracing::debug!(
        samples = mono.len(),
        duration_secs = mono.len() as f32 / TARGET_SAMPLE_RATE as f32,
        "Audio decoded to 16kHz mono PCM"
    );

    Ok(mono)
}

fn downmix_into(out: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    if channels == 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    out.extend(
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
    );
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, TranscriptionError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    const CHUNK: usize = 1024;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let ratio = to_rate as f64 / from_rate as f64;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK, 1)
        .map_err(|e| TranscriptionError::DecodingFailed(format!("resampler init: {}", e)))?;

    let expected_len = (samples.len() as f64 * ratio) as usize;
    let mut output = Vec::with_capacity(expected_len + CHUNK);

    for chunk in samples.chunks(CHUNK) {
        let mut input = chunk.to_vec();
        input.resize(CHUNK, 0.0);

        let result = resampler
            .process(&[input], None)
            .map_err(|e| TranscriptionError::DecodingFailed(format!("resample: {}", e)))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    output.truncate(expected_len);
    Ok(output)
}
