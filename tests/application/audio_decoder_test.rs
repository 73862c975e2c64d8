use std::sync::Arc;

use speechlens::application::ports::{AudioProbe, AudioProbeError};
use speechlens::application::services::{AudioDecoder, AudioDecoderError};
use speechlens::domain::AudioPayload;

use crate::helpers::{FixedProbe, to_base64};

struct BrokenProbe;

impl AudioProbe for BrokenProbe {
    fn duration_seconds(&self, _path: &std::path::Path) -> Result<f64, AudioProbeError> {
        Err(AudioProbeError::UnsupportedFormat("not audio".to_string()))
    }
}

#[test]
fn given_base64_recording_when_decoding_then_stages_decoded_bytes_as_webm() {
    let probe = Arc::new(FixedProbe::new(4.5));
    let decoder = AudioDecoder::new(Arc::clone(&probe) as Arc<dyn AudioProbe>);
    let payload = AudioPayload::recorded(to_base64(b"recorded bytes"));

    let decoded = decoder.decode(&payload).unwrap();

    let path = decoded.resource.path().to_path_buf();
    assert_eq!(std::fs::read(&path).unwrap(), b"recorded bytes");
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("webm"));
    assert_eq!(decoded.duration_seconds, 4.5);
    assert_eq!(probe.seen_paths(), vec![path.clone()]);

    decoded.resource.release().unwrap();
    assert!(!path.exists());
}

#[test]
fn given_data_url_with_line_breaks_when_decoding_then_payload_is_extracted() {
    let decoder = AudioDecoder::new(Arc::new(FixedProbe::new(1.0)));
    let encoded = to_base64(b"0123456789abcdef");
    let (head, tail) = encoded.split_at(8);
    let payload = AudioPayload::recorded(format!(
        "data:audio/webm;codecs=opus;base64,{}\n{}",
        head, tail
    ));

    let decoded = decoder.decode(&payload).unwrap();

    assert_eq!(
        std::fs::read(decoded.resource.path()).unwrap(),
        b"0123456789abcdef"
    );
}

#[test]
fn given_invalid_base64_when_decoding_then_returns_invalid_encoding() {
    let decoder = AudioDecoder::new(Arc::new(FixedProbe::new(1.0)));

    let result = decoder.decode(&AudioPayload::recorded("***"));

    assert!(matches!(result, Err(AudioDecoderError::InvalidEncoding(_))));
}

#[test]
fn given_data_url_without_comma_when_decoding_then_returns_invalid_encoding() {
    let decoder = AudioDecoder::new(Arc::new(FixedProbe::new(1.0)));

    let result = decoder.decode(&AudioPayload::recorded("data:audio/webm;base64"));

    assert!(matches!(result, Err(AudioDecoderError::InvalidEncoding(_))));
}

#[test]
fn given_upload_when_decoding_then_raw_bytes_are_staged_with_upload_extension() {
    let decoder = AudioDecoder::new(Arc::new(FixedProbe::new(2.0)));
    let payload = AudioPayload::uploaded(vec![7, 8, 9], Some("talk.mp3"));

    let decoded = decoder.decode(&payload).unwrap();

    assert_eq!(std::fs::read(decoded.resource.path()).unwrap(), vec![7, 8, 9]);
    assert_eq!(
        decoded.resource.path().extension().and_then(|e| e.to_str()),
        Some("mp3")
    );
}

#[test]
fn given_unreadable_audio_when_decoding_then_probe_error_is_returned() {
    let decoder = AudioDecoder::new(Arc::new(BrokenProbe));
    let payload = AudioPayload::uploaded(vec![1, 2, 3], Some("talk.wav"));

    let result = decoder.decode(&payload);

    assert!(matches!(
        result,
        Err(AudioDecoderError::Probe(AudioProbeError::UnsupportedFormat(_)))
    ));
}

#[test]
fn given_zero_duration_when_decoding_then_returns_invalid_duration() {
    let probe = Arc::new(FixedProbe::new(0.0));
    let decoder = AudioDecoder::new(Arc::clone(&probe) as Arc<dyn AudioProbe>);

    let result = decoder.decode(&AudioPayload::uploaded(vec![1], Some("a.wav")));

    assert!(matches!(result, Err(AudioDecoderError::InvalidDuration(d)) if d == 0.0));
    assert!(!probe.seen_paths()[0].exists());
}

#[test]
fn given_base64_of_nothing_when_decoding_then_returns_empty_payload() {
    let decoder = AudioDecoder::new(Arc::new(FixedProbe::new(1.0)));

    let result = decoder.decode(&AudioPayload::recorded("data:audio/webm;base64,"));

    assert!(matches!(result, Err(AudioDecoderError::EmptyPayload)));
}
