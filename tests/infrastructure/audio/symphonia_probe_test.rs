use std::io::Write;

use speechlens::application::ports::{AudioProbe, AudioProbeError};
use speechlens::infrastructure::audio::{SymphoniaAudioProbe, last_packet_end};

use crate::helpers::build_wav;

fn write_temp(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn given_one_second_wav_when_probing_then_duration_is_one_second() {
    let file = write_temp(".wav", &build_wav(16_000, &vec![0i16; 16_000]));

    let duration = SymphoniaAudioProbe.duration_seconds(file.path()).unwrap();

    assert!((duration - 1.0).abs() < 1e-9);
}

#[test]
fn given_half_second_wav_at_8khz_when_probing_then_duration_is_half_second() {
    let file = write_temp(".wav", &build_wav(8_000, &vec![100i16; 4_000]));

    let duration = SymphoniaAudioProbe.duration_seconds(file.path()).unwrap();

    assert!((duration - 0.5).abs() < 1e-9);
}

#[test]
fn given_non_audio_bytes_when_probing_then_returns_unsupported_format() {
    let file = write_temp(".bin", b"this is definitely not an audio container");

    let result = SymphoniaAudioProbe.duration_seconds(file.path());

    assert!(matches!(result, Err(AudioProbeError::UnsupportedFormat(_))));
}

#[test]
fn given_missing_file_when_probing_then_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = SymphoniaAudioProbe.duration_seconds(&dir.path().join("gone.wav"));

    assert!(matches!(result, Err(AudioProbeError::Io(_))));
}

#[test]
fn given_packet_timestamp_near_u64_max_when_measuring_end_then_saturates() {
    let end = last_packet_end([(0, 960), (u64::MAX - 10, 960)]);

    assert_eq!(end, u64::MAX);
}

#[test]
fn given_out_of_order_packets_when_measuring_end_then_uses_latest_end() {
    assert_eq!(last_packet_end([(1_920, 960), (0, 960), (960, 960)]), 2_880);
    assert_eq!(last_packet_end(std::iter::empty()), 0);
}
