use std::fs::File;
use std::path::Path;

use symphonia::core::units::TimeBase;

use crate::application::ports::{AudioProbe, AudioProbeError};

use super::media::{is_end_of_stream, open_format};

/// Reads container metadata to measure audio length.
///
/// Uses the declared frame count when present (WAV, MP3 with Xing headers,
/// MP4), otherwise walks packet timestamps, which is what browser WebM
/// recordings need.
pub struct SymphoniaAudioProbe;

impl AudioProbe for SymphoniaAudioProbe {
    fn duration_seconds(&self, path: &Path) -> Result<f64, AudioProbeError> {
        let file = File::open(path)?;
        let extension = path.extension().and_then(|e| e.to_str());

        let mut format = open_format(Box::new(file), extension)
            .map_err(|e| AudioProbeError::UnsupportedFormat(e.to_string()))?;

        let track = format.default_track().ok_or(AudioProbeError::NoAudioTrack)?;
        let track_id = track.id;
        let params = track.codec_params.clone();

        if let (Some(frames), Some(rate)) = (params.n_frames, params.sample_rate) {
            if rate > 0 {
                return Ok(frames as f64 / rate as f64);
            }
        }

        let time_base = params
            .time_base
            .or_else(|| {
                params
                    .sample_rate
                    .filter(|rate| *rate > 0)
                    .map(|rate| TimeBase::new(1, rate))
            })
            .ok_or(AudioProbeError::UnknownDuration)?;

        let mut spans = Vec::new();
        loop {
            match format.next_packet() {
                Ok(packet) if packet.track_id() == track_id => {
                    spans.push((packet.ts(), packet.dur()));
                }
                Ok(_) => continue,
                Err(e) if is_end_of_stream(&e) => break,
                Err(e) => return Err(AudioProbeError::Corrupt(e.to_string())),
            }
        }
        let end_ts = last_packet_end(spans);

        let time = time_base.calc_time(end_ts);
        let seconds = time.seconds as f64 + time.frac;

        tracing::trace!(end_ts, seconds, "Duration measured from packet timestamps");

        Ok(seconds)
    }
}

/// Latest `ts + dur` over `(ts, dur)` packet spans; saturates on bogus timestamps.
pub fn last_packet_end(spans: impl IntoIterator<Item = (u64, u64)>) -> u64 {
    spans
        .into_iter()
        .map(|(ts, dur)| ts.saturating_add(dur))
        .max()
        .unwrap_or(0)
}
