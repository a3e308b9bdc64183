//! PCM helpers for the bidirectional voice stream.
//!
//! Outbound microphone audio is 16 kHz mono 16-bit little-endian PCM;
//! inbound model audio arrives at 24 kHz in the same sample format.

use std::time::Duration;

use crate::genai::CollabError;

/// Sample rate of outbound (microphone) audio.
pub const INPUT_SAMPLE_RATE_HZ: u32 = 16_000;

/// Sample rate of inbound (model) audio.
pub const OUTPUT_SAMPLE_RATE_HZ: u32 = 24_000;

/// Convert normalized f32 samples to 16-bit little-endian PCM bytes.
///
/// Samples outside [-1.0, 1.0] are clamped rather than wrapped.
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Decode 16-bit little-endian PCM bytes into samples.
///
/// Fails on odd-length input; the stream frames whole samples only.
pub fn decode_pcm16(bytes: &[u8]) -> Result<Vec<i16>, CollabError> {
    if bytes.len() % 2 != 0 {
        return Err(CollabError::MalformedAudio(format!(
            "odd byte length {}",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Playback duration of a sample buffer at the inbound rate.
pub fn playback_duration(sample_count: usize) -> Duration {
    Duration::from_secs_f64(sample_count as f64 / f64::from(OUTPUT_SAMPLE_RATE_HZ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_maps_full_scale_to_i16_range() {
        let bytes = encode_pcm16(&[0.0, 1.0, -1.0]);

        assert_eq!(bytes.len(), 6);
        assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), 0);
        assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), 32767);
        assert_eq!(i16::from_le_bytes([bytes[4], bytes[5]]), -32767);
    }

    #[test]
    fn encode_clamps_out_of_range_samples() {
        let bytes = encode_pcm16(&[2.0, -2.0]);

        assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), 32767);
        assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), -32767);
    }

    #[test]
    fn decode_roundtrips_encoded_samples() {
        let samples = vec![0i16, 1000, -1000, i16::MAX, i16::MIN];
        let mut bytes = Vec::new();
        for sample in &samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }

        assert_eq!(decode_pcm16(&bytes).unwrap(), samples);
    }

    #[test]
    fn decode_rejects_odd_length_frames() {
        let result = decode_pcm16(&[0x00, 0x01, 0x02]);
        assert!(matches!(result, Err(CollabError::MalformedAudio(_))));
    }

    #[test]
    fn playback_duration_uses_output_rate() {
        assert_eq!(playback_duration(24_000), Duration::from_secs(1));
        assert_eq!(playback_duration(12_000), Duration::from_millis(500));
        assert_eq!(playback_duration(0), Duration::ZERO);
    }
}
