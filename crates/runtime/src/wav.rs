//! In-memory WAV encoding.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use tts_core::{AudioClip, TtsError, TtsResult};

/// Encode a clip as a WAV byte buffer (mono, 16-bit PCM, no compression).
pub fn encode_wav(clip: &AudioClip) -> TtsResult<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        WavWriter::new(&mut cursor, spec).map_err(|e| TtsError::audio_encode(e.to_string()))?;

    for &sample in &clip.pcm {
        let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| TtsError::audio_encode(e.to_string()))?;
    }

    writer
        .finalize()
        .map_err(|e| TtsError::audio_encode(e.to_string()))?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wav_roundtrip_header() {
        let clip = AudioClip::new(vec![0.0, 0.5, -0.5, 1.0, -1.0], 24_000);
        let bytes = encode_wav(&clip).unwrap();
        assert!(!bytes.is_empty());

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 5);
    }

    #[test]
    fn test_encode_wav_clamps_out_of_range() {
        let clip = AudioClip::new(vec![2.0, -2.0], 16_000);
        let bytes = encode_wav(&clip).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
    }

    #[test]
    fn test_encode_wav_empty_clip() {
        let clip = AudioClip::new(Vec::new(), 24_000);
        let bytes = encode_wav(&clip).unwrap();
        // Header only, still a valid container.
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.len(), 0);
    }
}
