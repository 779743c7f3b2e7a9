//! Core data types for the synthesis service.

use serde::{Deserialize, Serialize};

/// Style description used when a request does not supply one.
///
/// This is the prompt the upstream Parler-TTS examples ship for the
/// multilingual mini checkpoint.
pub const DEFAULT_SPEAKER_PROMPT: &str = "A female speaker delivers a slightly expressive \
and animated speech with a moderate speed and pitch. The recording is of very high quality, \
with the speaker's voice sounding clear and very close up.";

/// A text-to-speech request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    /// Text to synthesize.
    pub text: String,
    /// Free-text style description steering voice characteristics.
    /// Falls back to [`DEFAULT_SPEAKER_PROMPT`] when absent.
    #[serde(default)]
    pub speaker: Option<String>,
}

impl TtsRequest {
    /// Create a request with the default speaker description.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: None,
        }
    }

    /// Set the speaker description.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// The effective style description for this request.
    pub fn speaker_prompt(&self) -> &str {
        self.speaker.as_deref().unwrap_or(DEFAULT_SPEAKER_PROMPT)
    }
}

/// A synthesized audio clip.
///
/// PCM samples are mono f32 in [-1, 1] at `sample_rate` Hz; the clip is
/// scoped to one request and dropped once the response is written.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// PCM samples (f32, mono).
    pub pcm: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioClip {
    /// Create a new audio clip.
    pub fn new(pcm: Vec<f32>, sample_rate: u32) -> Self {
        Self { pcm, sample_rate }
    }

    /// Number of samples in this clip.
    pub fn num_samples(&self) -> usize {
        self.pcm.len()
    }

    /// Duration of this clip in milliseconds.
    pub fn duration_ms(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.pcm.len() as f32 * 1000.0 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_speaker() {
        let req = TtsRequest::new("hello");
        assert_eq!(req.text, "hello");
        assert_eq!(req.speaker_prompt(), DEFAULT_SPEAKER_PROMPT);

        let req = req.with_speaker("A deep male voice, slow and calm.");
        assert_eq!(req.speaker_prompt(), "A deep male voice, slow and calm.");
    }

    #[test]
    fn test_request_deserialization() {
        let req: TtsRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(req.text, "hi");
        assert!(req.speaker.is_none());

        // Missing text is a hard deserialization error.
        let err = serde_json::from_str::<TtsRequest>(r#"{"speaker": "calm"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_audio_clip() {
        let clip = AudioClip::new(vec![0.0; 44100], 44100);
        assert_eq!(clip.num_samples(), 44100);
        assert_eq!(clip.duration_ms(), 1000.0);

        let empty = AudioClip::new(Vec::new(), 0);
        assert_eq!(empty.duration_ms(), 0.0);
    }
}
