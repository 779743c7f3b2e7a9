//! The synthesis engine: Parler-TTS model plus its two tokenizers.
//!
//! Loaded once at startup, used for every request. Supports a mock
//! backend so the HTTP layer can be exercised without model weights.

use std::fs::File;
use std::path::Path;

use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::parler_tts::{Config as ParlerConfig, Model as ParlerModel};
use tokenizers::Tokenizer;
use tracing::{info, instrument};

use tts_core::{AudioClip, ModelConfig, TtsError, TtsResult};

use crate::hub::{self, ModelArtifacts};

/// Sample rate used by the mock backend.
const MOCK_SAMPLE_RATE: u32 = 24_000;

/// Engine backend - either mock or the real neural model.
enum EngineBackend {
    /// Deterministic sine-wave generation (no model weights needed).
    Mock,
    /// Parler-TTS model with its prompt and description tokenizers.
    Neural {
        model: ParlerModel,
        prompt_tokenizer: Tokenizer,
        description_tokenizer: Tokenizer,
        device: Device,
    },
}

impl std::fmt::Debug for EngineBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mock => write!(f, "MockEngine"),
            Self::Neural { .. } => write!(f, "NeuralEngine"),
        }
    }
}

/// Text-to-speech engine holding process-lifetime model state.
///
/// Generation mutates internal KV caches, so `synthesize` takes `&mut self`;
/// callers serialize access (the server keeps the engine behind a mutex).
#[derive(Debug)]
pub struct SynthesisEngine {
    backend: EngineBackend,
    sample_rate: u32,
    max_steps: usize,
    seed: u64,
}

impl SynthesisEngine {
    /// Create a mock engine for testing without model weights.
    pub fn new_mock() -> Self {
        info!("Creating mock synthesis engine");
        Self {
            backend: EngineBackend::Mock,
            sample_rate: MOCK_SAMPLE_RATE,
            max_steps: 512,
            seed: 0,
        }
    }

    /// Fetch artifacts from the Hub and build the engine on `device`.
    ///
    /// Any failure here is fatal to startup; there is no retry or fallback.
    pub fn load(config: &ModelConfig, device: &Device) -> TtsResult<Self> {
        let artifacts = hub::fetch_artifacts(config)?;
        Self::from_artifacts(&artifacts, config, device)
    }

    /// Build the engine from already-downloaded artifacts.
    #[instrument(skip_all)]
    pub fn from_artifacts(
        artifacts: &ModelArtifacts,
        config: &ModelConfig,
        device: &Device,
    ) -> TtsResult<Self> {
        let prompt_tokenizer = load_tokenizer(&artifacts.prompt_tokenizer)?;
        let description_tokenizer = load_tokenizer(&artifacts.description_tokenizer)?;
        info!(
            prompt_vocab = prompt_tokenizer.get_vocab_size(true),
            description_vocab = description_tokenizer.get_vocab_size(true),
            "Tokenizers loaded"
        );

        let config_file = File::open(&artifacts.config)?;
        let model_config: ParlerConfig = serde_json::from_reader(config_file).map_err(|e| {
            TtsError::model_load(&artifacts.config, format!("invalid config.json: {e}"))
        })?;
        let sample_rate = model_config.audio_encoder.sampling_rate as u32;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[artifacts.weights.clone()], DType::F32, device)
        }
        .map_err(|e| TtsError::model_load(&artifacts.weights, e.to_string()))?;

        let model = ParlerModel::new(&model_config, vb)
            .map_err(|e| TtsError::model_load(&artifacts.weights, e.to_string()))?;

        info!(sample_rate, "Parler-TTS model loaded");

        Ok(Self {
            backend: EngineBackend::Neural {
                model,
                prompt_tokenizer,
                description_tokenizer,
                device: device.clone(),
            },
            sample_rate,
            max_steps: config.max_steps,
            seed: config.seed,
        })
    }

    /// Sample rate of generated audio in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// True when running on the real model rather than the mock backend.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EngineBackend::Neural { .. })
    }

    /// Synthesize `text` steered by the `speaker` style description.
    #[instrument(skip(self, text, speaker), fields(text_len = text.len()))]
    pub fn synthesize(&mut self, text: &str, speaker: &str) -> TtsResult<AudioClip> {
        let sample_rate = self.sample_rate;
        let max_steps = self.max_steps;
        let seed = self.seed;

        match &mut self.backend {
            EngineBackend::Mock => Ok(mock_clip(text, sample_rate)),
            EngineBackend::Neural {
                model,
                prompt_tokenizer,
                description_tokenizer,
                device,
            } => {
                let description_ids = encode_on_device(description_tokenizer, speaker, device)?;
                let prompt_ids = encode_on_device(prompt_tokenizer, text, device)?;

                // Default sampling settings, no temperature or top-p overrides.
                let logits_processor = LogitsProcessor::new(seed, None, None);

                let codes = model
                    .generate(&prompt_ids, &description_ids, logits_processor, max_steps)
                    .map_err(|e| TtsError::inference(e.to_string()))?;

                let pcm = decode_codes(model, &codes, device)?;
                Ok(AudioClip::new(pcm, sample_rate))
            }
        }
    }
}

fn load_tokenizer(path: &Path) -> TtsResult<Tokenizer> {
    Tokenizer::from_file(path).map_err(|e| TtsError::model_load(path, e.to_string()))
}

/// Encode text into a batched id tensor on the target device.
fn encode_on_device(tokenizer: &Tokenizer, text: &str, device: &Device) -> TtsResult<Tensor> {
    let ids = tokenizer
        .encode(text, true)
        .map_err(|e| TtsError::tokenization(e.to_string()))?
        .get_ids()
        .to_vec();

    Tensor::new(ids, device)
        .and_then(|t| t.unsqueeze(0))
        .map_err(|e| TtsError::tokenization(e.to_string()))
}

/// Run generated codes through the DAC audio encoder and pull the
/// waveform back to host memory as a flat f32 vector.
fn decode_codes(model: &mut ParlerModel, codes: &Tensor, device: &Device) -> TtsResult<Vec<f32>> {
    let codes = codes
        .to_dtype(DType::I64)
        .and_then(|c| c.unsqueeze(0))
        .map_err(|e| TtsError::inference(e.to_string()))?;

    let pcm = model
        .audio_encoder
        .decode_codes(&codes.to_device(device).map_err(|e| TtsError::inference(e.to_string()))?)
        .map_err(|e| TtsError::inference(e.to_string()))?;

    // [batch, channel, samples] -> samples
    pcm.i((0, 0))
        .and_then(|p| p.flatten_all())
        .and_then(|p| p.to_vec1::<f32>())
        .map_err(|e| TtsError::inference(e.to_string()))
}

/// Deterministic stand-in clip: a short 440 Hz tone whose length scales
/// with the input so tests can tell responses apart.
fn mock_clip(text: &str, sample_rate: u32) -> AudioClip {
    let num_samples = (sample_rate as usize / 10) * (1 + text.chars().count().min(100));
    let pcm = (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.3
        })
        .collect();
    AudioClip::new(pcm, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_engine_produces_audio() {
        let mut engine = SynthesisEngine::new_mock();
        assert!(!engine.has_model());
        assert_eq!(engine.sample_rate(), MOCK_SAMPLE_RATE);

        let clip = engine.synthesize("hello", "calm voice").unwrap();
        assert!(clip.num_samples() > 0);
        assert_eq!(clip.sample_rate, MOCK_SAMPLE_RATE);
        for &sample in &clip.pcm {
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_mock_engine_empty_text() {
        let mut engine = SynthesisEngine::new_mock();
        let clip = engine.synthesize("", "calm voice").unwrap();
        // Empty input still yields a (short) clip rather than an error.
        assert!(clip.num_samples() > 0);
    }

    #[test]
    fn test_mock_clip_scales_with_input() {
        let short = mock_clip("hi", MOCK_SAMPLE_RATE);
        let long = mock_clip("a considerably longer sentence to synthesize", MOCK_SAMPLE_RATE);
        assert!(long.num_samples() > short.num_samples());
    }
}
