//! # runtime
//!
//! Model loading and inference for the Parler-TTS service:
//!
//! - Device selection (CUDA/Metal/CPU)
//! - Artifact download from the Hugging Face Hub
//! - The synthesis engine (model + two tokenizers)
//! - In-memory WAV encoding
//! - Structured logging setup

pub mod device;
pub mod engine;
pub mod hub;
pub mod logging;
pub mod wav;

pub use device::{select_device, DevicePreference};
pub use engine::SynthesisEngine;
pub use hub::ModelArtifacts;
pub use wav::encode_wav;
