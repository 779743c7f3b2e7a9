//! # tts-core
//!
//! Core types, configuration, and error definitions shared by the
//! Parler-TTS service crates:
//!
//! - Request/response data types (`TtsRequest`, `AudioClip`)
//! - Configuration structures (`ModelConfig`, `ServerConfig`)
//! - Unified error handling via `TtsError`

pub mod config;
pub mod error;
pub mod types;

pub use config::{ModelConfig, ServerConfig};
pub use error::{TtsError, TtsResult};
pub use types::{AudioClip, TtsRequest, DEFAULT_SPEAKER_PROMPT};
