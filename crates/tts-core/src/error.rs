//! Unified error types for the synthesis service.

use std::path::PathBuf;

/// Main error type for TTS operations.
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// Model or tokenizer artifacts could not be loaded.
    #[error("model load failed for {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    /// Artifact download from the Hugging Face Hub failed.
    #[error("hub fetch failed for {repo}/{file}: {reason}")]
    HubFetch {
        repo: String,
        file: String,
        reason: String,
    },

    /// Tokenization failed.
    #[error("tokenization failed: {0}")]
    Tokenization(String),

    /// Model inference error.
    #[error("inference error: {0}")]
    Inference(String),

    /// WAV encoding error.
    #[error("audio encode error: {0}")]
    AudioEncode(String),

    /// Compute device unavailable or misconfigured.
    #[error("device error: {0}")]
    Device(String),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (should not happen in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for Results with TtsError.
pub type TtsResult<T> = Result<T, TtsError>;

impl TtsError {
    /// Create a model load error for the given path.
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a tokenization error with message.
    pub fn tokenization(msg: impl Into<String>) -> Self {
        Self::Tokenization(msg.into())
    }

    /// Create an inference error with message.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create an audio encode error with message.
    pub fn audio_encode(msg: impl Into<String>) -> Self {
        Self::AudioEncode(msg.into())
    }

    /// Create a device error with message.
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Create an invalid input error with message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an internal error with message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TtsError::tokenization("unknown token");
        assert_eq!(err.to_string(), "tokenization failed: unknown token");

        let err = TtsError::model_load("/models/parler", "missing safetensors");
        assert_eq!(
            err.to_string(),
            "model load failed for /models/parler: missing safetensors"
        );
    }

    #[test]
    fn test_error_constructors() {
        let err = TtsError::inference("generation failed");
        assert!(matches!(err, TtsError::Inference(_)));

        let err = TtsError::invalid_input("text missing");
        assert!(matches!(err, TtsError::InvalidInput(_)));
    }
}
