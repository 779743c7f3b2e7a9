//! Configuration structures for the synthesis service.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Model artifacts and generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hugging Face model repository id.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Repository revision (branch, tag, or commit).
    #[serde(default = "default_revision")]
    pub revision: String,
    /// Maximum decoder steps per generation.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Seed for the sampling logits processor.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Force CPU even when a GPU is available.
    #[serde(default)]
    pub force_cpu: bool,
}

fn default_model_id() -> String {
    "parler-tts/parler-tts-mini-multilingual-v1.1".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_max_steps() -> usize {
    512
}

fn default_seed() -> u64 {
    299792458
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            revision: default_revision(),
            max_steps: default_max_steps(),
            seed: default_seed(),
            force_cpu: false,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Graceful shutdown timeout in seconds.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".parse().expect("valid default addr"),
            shutdown_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.model_id, "parler-tts/parler-tts-mini-multilingual-v1.1");
        assert_eq!(config.revision, "main");
        assert_eq!(config.max_steps, 512);
        assert!(!config.force_cpu);
    }

    #[test]
    fn test_model_config_partial_json() {
        let config: ModelConfig = serde_json::from_str(r#"{"force_cpu": true}"#).unwrap();
        assert!(config.force_cpu);
        assert_eq!(config.max_steps, 512);
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.port(), 8000);
        assert_eq!(config.shutdown_timeout_secs, 30);
    }
}
