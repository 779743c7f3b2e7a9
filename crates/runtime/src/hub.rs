//! Model artifact download from the Hugging Face Hub.

use std::fs::File;
use std::path::{Path, PathBuf};

use hf_hub::api::sync::{ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use tracing::info;

use tts_core::{ModelConfig, TtsError, TtsResult};

/// Local paths of all files needed to build a [`crate::SynthesisEngine`].
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    /// Model `config.json`.
    pub config: PathBuf,
    /// Model weights (`model.safetensors`).
    pub weights: PathBuf,
    /// Tokenizer for the target text, from the model repository.
    pub prompt_tokenizer: PathBuf,
    /// Tokenizer for the style description, from the text-encoder repository.
    pub description_tokenizer: PathBuf,
}

/// Download (or resolve from cache) all artifacts for the configured model.
///
/// The description tokenizer comes from the repository named by the model
/// config's `text_encoder._name_or_path`, mirroring how the upstream
/// checkpoint pairs its two tokenizers.
pub fn fetch_artifacts(config: &ModelConfig) -> TtsResult<ModelArtifacts> {
    let token = std::env::var("HF_TOKEN").ok();
    let api = ApiBuilder::new()
        .with_token(token)
        .build()
        .map_err(|e| TtsError::internal(format!("hub api init failed: {e}")))?;

    info!(model_id = %config.model_id, revision = %config.revision, "Fetching model artifacts");

    let repo = api.repo(Repo::with_revision(
        config.model_id.clone(),
        RepoType::Model,
        config.revision.clone(),
    ));

    let model_config = fetch(&repo, &config.model_id, "config.json")?;
    let weights = fetch(&repo, &config.model_id, "model.safetensors")?;
    let prompt_tokenizer = fetch(&repo, &config.model_id, "tokenizer.json")?;

    let encoder_id = text_encoder_repo(&model_config)?;
    info!(encoder_id = %encoder_id, "Fetching description tokenizer");

    let encoder_repo = api.repo(Repo::model(encoder_id.clone()));
    let description_tokenizer = fetch(&encoder_repo, &encoder_id, "tokenizer.json")?;

    Ok(ModelArtifacts {
        config: model_config,
        weights,
        prompt_tokenizer,
        description_tokenizer,
    })
}

fn fetch(repo: &ApiRepo, repo_id: &str, file: &str) -> TtsResult<PathBuf> {
    repo.get(file).map_err(|e| TtsError::HubFetch {
        repo: repo_id.to_string(),
        file: file.to_string(),
        reason: e.to_string(),
    })
}

/// Read `text_encoder._name_or_path` out of a model `config.json`.
pub fn text_encoder_repo(config_path: &Path) -> TtsResult<String> {
    let file = File::open(config_path)?;
    let raw: serde_json::Value = serde_json::from_reader(file)
        .map_err(|e| TtsError::model_load(config_path, format!("invalid config.json: {e}")))?;

    raw.pointer("/text_encoder/_name_or_path")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            TtsError::model_load(
                config_path,
                "config.json has no text_encoder._name_or_path",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tts-hub-test-{name}-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_text_encoder_repo_parsing() {
        let path = write_fixture(
            "ok",
            r#"{"text_encoder": {"_name_or_path": "google/flan-t5-large", "d_model": 1024}}"#,
        );
        assert_eq!(text_encoder_repo(&path).unwrap(), "google/flan-t5-large");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_text_encoder_repo_missing() {
        let path = write_fixture("missing", r#"{"text_encoder": {"d_model": 1024}}"#);
        let err = text_encoder_repo(&path).unwrap_err();
        assert!(matches!(err, TtsError::ModelLoad { .. }));
        std::fs::remove_file(path).ok();
    }
}
