//! Parler-TTS HTTP synthesis server.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use runtime::{DevicePreference, SynthesisEngine, logging};
use tts_core::{ModelConfig, ServerConfig};
use tts_server::{AppState, TtsServer};

/// Parler-TTS HTTP Server
#[derive(Debug, Parser)]
#[command(name = "tts-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// Hugging Face model repository id
    #[arg(long, default_value = "parler-tts/parler-tts-mini-multilingual-v1.1")]
    model_id: String,

    /// Model repository revision
    #[arg(long, default_value = "main")]
    revision: String,

    /// Compute device (auto, cpu, cuda, metal)
    #[arg(long, default_value = "auto")]
    device: String,

    /// Run with the mock engine instead of loading model weights
    #[arg(long)]
    mock: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let format = if args.json_logs {
        logging::LogFormat::Json
    } else {
        logging::LogFormat::Text
    };
    logging::init_logging(&args.log_level, format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %args.addr,
        model_id = %args.model_id,
        "Starting TTS server"
    );

    // Model load failures are fatal: the process never becomes ready.
    let engine = if args.mock {
        SynthesisEngine::new_mock()
    } else {
        let device = runtime::select_device(DevicePreference::parse(&args.device))
            .context("Failed to select compute device")?;
        let model_config = ModelConfig {
            model_id: args.model_id,
            revision: args.revision,
            ..ModelConfig::default()
        };
        SynthesisEngine::load(&model_config, &device).context("Failed to load model")?
    };

    let config = ServerConfig {
        addr: args.addr,
        ..ServerConfig::default()
    };

    let state = AppState::new(engine);
    TtsServer::new(config, state)
        .run()
        .await
        .context("Server failed")?;

    info!("Server shutdown complete");
    Ok(())
}
