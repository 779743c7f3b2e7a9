//! # tts-server
//!
//! HTTP server for the Parler-TTS synthesis service.
//!
//! Provides:
//! - `POST /tts` — synthesize a WAV clip from text plus a style description
//! - `GET /health` — constant liveness response
//! - Open CORS policy and request tracing

pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use server::TtsServer;
pub use state::AppState;
