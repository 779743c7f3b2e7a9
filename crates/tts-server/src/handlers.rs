//! Request handlers for the synthesis endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use tts_core::{TtsError, TtsRequest};

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Error payload returned for failed synthesis.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Liveness probe. Deliberately independent of engine state.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

/// `POST /tts` — synthesize audio for the request text.
#[instrument(skip_all, fields(text_len))]
pub async fn tts(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TtsRequest>,
) -> Response {
    tracing::Span::current().record("text_len", request.text.len());

    let start = Instant::now();
    let speaker = request.speaker_prompt().to_string();
    let text = request.text;

    // Generation can run for seconds; keep it off the async runtime.
    let engine = Arc::clone(&state.engine);
    let result = tokio::task::spawn_blocking(move || {
        let mut engine = engine
            .lock()
            .map_err(|_| TtsError::internal("engine lock poisoned"))?;
        let clip = engine.synthesize(&text, &speaker)?;
        let num_samples = clip.num_samples();
        let duration_ms = clip.duration_ms();
        let bytes = runtime::wav::encode_wav(&clip)?;
        Ok::<_, TtsError>((bytes, num_samples, duration_ms))
    })
    .await;

    let result = match result {
        Ok(inner) => inner,
        Err(e) => Err(TtsError::internal(format!("synthesis task failed: {e}"))),
    };

    match result {
        Ok((bytes, num_samples, duration_ms)) => {
            let processing_ms = start.elapsed().as_secs_f32() * 1000.0;
            let rtf = if duration_ms > 0.0 {
                processing_ms / duration_ms
            } else {
                0.0
            };
            debug!(
                num_samples,
                duration_ms, processing_ms, rtf, "Synthesis completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "audio/wav")],
                Body::from(bytes),
            )
                .into_response()
        }
        Err(err) => {
            warn!(error = %err, "Synthesis failed");
            error_response(&err)
        }
    }
}

/// Map a synthesis error to an HTTP response.
///
/// Invalid input maps to 400, everything else to 500. The JSON shape
/// stays `{"error": "..."}` either way.
fn error_response(err: &TtsError) -> Response {
    let status = match err {
        TtsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Log a summarizing line once the server is up.
pub fn log_ready(state: &AppState, addr: &std::net::SocketAddr) {
    info!(
        addr = %addr,
        startup_ms = state.start_time.elapsed().as_millis() as u64,
        "TTS server ready"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let resp = error_response(&TtsError::invalid_input("bad text"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = error_response(&TtsError::inference("generation failed"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = error_response(&TtsError::audio_encode("bad spec"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
