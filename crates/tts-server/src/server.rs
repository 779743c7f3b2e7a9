//! HTTP server lifecycle: bind, serve, graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use tts_core::{ServerConfig, TtsResult};

use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// The synthesis HTTP server.
pub struct TtsServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl TtsServer {
    /// Create a server over already-initialized state.
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Run until SIGINT/SIGTERM, then drain connections.
    pub async fn run(self) -> TtsResult<()> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let app = routes::router(Arc::clone(&self.state));
        let addr = self.config.addr;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        handlers::log_ready(&self.state, &addr);

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_rx.changed().await.ok();
                })
                .await
        });

        shutdown_signal().await;
        info!("Shutdown signal received, stopping server...");
        let _ = shutdown_tx.send(true);

        let timeout = Duration::from_secs(self.config.shutdown_timeout_secs);
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                warn!("Shutdown timeout, forcing exit");
            }
            result = server_handle => {
                match result {
                    Ok(Ok(())) => info!("Server stopped gracefully"),
                    Ok(Err(e)) => warn!("Server exited with error: {}", e),
                    Err(e) => warn!("Server task join error: {}", e),
                }
            }
        }

        Ok(())
    }
}

/// Wait for shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
