//! Listener lifecycle for the board API.
//!
//! [`start_server`] binds the configured address, mounts the routes from
//! [`build_router`] over the shared board store, and drains in-flight board
//! requests on `Ctrl-C`. A step or conclusion already running on the
//! blocking pool completes and persists before the process exits.

use std::net::SocketAddr;
use std::sync::Arc;

use conway_db::BoardRepository;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::router::build_router;
use crate::state::AppState;

/// Listen address for the board API, built from the `server` section of
/// `conway-config.yaml`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind (`CONWAY_HOST` overrides the file).
    pub host: String,
    /// Port to bind (`CONWAY_PORT` overrides the file).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
        }
    }
}

/// Serve the board routes over `state` until `Ctrl-C`.
///
/// The board cache lives in `state`, so it must already be loaded (see
/// [`BoardStore::open`](conway_db::BoardStore::open)) for listing to report
/// boards written before the restart.
///
/// # Errors
///
/// [`ServerError::Bind`] if the address is invalid or taken,
/// [`ServerError::Serve`] if accepting connections fails.
pub async fn start_server<R: BoardRepository + 'static>(
    config: &ServerConfig,
    state: Arc<AppState<R>>,
) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Board server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Board server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Failures of the board API listener.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured address could not be parsed or bound.
    #[error("bind error: {0}")]
    Bind(String),

    /// Accepting or serving connections failed.
    #[error("serve error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use conway_db::{BoardStore, MemoryRepository};

    use super::*;
    use crate::service::BoardService;

    #[tokio::test]
    async fn unparsable_host_is_a_bind_error() {
        let state = Arc::new(AppState::new(BoardService::new(
            BoardStore::new(MemoryRepository::new()),
            10,
        )));
        let config = ServerConfig {
            host: String::from("not a host"),
            port: 8080,
        };
        assert!(matches!(
            start_server(&config, state).await,
            Err(ServerError::Bind(msg)) if msg.contains("invalid address")
        ));
    }
}
