//! Conway board service binary.
//!
//! Startup sequence:
//!
//! 1. Load `conway-config.yaml` (defaults when absent) and environment
//!    overrides.
//! 2. Install structured logging. `RUST_LOG` wins over the configured
//!    level; `logging.json` selects the JSON formatter.
//! 3. Open the data directory and load every board record into the cache.
//! 4. Serve the HTTP API until `Ctrl-C`.

mod error;

use std::path::Path;
use std::sync::Arc;

use conway_api::{AppState, BoardService, ServerConfig};
use conway_core::config::{LoggingConfig, ServiceConfig};
use conway_db::{BoardStore, FileRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Config file looked up relative to the working directory.
const CONFIG_PATH: &str = "conway-config.yaml";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Configuration.
    let (config, from_file) = load_config()?;

    // 2. Structured logging.
    init_tracing(&config.logging)?;
    info!(
        config_file = from_file,
        data_dir = %config.storage.data_dir.display(),
        default_max_generations = config.simulation.default_max_generations,
        "conway-server starting"
    );

    // 3. Durable storage and cache.
    let repository = FileRepository::open(&config.storage.data_dir).await?;
    let store = BoardStore::open(repository).await?;
    let service = BoardService::new(store, config.simulation.default_max_generations);
    let state = Arc::new(AppState::new(service));

    // 4. HTTP.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    conway_api::start_server(&server_config, state).await?;

    info!("conway-server stopped");
    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults.
///
/// Returns the config and whether the file was found.
fn load_config() -> Result<(ServiceConfig, bool), AppError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok((ServiceConfig::from_file(config_path)?, true))
    } else {
        Ok((ServiceConfig::from_env()?, false))
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_e| EnvFilter::try_new(&logging.level))
        .map_err(|e| AppError::LogFilter(format!("{}: {e}", logging.level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
