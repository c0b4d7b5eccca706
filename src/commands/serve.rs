//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, StorageBackend};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, InMemoryEmployeeStore, Schema};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    apply_overrides(&mut config, args);
    tracing::info!(storage = ?config.storage, "Starting server...");

    let app_state = match config.storage {
        StorageBackend::Postgres => {
            let db = Database::open(&config.database_url, Schema::Migrate)
                .await
                .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
            tracing::info!("Database connected");
            AppState::with_database(Arc::new(db), config.hasher)?
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on shutdown");
            AppState::with_repository(Arc::new(InMemoryEmployeeStore::new()), config.hasher)?
        }
    };

    let app = create_router(app_state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Command-line flags win over the environment.
fn apply_overrides(config: &mut Config, args: ServeArgs) {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(storage) = args.storage {
        config.storage = storage;
    }
}
