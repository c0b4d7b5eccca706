//! Application route configuration.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::employee_routes;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/employees", employee_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Employee Management API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    storage: StorageStatus,
}

#[derive(Serialize)]
struct StorageStatus {
    backend: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check; pings the database when one is attached
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = match &state.database {
        None => StorageStatus {
            backend: "memory",
            status: "healthy",
            error: None,
        },
        Some(database) => match database.ping().await {
            Ok(()) => StorageStatus {
                backend: "postgres",
                status: "healthy",
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Database ping failed");
                StorageStatus {
                    backend: "postgres",
                    status: "unhealthy",
                    error: Some(e.to_string()),
                }
            }
        },
    };

    let healthy = storage.error.is_none();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        storage,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
