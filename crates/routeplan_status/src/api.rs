//! HTTP API for the status route.

use crate::StatusServerConfig;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

/// API state: the service name reported to callers.
#[derive(Debug, Clone)]
pub struct StatusState {
    service: Arc<str>,
}

impl StatusState {
    /// Creates new API state.
    pub fn new(service: impl AsRef<str>) -> Self {
        Self {
            service: Arc::from(service.as_ref()),
        }
    }
}

/// Creates the status API router.
pub fn create_router(state: StatusState) -> Router {
    Router::new()
        .route("/api/v1/status", get(status))
        .with_state(state)
}

/// Status endpoint.
async fn status(State(state): State<StatusState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "service": &*state.service})),
    )
}

/// Bind and serve the status route until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip(config), fields(addr = %config.addr(), service = %config.service()))]
pub async fn serve(config: StatusServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!(addr = %listener.local_addr()?, "Status responder listening");
    axum::serve(listener, create_router(StatusState::new(config.service()))).await
}
