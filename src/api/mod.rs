pub mod get_file;
pub mod validate;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::registry::HostRegistry;
use crate::sftp::cache::SessionCache;
use crate::sftp::SessionError;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<HostRegistry>,
    pub cache: Arc<SessionCache>,
}

/// Request-level failures, mapped to the wire format the endpoint promises:
/// a JSON body `{"error": <message or list of messages>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<String>),

    #[error("Specified ip address is not registered in service!")]
    UnregisteredHost,

    #[error("File not found!")]
    NotFound,

    #[error(transparent)]
    Upstream(#[from] SessionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, json!({ "error": errors }))
            }
            ApiError::UnregisteredHost => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            ApiError::Upstream(ref e) => {
                let status = match e {
                    SessionError::ConnectTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, json!({ "error": e.to_string() }))
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router. Only GET is wired for the get-file route,
/// so other verbs get a 405 from the method router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sftp/api/v1.0/get-file", get(get_file::get_file))
        .route("/livez", get(|| async { "ok" }))
        .route("/health", get(health_handler))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    hosts: usize,
    sessions: usize,
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        hosts: state.registry.len(),
        sessions: state.cache.len().await,
    })
}

/// Start the HTTP server with graceful shutdown support.
pub async fn start_server(
    listen_addr: &str,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(addr = %listen_addr, "Gateway listening");
    start_server_on_listener(listener, state, shutdown).await
}

/// Start the server on a pre-bound listener (avoids TOCTOU port races in tests).
pub async fn start_server_on_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
