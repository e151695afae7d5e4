//! API server: axum router over a TCP listener.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, info, warn};

use super::types::*;
use crate::registry::ToolRegistry;
use crate::server::ShutdownSignal;
use crate::tool::{ToolInput, execute_guarded};

/// Shared state accessible to all route handlers.
pub struct ApiState {
    pub registry: Arc<ToolRegistry>,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            started_at: Instant::now(),
        }
    }
}

/// Build the axum router with all API routes.
pub fn router(state: Arc<ApiState>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(handle_health))
        .route("/api/tools", get(handle_list_tools))
        .route("/api/tools/{id}", get(handle_get_tool))
        .route("/api/tools/{id}/run", post(handle_run_tool))
        .with_state(state)
}

/// CORS policy for the given origins. An entry of `"*"` allows any origin.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}

/// Serve `app` on `listener` until the shutdown signal is received.
pub async fn serve(
    listener: TcpListener,
    app: axum::Router,
    mut shutdown_rx: broadcast::Receiver<ShutdownSignal>,
) -> Result<(), std::io::Error> {
    info!(addr = %listener.local_addr()?, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("API server shutting down");
        })
        .await
}

// ── Route handlers ──────────────────────────────────────────────────────

async fn handle_health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::build_info::VERSION.to_string(),
        git_hash: crate::build_info::GIT_HASH.to_string(),
        build_profile: crate::build_info::BUILD_PROFILE.to_string(),
        tool_count: state.registry.len(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

async fn handle_list_tools(State(state): State<Arc<ApiState>>) -> Json<Vec<ToolDescriptorDto>> {
    let mut tools: Vec<ToolDescriptorDto> = state
        .registry
        .list()
        .iter()
        .map(|t| ToolDescriptorDto::from(t.descriptor()))
        .collect();
    tools.sort_by(|a, b| a.id.cmp(&b.id));
    Json(tools)
}

async fn handle_get_tool(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ToolDescriptorDto>, (StatusCode, Json<ErrorResponse>)> {
    match state.registry.get(&id) {
        Some(tool) => Ok(Json(ToolDescriptorDto::from(tool.descriptor()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Tool '{id}' not found."),
            }),
        )),
    }
}

async fn handle_run_tool(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(req): Json<ToolRunRequest>,
) -> (StatusCode, Json<ToolRunResult>) {
    let Some(tool) = state.registry.get(&id) else {
        debug!(id = %id, "Run requested for unknown tool");
        return (StatusCode::NOT_FOUND, Json(ToolRunResult::not_found(&id)));
    };

    let input: ToolInput = req.into_input();
    let output = execute_guarded(tool.as_ref(), &input);
    let status = if output.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    debug!(id = %tool.id(), status = %status, "Tool run finished");

    (status, Json(ToolRunResult::from(output)))
}
