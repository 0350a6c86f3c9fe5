//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::planner::find_path;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", post(plan_route))
        .route("/graph", get(network_graph))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Apply the rules for the request's preferences, then search the
/// transformed network.
async fn plan_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: RouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "rejected route request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let prefs = req.preferences.unwrap_or_default();

    // Copying and searching the network is CPU work; keep it off the executor.
    let response = tokio::task::spawn_blocking(move || {
        let outcome = state.engine.run(&state.network, &prefs);
        match find_path(&outcome.graph, &req.origin, &req.destination) {
            Ok(route) => {
                info!(
                    origin = %route.origin(),
                    destination = %route.destination(),
                    hops = route.hops(),
                    weight = route.weight,
                    applied = ?outcome.applied,
                    "route found"
                );
                RouteResponse::found(&route, &outcome.graph, outcome.applied)
            }
            Err(e) => {
                info!(
                    origin = %req.origin,
                    destination = %req.destination,
                    applied = ?outcome.applied,
                    reason = %e,
                    "no route"
                );
                RouteResponse::failed(&e, outcome.applied)
            }
        }
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("routing task failed: {e}"),
    })?;

    Ok(Json(response))
}

/// Export the base network.
async fn network_graph(State(state): State<AppState>) -> Json<GraphResponse> {
    Json(GraphResponse::from_graph(&state.network))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
