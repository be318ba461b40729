//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP API is the control panel for a running visualization: it sets the
//! speed, requests camera focus, pauses and resumes, forwards held pan
//! directions, and reports the surface snapshot for display.

pub mod control;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// All API routes.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/state", get(control::get_state))
        .route("/api/waypoints", get(control::list_waypoints))
        .route("/api/speed", post(control::set_speed))
        .route("/api/focus", post(control::focus))
        .route("/api/pause", post(control::pause))
        .route("/api/resume", post(control::resume))
        .route("/api/input", post(control::set_input))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
