//! Visualization control routes.
//!
//! Invalid requests that the surface treats as no-ops (out-of-range focus,
//! unknown label, out-of-range speed) still answer `200` with the unchanged
//! snapshot. Only a malformed body or a stopped frame loop is an error.

#[cfg(test)]
#[path = "control_test.rs"]
mod control_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use scene::input::Direction;
use scene::path::{LabelledWaypoint, default_route};
use scene::surface::SurfaceSnapshot;
use serde::Deserialize;

use crate::runner::Command;
use crate::state::{AppState, ControlError};

#[derive(Deserialize)]
pub struct SpeedBody {
    pub speed: f64,
}

/// Either `{"index": n}` or `{"label": "Triage"}`. `index` wins if both are set.
#[derive(Deserialize)]
pub struct FocusBody {
    pub index: Option<i64>,
    pub label: Option<String>,
}

/// Either `{"direction": "left", ...}` or a key name such as
/// `{"key": "ArrowLeft", ...}` (W/A/S/D or arrows). `direction` wins if both
/// are set.
#[derive(Deserialize)]
pub struct InputBody {
    pub direction: Option<Direction>,
    pub key: Option<String>,
    pub held: bool,
}

type SnapshotResult = Result<Json<SurfaceSnapshot>, StatusCode>;

/// `GET /api/state`: current surface snapshot.
pub async fn get_state(State(state): State<AppState>) -> SnapshotResult {
    state.snapshot().await.map(Json).map_err(control_error_to_status)
}

/// `GET /api/waypoints`: the labelled route, for a focus picker.
pub async fn list_waypoints() -> Json<Vec<LabelledWaypoint>> {
    Json(default_route())
}

/// `POST /api/speed`: set traversal speed (clamped by the surface).
pub async fn set_speed(State(state): State<AppState>, Json(body): Json<SpeedBody>) -> SnapshotResult {
    apply(&state, Command::SetSpeed(body.speed)).await
}

/// `POST /api/focus`: focus the camera on a waypoint.
pub async fn focus(State(state): State<AppState>, Json(body): Json<FocusBody>) -> SnapshotResult {
    let cmd = match (body.index, body.label) {
        (Some(index), _) => Command::Focus(index),
        (None, Some(label)) => Command::FocusLabel(label),
        (None, None) => return Err(StatusCode::BAD_REQUEST),
    };
    apply(&state, cmd).await
}

/// `POST /api/pause`: stop the frame loop from advancing the surface.
pub async fn pause(State(state): State<AppState>) -> SnapshotResult {
    apply(&state, Command::Pause).await
}

/// `POST /api/resume`: resume frames without catching up.
pub async fn resume(State(state): State<AppState>) -> SnapshotResult {
    apply(&state, Command::Resume).await
}

/// `POST /api/input`: press or release one pan direction.
pub async fn set_input(State(state): State<AppState>, Json(body): Json<InputBody>) -> SnapshotResult {
    let direction = body
        .direction
        .or_else(|| body.key.as_deref().and_then(Direction::from_key))
        .ok_or(StatusCode::BAD_REQUEST)?;
    apply(&state, Command::Hold { direction, held: body.held }).await
}

async fn apply(state: &AppState, cmd: Command) -> SnapshotResult {
    state.apply(cmd).await.map(Json).map_err(control_error_to_status)
}

pub(crate) fn control_error_to_status(err: ControlError) -> StatusCode {
    match err {
        ControlError::LoopGone => StatusCode::SERVICE_UNAVAILABLE,
    }
}
