//! Shared numeric constants for the scene crate.

// ── Route ───────────────────────────────────────────────────────

/// The fixed walk route: display label and scene coordinates, in traversal order.
pub const DEFAULT_ROUTE: [(&str, f64, f64); 6] = [
    ("Arrival", 100.0, 350.0),
    ("Register", 250.0, 350.0),
    ("Triage", 360.0, 350.0),
    ("LowAcuity A", 360.0, 280.0),
    ("LowAcuity B", 615.0, 280.0),
    ("Exit", 615.0, 350.0),
];

// ── Motion ──────────────────────────────────────────────────────

/// Starting traversal speed in scene units per second.
pub const DEFAULT_SPEED: f64 = 100.0;

/// Lower bound of the operator speed control.
pub const MIN_SPEED: f64 = 50.0;

/// Upper bound of the operator speed control.
pub const MAX_SPEED: f64 = 300.0;

/// Hold at the last waypoint before the loop restarts, in milliseconds.
pub const DWELL_MS: u64 = 500;

// ── Camera ──────────────────────────────────────────────────────

/// Camera movement per frame for each held direction, in scene pixels.
pub const PAN_STEP_PX: f64 = 5.0;

/// Zoom applied when the camera focuses a waypoint.
pub const FOCUS_ZOOM: f64 = 2.0;

/// How long pan input stays locked out after a focus command, in milliseconds.
pub const FOCUS_LOCK_MS: u64 = 500;

/// Default viewport width in CSS pixels.
pub const VIEWPORT_WIDTH: f64 = 800.0;

/// Default viewport height in CSS pixels.
pub const VIEWPORT_HEIGHT: f64 = 600.0;

// ── Stats ───────────────────────────────────────────────────────

/// Length of one frames-per-second sampling window, in milliseconds.
pub const FPS_WINDOW_MS: u64 = 1000;
