#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{FOCUS_LOCK_MS, FOCUS_ZOOM, PAN_STEP_PX, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::input::{Direction, DirectionalInput};
use crate::path::Path;

/// A point in either screen or scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Step toward `target` by at most `max_step`.
    ///
    /// Returns the new point and whether it landed exactly on `target`.
    #[must_use]
    pub fn step_toward(self, target: Point, max_step: f64) -> (Point, bool) {
        let remaining = self.distance_to(target);
        if remaining <= max_step {
            return (target, true);
        }
        let t = max_step / remaining;
        let next = Point { x: self.x + (target.x - self.x) * t, y: self.y + (target.y - self.y) * t };
        (next, false)
    }
}

/// Size of the visible area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: VIEWPORT_WIDTH, height: VIEWPORT_HEIGHT }
    }
}

impl Viewport {
    /// Centre of the viewport in screen coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Camera state for the scene.
///
/// `center` is the scene point shown at the middle of the viewport.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub center: Point,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { center: Viewport::default().center(), zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a scene point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: Viewport) -> Point {
        let mid = viewport.center();
        Point {
            x: (world.x - self.center.x) * self.zoom + mid.x,
            y: (world.y - self.center.y) * self.zoom + mid.y,
        }
    }
}

/// What happens to the zoom level when a focus lock ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomPolicy {
    /// Keep the focus zoom; panning resumes from the magnified view.
    #[default]
    Retain,
    /// Return to the zoom that was active before the first focus command.
    Restore,
}

/// Tuning for [`CameraController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Scene pixels moved per frame for each held direction.
    pub pan_step: f64,
    /// Zoom applied on focus.
    pub focus_zoom: f64,
    /// Length of the pan lockout after a focus command.
    pub focus_lock: Duration,
    pub zoom_policy: ZoomPolicy,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pan_step: PAN_STEP_PX,
            focus_zoom: FOCUS_ZOOM,
            focus_lock: Duration::from_millis(FOCUS_LOCK_MS),
            zoom_policy: ZoomPolicy::default(),
        }
    }
}

/// Who currently controls the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Directional input pans the camera.
    Free,
    /// A focus command owns the camera until `until`; input is ignored.
    Focused {
        /// Waypoint the camera snapped to.
        index: usize,
        /// Scene time at which control returns to [`CameraMode::Free`].
        until: Duration,
        /// Zoom in effect before the focus chain started.
        prior_zoom: f64,
    },
}

/// Arbitrates the camera between continuous panning and focus commands.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera,
    mode: CameraMode,
    settings: CameraSettings,
}

impl CameraController {
    #[must_use]
    pub fn new(camera: Camera, settings: CameraSettings) -> Self {
        Self { camera, mode: CameraMode::Free, settings }
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    #[must_use]
    pub fn is_focus_locked(&self) -> bool {
        matches!(self.mode, CameraMode::Focused { .. })
    }

    /// Snap onto waypoint `index` and lock out panning.
    ///
    /// An index outside the path is ignored. A new focus while already locked
    /// re-snaps and restarts the lock from `now`.
    pub fn focus_on(&mut self, path: &Path, index: usize, now: Duration) -> bool {
        let Some(target) = path.get(index) else {
            debug!(index, len = path.len(), "focus index out of range; ignoring");
            return false;
        };
        let prior_zoom = match self.mode {
            CameraMode::Focused { prior_zoom, .. } => prior_zoom,
            CameraMode::Free => self.camera.zoom,
        };
        self.camera.center = target;
        self.camera.zoom = self.settings.focus_zoom;
        self.mode = CameraMode::Focused { index, until: now + self.settings.focus_lock, prior_zoom };
        debug!(index, x = target.x, y = target.y, "camera focused");
        true
    }

    /// Advance one frame.
    ///
    /// An expired focus lock is released first, so held input applies on the
    /// same tick the lock ends. Returns whether the camera centre moved.
    pub fn tick(&mut self, now: Duration, input: &dyn DirectionalInput) -> bool {
        if let CameraMode::Focused { until, prior_zoom, .. } = self.mode {
            if now < until {
                return false;
            }
            if self.settings.zoom_policy == ZoomPolicy::Restore {
                self.camera.zoom = prior_zoom;
            }
            self.mode = CameraMode::Free;
            debug!(zoom = self.camera.zoom, "focus lock released");
        }

        let step = self.settings.pan_step;
        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.is_held(Direction::Right) {
            dx += step;
        }
        if input.is_held(Direction::Left) {
            dx -= step;
        }
        if input.is_held(Direction::Down) {
            dy += step;
        }
        if input.is_held(Direction::Up) {
            dy -= step;
        }
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        self.camera.center.x += dx;
        self.camera.center.y += dy;
        true
    }
}
