//! Composition root for one visualization.
//!
//! DESIGN
//! ======
//! `Surface` owns the path model, motion controller, camera controller and
//! frame stats, plus the injected clock and frame ticker. The host calls
//! [`Surface::on_frame`] for every frame it delivers; the update order is
//! stats, then camera, then motion.
//!
//! Two time bases are kept. Frame stats use wall time from the clock. Motion
//! and camera deadlines use *scene time*, which only advances inside
//! `on_frame`. Pausing unregisters from the ticker, so scene time stands still
//! while paused and resume continues without catching up.
//!
//! Control calls (`set_speed`, `focus_on`, `pause`, `resume`) are synchronous
//! and take effect before the next frame. Invalid requests are ignored.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::camera::{Camera, CameraController, CameraMode, CameraSettings, Point, Viewport};
use crate::clock::Clock;
use crate::consts::{DEFAULT_SPEED, DWELL_MS, FPS_WINDOW_MS};
use crate::input::DirectionalInput;
use crate::motion::{Leftover, MotionController, Step};
use crate::path::{Path, PathError, PathModel, SpeedRange};
use crate::stats::FrameStats;
use crate::ticker::{FrameTicker, TickHandle};

/// Start-up settings for a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConfig {
    /// Initial speed; clamped into `speed_range` at start.
    pub speed: f64,
    pub speed_range: SpeedRange,
    pub dwell: Duration,
    pub leftover: Leftover,
    pub camera: CameraSettings,
    /// Camera at start, before any pan or focus.
    pub initial_camera: Camera,
    pub viewport: Viewport,
    pub fps_window: Duration,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            speed: DEFAULT_SPEED,
            speed_range: SpeedRange::default(),
            dwell: Duration::from_millis(DWELL_MS),
            leftover: Leftover::default(),
            camera: CameraSettings::default(),
            initial_camera: Camera { center: viewport.center(), zoom: 1.0 },
            viewport,
            fps_window: Duration::from_millis(FPS_WINDOW_MS),
        }
    }
}

/// Camera part of a [`SurfaceSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraSnapshot {
    pub center: Point,
    pub zoom: f64,
    pub focus_locked: bool,
    pub focus_index: Option<usize>,
}

/// Everything a renderer or control panel needs to display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceSnapshot {
    pub running: bool,
    pub fps: u32,
    pub speed: f64,
    pub actor: Point,
    /// Actor position after the camera transform, in viewport pixels.
    pub actor_screen: Point,
    pub target_index: usize,
    /// Holding at the last waypoint before the loop restarts.
    pub dwelling: bool,
    pub camera: CameraSnapshot,
}

pub struct Surface<C: Clock, T: FrameTicker> {
    clock: C,
    ticker: T,
    handle: Option<TickHandle>,
    model: PathModel,
    motion: MotionController,
    camera: CameraController,
    stats: FrameStats,
    config: SurfaceConfig,
    last_frame: Duration,
    scene_time: Duration,
}

impl<C: Clock, T: FrameTicker> Surface<C, T> {
    /// Build all components and register for frames.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] if `waypoints` is empty.
    pub fn start(waypoints: Vec<Point>, config: SurfaceConfig, clock: C, mut ticker: T) -> Result<Self, PathError> {
        let path = Path::new(waypoints)?;
        let mut model = PathModel::new(path);
        let speed = config
            .speed_range
            .clamp(config.speed)
            .or_else(|| config.speed_range.clamp(DEFAULT_SPEED))
            .unwrap_or(DEFAULT_SPEED);
        model.set_speed(speed);
        let motion = MotionController::new(model.path(), config.dwell, config.leftover);
        let camera = CameraController::new(config.initial_camera, config.camera);
        let now = clock.now();
        let stats = FrameStats::with_window(now, config.fps_window);
        let handle = ticker.register();
        info!(
            %handle,
            waypoints = model.path().len(),
            length = model.path().total_length(),
            speed = model.speed(),
            "surface started"
        );

        Ok(Self {
            clock,
            ticker,
            handle: Some(handle),
            model,
            motion,
            camera,
            stats,
            config,
            last_frame: now,
            scene_time: Duration::ZERO,
        })
    }

    /// Frame callback. Does nothing and returns false while paused.
    pub fn on_frame(&mut self, input: &dyn DirectionalInput) -> bool {
        if self.handle.is_none() {
            return false;
        }
        let wall = self.clock.now();
        let elapsed = wall.saturating_sub(self.last_frame);
        self.last_frame = wall;
        self.scene_time += elapsed;

        if let Some(fps) = self.stats.tick(wall) {
            debug!(fps, "frame rate sampled");
        }
        self.camera.tick(self.scene_time, input);

        let distance = self.model.speed() * elapsed.as_secs_f64();
        match self.motion.advance(self.model.path(), distance, self.scene_time) {
            Step::Arrived(index) => debug!(index, "actor reached waypoint"),
            Step::Restarted => debug!("actor loop restarted"),
            Step::Moved | Step::Dwelling => {}
        }
        true
    }

    /// Change the traversal speed and replan from the nearest waypoint.
    ///
    /// The value is clamped into the configured range. Non-finite or
    /// non-positive values are ignored.
    pub fn set_speed(&mut self, value: f64) {
        let Some(speed) = self.config.speed_range.clamp(value) else {
            debug!(value, "rejected speed; ignoring");
            return;
        };
        self.model.set_speed(speed);
        self.motion.replan(self.model.path());
        debug!(speed, target_index = self.motion.target_index(), "speed changed");
    }

    /// Point the camera at waypoint `index`. Out-of-range indices are ignored.
    ///
    /// The lock starts at the moment of the call, not at the last frame.
    pub fn focus_on(&mut self, index: usize) {
        let now = self.command_time();
        self.camera.focus_on(self.model.path(), index, now);
    }

    /// Scene time of a call made between frames. Frozen while paused.
    fn command_time(&self) -> Duration {
        if self.handle.is_none() {
            return self.scene_time;
        }
        self.scene_time + self.clock.now().saturating_sub(self.last_frame)
    }

    /// Stop receiving frames. No-op when already paused.
    pub fn pause(&mut self) {
        let Some(handle) = self.handle.take() else {
            debug!("pause while paused; ignoring");
            return;
        };
        self.ticker.unregister(handle);
        info!(%handle, "surface paused");
    }

    /// Start receiving frames again. No-op when already running.
    pub fn resume(&mut self) {
        if self.handle.is_some() {
            debug!("resume while running; ignoring");
            return;
        }
        let now = self.clock.now();
        self.last_frame = now;
        self.stats.restart(now);
        let handle = self.ticker.register();
        self.handle = Some(handle);
        info!(%handle, "surface resumed");
    }

    /// Unregister from the ticker and release all state.
    pub fn teardown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.ticker.unregister(handle);
            info!(%handle, "surface torn down");
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub fn current_fps(&self) -> u32 {
        self.stats.fps()
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.model.speed()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.model.path()
    }

    #[must_use]
    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera.camera()
    }

    #[must_use]
    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode()
    }

    /// Scene time accumulated over delivered frames.
    #[must_use]
    pub fn scene_time(&self) -> Duration {
        self.scene_time
    }

    #[must_use]
    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    #[must_use]
    pub fn snapshot(&self) -> SurfaceSnapshot {
        let camera = self.camera.camera();
        let actor = self.motion.position();
        let focus_index = match self.camera.mode() {
            CameraMode::Focused { index, .. } => Some(index),
            CameraMode::Free => None,
        };
        SurfaceSnapshot {
            running: self.is_running(),
            fps: self.stats.fps(),
            speed: self.model.speed(),
            actor,
            actor_screen: camera.world_to_screen(actor, self.config.viewport),
            target_index: self.motion.target_index(),
            dwelling: self.motion.is_dwelling(self.model.path()),
            camera: CameraSnapshot {
                center: camera.center,
                zoom: camera.zoom,
                focus_locked: focus_index.is_some(),
                focus_index,
            },
        }
    }
}

impl<C: Clock, T: FrameTicker> Drop for Surface<C, T> {
    fn drop(&mut self) {
        self.release();
    }
}
