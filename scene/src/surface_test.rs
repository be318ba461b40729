#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::*;
use crate::camera::ZoomPolicy;
use crate::clock::ManualClock;
use crate::input::{Direction, HeldDirections};
use crate::path::default_waypoints;

// =============================================================
// Helpers
// =============================================================

/// Ticker that records registrations so tests can see what the surface asked for.
#[derive(Clone, Default)]
struct RecordingTicker {
    active: Rc<RefCell<HashSet<TickHandle>>>,
    registrations: Rc<RefCell<usize>>,
}

impl RecordingTicker {
    fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    fn registrations(&self) -> usize {
        *self.registrations.borrow()
    }
}

impl FrameTicker for RecordingTicker {
    fn register(&mut self) -> TickHandle {
        let handle = TickHandle::new();
        self.active.borrow_mut().insert(handle);
        *self.registrations.borrow_mut() += 1;
        handle
    }

    fn unregister(&mut self, handle: TickHandle) {
        self.active.borrow_mut().remove(&handle);
    }
}

fn assert_near(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

fn triangle() -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
}

/// Config that lets the triangle scenario run at 10 units/s.
fn slow_config() -> SurfaceConfig {
    SurfaceConfig {
        speed: 10.0,
        speed_range: SpeedRange { min: 1.0, max: 1_000.0 },
        ..SurfaceConfig::default()
    }
}

fn start_triangle(config: SurfaceConfig) -> (Surface<ManualClock, RecordingTicker>, ManualClock, RecordingTicker) {
    let clock = ManualClock::new();
    let ticker = RecordingTicker::default();
    let surface = Surface::start(triangle(), config, clock.clone(), ticker.clone()).unwrap();
    (surface, clock, ticker)
}

fn frame_after(surface: &mut Surface<ManualClock, RecordingTicker>, clock: &ManualClock, ms: u64) -> bool {
    clock.advance_ms(ms);
    surface.on_frame(&HeldDirections::none())
}

// =============================================================
// Start / teardown
// =============================================================

#[test]
fn start_with_empty_path_fails() {
    let result = Surface::start(Vec::new(), SurfaceConfig::default(), ManualClock::new(), RecordingTicker::default());
    assert!(matches!(result, Err(PathError::Empty)));
}

#[test]
fn start_registers_once_and_runs() {
    let (surface, _clock, ticker) = start_triangle(slow_config());
    assert!(surface.is_running());
    assert_eq!(ticker.active_count(), 1);
    assert_eq!(ticker.registrations(), 1);
    assert_eq!(surface.motion().position(), Point::new(0.0, 0.0));
    assert_eq!(surface.motion().target_index(), 1);
}

#[test]
fn start_clamps_initial_speed() {
    let config = SurfaceConfig { speed: 5_000.0, ..SurfaceConfig::default() };
    let surface = Surface::start(default_waypoints(), config, ManualClock::new(), RecordingTicker::default()).unwrap();
    assert_eq!(surface.speed(), 300.0);
}

#[test]
fn start_with_rejected_speed_stays_in_range() {
    let config = SurfaceConfig {
        speed: f64::NAN,
        speed_range: SpeedRange { min: 150.0, max: 250.0 },
        ..SurfaceConfig::default()
    };
    let surface = Surface::start(default_waypoints(), config, ManualClock::new(), RecordingTicker::default()).unwrap();
    assert_eq!(surface.speed(), 150.0);

    let config = SurfaceConfig { speed: -1.0, ..SurfaceConfig::default() };
    let surface = Surface::start(default_waypoints(), config, ManualClock::new(), RecordingTicker::default()).unwrap();
    assert_eq!(surface.speed(), 100.0);
}

#[test]
fn default_surface_uses_default_route_and_camera() {
    let surface =
        Surface::start(default_waypoints(), SurfaceConfig::default(), ManualClock::new(), RecordingTicker::default())
            .unwrap();
    assert_eq!(surface.path().len(), 6);
    assert_eq!(surface.speed(), 100.0);
    assert_eq!(surface.camera().center, Point::new(400.0, 300.0));
    assert_eq!(surface.camera().zoom, 1.0);
}

#[test]
fn teardown_unregisters() {
    let (surface, _clock, ticker) = start_triangle(slow_config());
    surface.teardown();
    assert_eq!(ticker.active_count(), 0);
}

#[test]
fn drop_unregisters() {
    let (surface, _clock, ticker) = start_triangle(slow_config());
    drop(surface);
    assert_eq!(ticker.active_count(), 0);
}

#[test]
fn teardown_while_paused_is_clean() {
    let (mut surface, _clock, ticker) = start_triangle(slow_config());
    surface.pause();
    surface.teardown();
    assert_eq!(ticker.active_count(), 0);
    assert_eq!(ticker.registrations(), 1);
}

// =============================================================
// Motion through frames
// =============================================================

#[test]
fn triangle_scenario_one_second_frames() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());

    frame_after(&mut surface, &clock, 1000);
    assert_eq!(surface.motion().position(), Point::new(10.0, 0.0));
    assert_eq!(surface.motion().target_index(), 2);

    frame_after(&mut surface, &clock, 1000);
    assert_eq!(surface.motion().position(), Point::new(10.0, 10.0));
    assert_eq!(surface.motion().target_index(), 3);

    frame_after(&mut surface, &clock, 500);
    assert_eq!(surface.motion().position(), Point::new(0.0, 0.0));
    assert_eq!(surface.motion().target_index(), 1);
}

#[test]
fn dwell_not_finished_before_half_second() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 1000);
    frame_after(&mut surface, &clock, 1000);
    frame_after(&mut surface, &clock, 499);
    assert_eq!(surface.motion().position(), Point::new(10.0, 10.0));
    assert_eq!(surface.motion().target_index(), 3);
}

#[test]
fn distance_scales_with_elapsed_time() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 250);
    assert_near(surface.motion().position(), Point::new(2.5, 0.0));
    frame_after(&mut surface, &clock, 500);
    assert_near(surface.motion().position(), Point::new(7.5, 0.0));
}

// =============================================================
// Speed
// =============================================================

#[test]
fn set_speed_clamps_into_range() {
    let mut surface =
        Surface::start(default_waypoints(), SurfaceConfig::default(), ManualClock::new(), RecordingTicker::default())
            .unwrap();
    surface.set_speed(20.0);
    assert_eq!(surface.speed(), 50.0);
    surface.set_speed(400.0);
    assert_eq!(surface.speed(), 300.0);
    surface.set_speed(180.0);
    assert_eq!(surface.speed(), 180.0);
}

#[test]
fn set_speed_ignores_invalid_values() {
    let (mut surface, _clock, _ticker) = start_triangle(slow_config());
    surface.set_speed(0.0);
    surface.set_speed(-3.0);
    surface.set_speed(f64::NAN);
    assert_eq!(surface.speed(), 10.0);
}

#[test]
fn set_speed_replans_from_nearest_waypoint() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 1000);
    frame_after(&mut surface, &clock, 700);
    assert_near(surface.motion().position(), Point::new(10.0, 7.0));

    surface.set_speed(20.0);
    assert_eq!(surface.motion().target_index(), 3);
    assert_near(surface.motion().position(), Point::new(10.0, 7.0));
}

#[test]
fn set_speed_twice_is_idempotent() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 1300);
    surface.set_speed(40.0);
    let once = surface.motion().state();
    surface.set_speed(40.0);
    assert_eq!(surface.motion().state(), once);
}

#[test]
fn new_speed_applies_to_next_frame() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 100);
    assert_near(surface.motion().position(), Point::new(1.0, 0.0));
    surface.set_speed(50.0);
    frame_after(&mut surface, &clock, 100);
    assert_near(surface.motion().position(), Point::new(6.0, 0.0));
}

// =============================================================
// Camera
// =============================================================

#[test]
fn focus_snaps_camera_and_zooms() {
    let (mut surface, _clock, _ticker) = start_triangle(slow_config());
    surface.focus_on(1);
    assert_eq!(surface.camera().center, Point::new(10.0, 0.0));
    assert_eq!(surface.camera().zoom, 2.0);
    assert!(matches!(surface.camera_mode(), CameraMode::Focused { index: 1, .. }));
}

#[test]
fn focus_out_of_range_changes_nothing() {
    let (mut surface, _clock, _ticker) = start_triangle(slow_config());
    let before = surface.camera();
    surface.focus_on(3);
    surface.focus_on(99);
    assert_eq!(surface.camera(), before);
    assert_eq!(surface.camera_mode(), CameraMode::Free);
}

#[test]
fn pan_locked_during_focus_and_resumes_after() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    surface.focus_on(1);
    let right = HeldDirections::none().with(Direction::Right);

    for _ in 0..4 {
        clock.advance_ms(100);
        surface.on_frame(&right);
    }
    assert_eq!(surface.camera().center, Point::new(10.0, 0.0));

    clock.advance_ms(100);
    surface.on_frame(&right);
    assert_eq!(surface.camera_mode(), CameraMode::Free);
    assert_eq!(surface.camera().center, Point::new(15.0, 0.0));
    assert_eq!(surface.camera().zoom, 2.0);
}

#[test]
fn focus_between_frames_locks_from_call_time() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 1_000);
    clock.advance_ms(900);
    surface.focus_on(1);

    let right = HeldDirections::none().with(Direction::Right);
    clock.advance_ms(100);
    surface.on_frame(&right);
    assert_eq!(surface.camera().center, Point::new(10.0, 0.0));
    assert!(matches!(surface.camera_mode(), CameraMode::Focused { .. }));

    // Lock began at 1900ms of scene time, so it ends at 2400ms.
    clock.advance_ms(300);
    surface.on_frame(&right);
    assert_eq!(surface.camera().center, Point::new(10.0, 0.0));
    clock.advance_ms(100);
    surface.on_frame(&right);
    assert_eq!(surface.camera_mode(), CameraMode::Free);
    assert_eq!(surface.camera().center, Point::new(15.0, 0.0));
}

#[test]
fn focus_while_paused_ignores_wall_time_gap() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 200);
    surface.pause();
    clock.advance_ms(10_000);
    surface.focus_on(2);
    assert!(matches!(
        surface.camera_mode(),
        CameraMode::Focused { until, .. } if until == Duration::from_millis(700)
    ));
}

#[test]
fn restore_zoom_policy_reverts_after_focus() {
    let mut config = slow_config();
    config.camera.zoom_policy = ZoomPolicy::Restore;
    let (mut surface, clock, _ticker) = start_triangle(config);
    surface.focus_on(2);
    frame_after(&mut surface, &clock, 600);
    assert_eq!(surface.camera().zoom, 1.0);
    assert_eq!(surface.camera().center, Point::new(10.0, 10.0));
}

#[test]
fn free_camera_pans_each_frame() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    let held = HeldDirections::none().with(Direction::Up).with(Direction::Left);
    for _ in 0..3 {
        clock.advance_ms(16);
        surface.on_frame(&held);
    }
    assert_eq!(surface.camera().center, Point::new(385.0, 285.0));
}

// =============================================================
// Pause / resume
// =============================================================

#[test]
fn pause_unregisters_and_freezes_state() {
    let (mut surface, clock, ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 300);
    let motion = surface.motion().state();
    let camera = surface.camera();

    surface.pause();
    assert!(!surface.is_running());
    assert_eq!(ticker.active_count(), 0);

    let held = HeldDirections::none().with(Direction::Down);
    for _ in 0..10 {
        clock.advance_ms(1000);
        assert!(!surface.on_frame(&held));
    }
    assert_eq!(surface.motion().state(), motion);
    assert_eq!(surface.camera(), camera);
}

#[test]
fn resume_does_not_catch_up() {
    let (mut surface, clock, ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 300);
    surface.pause();
    clock.advance_ms(60_000);
    surface.resume();
    assert_eq!(ticker.active_count(), 1);

    frame_after(&mut surface, &clock, 100);
    assert_near(surface.motion().position(), Point::new(4.0, 0.0));
    assert_eq!(surface.scene_time(), Duration::from_millis(400));
}

#[test]
fn duplicate_pause_and_resume_are_noops() {
    let (mut surface, _clock, ticker) = start_triangle(slow_config());
    surface.resume();
    assert_eq!(ticker.registrations(), 1);
    surface.pause();
    surface.pause();
    assert_eq!(ticker.active_count(), 0);
    surface.resume();
    surface.resume();
    assert_eq!(ticker.registrations(), 2);
    assert_eq!(ticker.active_count(), 1);
}

#[test]
fn focus_lock_does_not_expire_while_paused() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    surface.focus_on(0);
    surface.pause();
    clock.advance_ms(5_000);
    surface.resume();

    let right = HeldDirections::none().with(Direction::Right);
    frame_after(&mut surface, &clock, 100);
    clock.advance_ms(100);
    surface.on_frame(&right);
    assert_eq!(surface.camera().center, Point::new(0.0, 0.0));
    assert!(matches!(surface.camera_mode(), CameraMode::Focused { .. }));
}

#[test]
fn focus_while_paused_snaps_immediately() {
    let (mut surface, _clock, _ticker) = start_triangle(slow_config());
    surface.pause();
    surface.focus_on(2);
    assert_eq!(surface.camera().center, Point::new(10.0, 10.0));
}

// =============================================================
// Frame stats
// =============================================================

#[test]
fn fps_published_after_one_second() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    assert_eq!(surface.current_fps(), 0);
    for _ in 0..50 {
        frame_after(&mut surface, &clock, 20);
    }
    assert_eq!(surface.current_fps(), 50);
}

#[test]
fn fps_window_restarts_on_resume() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    for _ in 0..10 {
        frame_after(&mut surface, &clock, 20);
    }
    surface.pause();
    clock.advance_ms(2_000);
    surface.resume();
    frame_after(&mut surface, &clock, 20);
    assert_eq!(surface.current_fps(), 0);
}

// =============================================================
// Snapshot
// =============================================================

#[test]
fn snapshot_reflects_state() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    frame_after(&mut surface, &clock, 500);
    surface.focus_on(1);
    let snap = surface.snapshot();
    assert!(snap.running);
    assert_eq!(snap.speed, 10.0);
    assert_near(snap.actor, Point::new(5.0, 0.0));
    assert_eq!(snap.target_index, 1);
    assert_eq!(snap.camera.center, Point::new(10.0, 0.0));
    assert_eq!(snap.camera.zoom, 2.0);
    assert!(snap.camera.focus_locked);
    assert_eq!(snap.camera.focus_index, Some(1));
    assert_near(snap.actor_screen, Point::new(390.0, 300.0));
}

#[test]
fn snapshot_reports_dwelling_at_last_waypoint() {
    let (mut surface, clock, _ticker) = start_triangle(slow_config());
    assert!(!surface.snapshot().dwelling);
    frame_after(&mut surface, &clock, 1_000);
    frame_after(&mut surface, &clock, 1_000);
    assert!(surface.snapshot().dwelling);
    frame_after(&mut surface, &clock, 500);
    assert!(!surface.snapshot().dwelling);
}

#[test]
fn snapshot_serializes_to_json() {
    let (surface, _clock, _ticker) = start_triangle(slow_config());
    let json = serde_json::to_value(surface.snapshot()).unwrap();
    assert_eq!(json["running"], true);
    assert_eq!(json["target_index"], 1);
    assert_eq!(json["dwelling"], false);
    assert_eq!(json["actor"]["x"], 0.0);
    assert_eq!(json["camera"]["focus_locked"], false);
    assert!(json["camera"]["focus_index"].is_null());
}
