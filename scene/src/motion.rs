//! Actor motion along the path.
//!
//! DESIGN
//! ======
//! The controller keeps the actor position and the index of the next waypoint
//! to reach. Each frame the host converts elapsed time into a distance budget
//! and calls [`MotionController::advance`]. When the last waypoint is reached
//! the actor dwells there, then teleports home and starts the next cycle.
//!
//! `target_index == path.len()` means the cycle is finished and the dwell is
//! running (or about to be armed). The dwell is a deadline compared against
//! the time passed to `advance`, never a scheduled callback.
//!
//! Speed changes call [`MotionController::replan`], which resumes from the
//! waypoint after the nearest one instead of restarting the cycle.

#[cfg(test)]
#[path = "motion_test.rs"]
mod motion_test;

use std::time::Duration;

use tracing::debug;

use crate::camera::Point;
use crate::consts::DWELL_MS;
use crate::path::Path;

/// What to do with distance left over after landing on a waypoint mid-frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Leftover {
    /// Stop on the waypoint; the rest of the frame budget is dropped.
    #[default]
    Discard,
    /// Keep walking into the following segments with the remaining budget.
    Carry,
}

/// Outcome of one [`MotionController::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved toward the target without reaching it.
    Moved,
    /// Landed on waypoint `index` (the last one reached this frame).
    Arrived(usize),
    /// Holding at the last waypoint.
    Dwelling,
    /// Dwell expired; back at waypoint 0.
    Restarted,
}

/// Snapshot of the actor state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub position: Point,
    pub target_index: usize,
}

#[derive(Debug, Clone)]
pub struct MotionController {
    position: Point,
    target_index: usize,
    dwell: Duration,
    dwell_until: Option<Duration>,
    leftover: Leftover,
}

impl MotionController {
    /// Place the actor on waypoint 0, heading for waypoint 1.
    #[must_use]
    pub fn new(path: &Path, dwell: Duration, leftover: Leftover) -> Self {
        let mut controller = Self {
            position: path.home(),
            target_index: 0,
            dwell,
            dwell_until: None,
            leftover,
        };
        controller.replan(path);
        controller
    }

    /// Default dwell and leftover handling.
    #[must_use]
    pub fn with_defaults(path: &Path) -> Self {
        Self::new(path, Duration::from_millis(DWELL_MS), Leftover::default())
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    #[must_use]
    pub fn state(&self) -> MotionState {
        MotionState { position: self.position, target_index: self.target_index }
    }

    #[must_use]
    pub fn is_dwelling(&self, path: &Path) -> bool {
        self.target_index >= path.len()
    }

    /// Resume from the waypoint after the one nearest the current position.
    ///
    /// Any running dwell is cancelled; if the nearest waypoint is the last
    /// one a fresh dwell is armed on the next `advance`.
    pub fn replan(&mut self, path: &Path) {
        let nearest = path.nearest(self.position);
        self.target_index = nearest + 1;
        self.dwell_until = None;
        debug!(nearest, target_index = self.target_index, "motion replanned");
    }

    /// Walk up to `distance` scene units toward the target.
    ///
    /// `now` is the scene time used for the dwell deadline.
    pub fn advance(&mut self, path: &Path, distance: f64, now: Duration) -> Step {
        if self.target_index >= path.len() {
            return self.dwell_or_restart(path, now);
        }

        let mut budget = if distance.is_finite() { distance.max(0.0) } else { 0.0 };
        let mut arrived = None;
        while let Some(target) = path.get(self.target_index) {
            let spent = self.position.distance_to(target);
            let (next, landed) = self.position.step_toward(target, budget);
            self.position = next;
            if !landed {
                break;
            }
            arrived = Some(self.target_index);
            self.target_index += 1;
            budget = (budget - spent).max(0.0);
            if self.leftover == Leftover::Discard || budget == 0.0 {
                break;
            }
        }

        if self.target_index >= path.len() {
            self.dwell_until = Some(now + self.dwell);
            debug!(until_ms = (now + self.dwell).as_millis(), "cycle finished; dwelling");
        }
        match arrived {
            Some(index) => Step::Arrived(index),
            None => Step::Moved,
        }
    }

    fn dwell_or_restart(&mut self, path: &Path, now: Duration) -> Step {
        let until = *self.dwell_until.get_or_insert(now + self.dwell);
        if now < until {
            return Step::Dwelling;
        }
        self.position = path.home();
        self.target_index = 1;
        self.dwell_until = None;
        debug!("dwell elapsed; restarting at home waypoint");
        Step::Restarted
    }
}
