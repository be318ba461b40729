//! The walk route and its traversal speed.
//!
//! A [`Path`] is built once and never changes; index 0 is the home waypoint
//! the loop returns to. The speed lives beside it in [`PathModel`] because it
//! is the only piece the operator can change at run time.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use serde::Serialize;

use crate::camera::Point;
use crate::consts::{DEFAULT_ROUTE, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("invalid path: at least one waypoint is required")]
    Empty,
}

/// Ordered, non-empty, read-only waypoint sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Point>,
}

impl Path {
    /// Build a path from waypoints in traversal order.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] if `waypoints` is empty.
    pub fn new(waypoints: Vec<Point>) -> Result<Self, PathError> {
        if waypoints.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { waypoints })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.waypoints.get(index).copied()
    }

    /// Waypoint 0, where every cycle starts.
    #[must_use]
    pub fn home(&self) -> Point {
        self.waypoints[0]
    }

    #[must_use]
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Index of the waypoint closest to `point`; ties go to the lowest index.
    #[must_use]
    pub fn nearest(&self, point: Point) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, waypoint) in self.waypoints.iter().enumerate() {
            let dist = point.distance_to(*waypoint);
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// Sum of all segment lengths from waypoint 0 to the last waypoint.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.waypoints.windows(2).map(|pair| pair[0].distance_to(pair[1])).sum()
    }
}

/// A waypoint with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelledWaypoint {
    pub index: usize,
    pub label: &'static str,
    pub at: Point,
}

/// The built-in route with labels.
#[must_use]
pub fn default_route() -> Vec<LabelledWaypoint> {
    DEFAULT_ROUTE
        .iter()
        .enumerate()
        .map(|(index, &(label, x, y))| LabelledWaypoint { index, label, at: Point::new(x, y) })
        .collect()
}

/// Waypoints of the built-in route, without labels.
#[must_use]
pub fn default_waypoints() -> Vec<Point> {
    DEFAULT_ROUTE.iter().map(|&(_, x, y)| Point::new(x, y)).collect()
}

/// Resolve a built-in route label (case-insensitive) to its index.
#[must_use]
pub fn route_index_of(label: &str) -> Option<usize> {
    let wanted = label.trim();
    DEFAULT_ROUTE
        .iter()
        .position(|(name, _, _)| name.eq_ignore_ascii_case(wanted))
}

/// Inclusive operator speed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self { min: MIN_SPEED, max: MAX_SPEED }
    }
}

impl SpeedRange {
    /// Clamp `value` into the range.
    ///
    /// Returns `None` for non-finite or non-positive input, which callers
    /// treat as "ignore this request".
    #[must_use]
    pub fn clamp(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Some(value.max(self.min).min(self.max))
    }
}

/// The route plus the current traversal speed.
#[derive(Debug, Clone)]
pub struct PathModel {
    path: Path,
    speed: f64,
}

impl PathModel {
    #[must_use]
    pub fn new(path: Path) -> Self {
        Self { path, speed: DEFAULT_SPEED }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current speed in scene units per second.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the speed. Non-finite or non-positive values are rejected.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            return false;
        }
        self.speed = speed;
        true
    }
}
