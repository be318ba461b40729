//! Frame callback registration.
//!
//! The host owns the actual frame loop. The surface only tells it whether it
//! wants frames: [`FrameTicker::register`] when starting or resuming,
//! [`FrameTicker::unregister`] when pausing or tearing down. A host must not
//! deliver frames for a handle that is not registered.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Identifies one frame callback registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TickHandle(Uuid);

impl TickHandle {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TickHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-side frame callback registry.
pub trait FrameTicker {
    /// Start delivering frames; returns the registration handle.
    fn register(&mut self) -> TickHandle;

    /// Stop delivering frames for `handle`.
    fn unregister(&mut self, handle: TickHandle);
}
