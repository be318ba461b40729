//! Waypoint-following actor and camera core for the map walk visualization.
//!
//! This crate holds everything that decides *where things are* each frame: an
//! actor walking a fixed polyline of waypoints at an adjustable speed, a camera
//! that pans under directional input or snaps onto a waypoint, and a frame
//! counter. It does no rendering and no I/O. The host runtime owns the frame
//! loop, injects a [`clock::Clock`] and a [`ticker::FrameTicker`], and forwards
//! operator commands to the [`surface::Surface`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`surface`] | Composition root and the per-frame update order |
//! | [`path`] | Immutable waypoint path plus the mutable traversal speed |
//! | [`motion`] | Actor stepping, dwell and nearest-waypoint replanning |
//! | [`camera`] | Points, camera transform and the Free/Focused state machine |
//! | [`input`] | Directional "held" input |
//! | [`stats`] | Frames-per-second sampling |
//! | [`clock`] | Injected time sources |
//! | [`ticker`] | Frame callback registration contract |
//! | [`consts`] | Default route, timings and limits |

pub mod camera;
pub mod clock;
pub mod consts;
pub mod input;
pub mod motion;
pub mod path;
pub mod stats;
pub mod surface;
pub mod ticker;
