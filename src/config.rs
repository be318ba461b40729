//! Command-line and environment configuration.
//!
//! Every flag has an environment fallback so the binary can be configured from
//! a `.env` file. Secondary tuning knobs that are not worth a flag go through
//! [`env_parse`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scene::camera::{CameraSettings, ZoomPolicy};
use scene::consts::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use scene::motion::Leftover;
use scene::path::SpeedRange;
use scene::surface::SurfaceConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Parser, Debug)]
#[command(name = "pathwalk", about = "Waypoint walk visualization runtime")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the frame loop and the HTTP control API (default).
    Serve,
    /// List the CSV/ZIP files among the given paths and print the first CSV.
    Inspect {
        #[arg(required = false)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ZoomAfterFocus {
    Retain,
    Restore,
}

impl From<ZoomAfterFocus> for ZoomPolicy {
    fn from(value: ZoomAfterFocus) -> Self {
        match value {
            ZoomAfterFocus::Retain => Self::Retain,
            ZoomAfterFocus::Restore => Self::Restore,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "PATHWALK_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Frame period in milliseconds.
    #[arg(long, env = "PATHWALK_FRAME_MS", default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,

    /// Initial actor speed in scene units per second.
    #[arg(long, env = "PATHWALK_SPEED", default_value_t = DEFAULT_SPEED)]
    pub speed: f64,

    #[arg(long, env = "PATHWALK_MIN_SPEED", default_value_t = MIN_SPEED)]
    pub min_speed: f64,

    #[arg(long, env = "PATHWALK_MAX_SPEED", default_value_t = MAX_SPEED)]
    pub max_speed: f64,

    /// Zoom level once a focus lock ends.
    #[arg(long, env = "PATHWALK_ZOOM_POLICY", value_enum, default_value_t = ZoomAfterFocus::Retain)]
    pub zoom_policy: ZoomAfterFocus,

    /// Spend leftover frame distance on the next segment instead of dropping it.
    #[arg(long, env = "PATHWALK_CARRY_OVER", default_value_t = false)]
    pub carry_over: bool,
}

impl ServeArgs {
    #[must_use]
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    /// Speed range with the bounds ordered and kept positive.
    #[must_use]
    pub fn speed_range(&self) -> SpeedRange {
        let lo = self.min_speed.min(self.max_speed);
        let hi = self.min_speed.max(self.max_speed);
        if lo.is_finite() && hi.is_finite() && lo > 0.0 {
            SpeedRange { min: lo, max: hi }
        } else {
            SpeedRange::default()
        }
    }

    #[must_use]
    pub fn surface_config(&self) -> SurfaceConfig {
        let leftover = if self.carry_over { Leftover::Carry } else { Leftover::Discard };
        SurfaceConfig {
            speed: self.speed,
            speed_range: self.speed_range(),
            leftover,
            camera: CameraSettings { zoom_policy: self.zoom_policy.into(), ..CameraSettings::default() },
            ..SurfaceConfig::default()
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset or invalid.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
