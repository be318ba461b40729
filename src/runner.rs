//! Frame loop: owns the surface and drives it from a tokio interval.
//!
//! DESIGN
//! ======
//! One task owns the `Surface`. Frames come from a `tokio::time::interval`;
//! control commands come from a bounded mpsc queue. Both are handled in a
//! single `select!` loop, so a frame never overlaps another frame or a
//! command, and commands take effect before the next frame.
//!
//! While the surface is paused the interval branch is disabled entirely.
//! Resuming resets the interval so the first frame arrives one period later
//! instead of firing a burst of missed ticks.

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;

use std::time::Duration;

use scene::camera::Point;
use scene::clock::Clock;
use scene::input::{Direction, HeldDirections};
use scene::path::{PathError, route_index_of};
use scene::surface::{Surface, SurfaceConfig, SurfaceSnapshot};
use scene::ticker::{FrameTicker, TickHandle};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::env_parse;

const DEFAULT_COMMAND_QUEUE_CAPACITY: usize = 64;

/// Control messages for the frame loop.
#[derive(Debug)]
pub enum Command {
    SetSpeed(f64),
    /// Focus a waypoint by index; negative or out-of-range values are ignored.
    Focus(i64),
    /// Focus a waypoint of the built-in route by label.
    FocusLabel(String),
    Pause,
    Resume,
    Hold { direction: Direction, held: bool },
    Snapshot(oneshot::Sender<SurfaceSnapshot>),
    /// Tear the surface down and end the loop.
    Shutdown,
}

/// Frame registration bookkeeping for the interval-driven loop.
///
/// The loop polls its interval only while a handle is live, so an
/// unregistered surface receives no frames at all.
#[derive(Debug, Default)]
pub struct IntervalTicker {
    live: Option<TickHandle>,
    period: Duration,
}

impl IntervalTicker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { live: None, period }
    }

    #[must_use]
    pub fn live(&self) -> Option<TickHandle> {
        self.live
    }
}

impl FrameTicker for IntervalTicker {
    fn register(&mut self) -> TickHandle {
        let handle = TickHandle::new();
        self.live = Some(handle);
        debug!(%handle, period_ms = self.period.as_millis(), "frame callback registered");
        handle
    }

    fn unregister(&mut self, handle: TickHandle) {
        if self.live == Some(handle) {
            self.live = None;
            debug!(%handle, "frame callback unregistered");
        }
    }
}

/// Handle to a running frame loop.
pub struct Runner {
    pub commands: mpsc::Sender<Command>,
    pub task: JoinHandle<()>,
}

/// Start a surface on `waypoints` and spawn its frame loop.
///
/// # Errors
///
/// Returns [`PathError::Empty`] if `waypoints` is empty.
pub fn spawn_runner<C>(waypoints: Vec<Point>, config: SurfaceConfig, clock: C, period: Duration) -> Result<Runner, PathError>
where
    C: Clock + Send + 'static,
{
    let surface = Surface::start(waypoints, config, clock, IntervalTicker::new(period))?;
    let capacity = env_parse("PATHWALK_COMMAND_QUEUE", DEFAULT_COMMAND_QUEUE_CAPACITY).max(1);
    let (tx, rx) = mpsc::channel(capacity);
    info!(period_ms = period.as_millis(), capacity, "frame loop configured");
    let task = tokio::spawn(run_loop(surface, rx, period));
    Ok(Runner { commands: tx, task })
}

async fn run_loop<C: Clock>(mut surface: Surface<C, IntervalTicker>, mut rx: mpsc::Receiver<Command>, period: Duration) {
    let mut frames = tokio::time::interval(period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut held = HeldDirections::none();

    loop {
        let running = surface.ticker().live().is_some();
        tokio::select! {
            _ = frames.tick(), if running => {
                surface.on_frame(&held);
            }
            maybe_cmd = rx.recv() => {
                let Some(cmd) = maybe_cmd else {
                    debug!("command queue closed");
                    break;
                };
                if matches!(cmd, Command::Shutdown) {
                    break;
                }
                let was_live = surface.ticker().live();
                apply(&mut surface, &mut held, cmd);
                let now_live = surface.ticker().live();
                if now_live.is_some() && now_live != was_live {
                    frames.reset();
                }
            }
        }
    }

    surface.teardown();
    info!("frame loop stopped");
}

/// Apply one control command between frames.
pub(crate) fn apply<C: Clock, T: FrameTicker>(surface: &mut Surface<C, T>, held: &mut HeldDirections, cmd: Command) {
    match cmd {
        Command::SetSpeed(speed) => surface.set_speed(speed),
        Command::Focus(index) => match usize::try_from(index) {
            Ok(index) => surface.focus_on(index),
            Err(_) => debug!(index, "negative focus index; ignoring"),
        },
        Command::FocusLabel(label) => match route_index_of(&label) {
            Some(index) => surface.focus_on(index),
            None => debug!(%label, "unknown waypoint label; ignoring"),
        },
        Command::Pause => surface.pause(),
        Command::Resume => surface.resume(),
        Command::Hold { direction, held: is_held } => held.set(direction, is_held),
        Command::Snapshot(reply) => {
            if reply.send(surface.snapshot()).is_err() {
                debug!("snapshot requester went away");
            }
        }
        Command::Shutdown => {}
    }
}
