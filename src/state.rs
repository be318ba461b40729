//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds only the sender side of the frame loop's command queue; the surface
//! itself lives inside the loop task and is never shared.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use scene::surface::SurfaceSnapshot;
use tokio::sync::{mpsc, oneshot};

use crate::runner::Command;

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("frame loop is not running")]
    LoopGone,
}

/// Shared application state. Clone is required by Axum.
#[derive(Clone)]
pub struct AppState {
    commands: mpsc::Sender<Command>,
}

impl AppState {
    #[must_use]
    pub fn new(commands: mpsc::Sender<Command>) -> Self {
        Self { commands }
    }

    /// Queue a command for the frame loop.
    ///
    /// # Errors
    ///
    /// Returns `LoopGone` if the loop has stopped.
    pub async fn send(&self, cmd: Command) -> Result<(), ControlError> {
        self.commands.send(cmd).await.map_err(|_| ControlError::LoopGone)
    }

    /// Ask the frame loop for its current state.
    ///
    /// Commands are applied in order, so a snapshot requested after a command
    /// reflects that command.
    ///
    /// # Errors
    ///
    /// Returns `LoopGone` if the loop has stopped.
    pub async fn snapshot(&self) -> Result<SurfaceSnapshot, ControlError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| ControlError::LoopGone)
    }

    /// Send `cmd`, then return the snapshot that follows it.
    ///
    /// # Errors
    ///
    /// Returns `LoopGone` if the loop has stopped.
    pub async fn apply(&self, cmd: Command) -> Result<SurfaceSnapshot, ControlError> {
        self.send(cmd).await?;
        self.snapshot().await
    }
}
