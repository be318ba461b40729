mod config;
mod files;
mod inspect;
mod routes;
mod runner;
mod state;

use clap::Parser;
use scene::clock::SystemClock;
use scene::path::{PathError, default_waypoints};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{Cli, Command, ServeArgs};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("cannot start visualization: {0}")]
    Path(#[from] PathError),
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
    #[error(transparent)]
    Inspect(#[from] inspect::InspectError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        debug!(error = %e, "no .env file loaded");
    }
    let cli = Cli::parse();

    match cli.command {
        None | Some(Command::Serve) => serve(&cli.serve).await,
        Some(Command::Inspect { files }) => {
            let report = inspect::inspect(&files).await?;
            print!("{}", inspect::render(&report));
            Ok(())
        }
    }
}

async fn serve(args: &ServeArgs) -> Result<(), AppError> {
    let runner = runner::spawn_runner(default_waypoints(), args.surface_config(), SystemClock::new(), args.frame_period())?;
    let commands = runner.commands.clone();
    let app = routes::app(state::AppState::new(runner.commands));

    let port = args.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| AppError::Bind { port, source })?;

    info!(%port, "pathwalk listening");
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Serve);

    stop_runner(&commands).await;
    if let Err(e) = runner.task.await {
        warn!(error = %e, "frame loop task ended abnormally");
    }
    served
}

async fn stop_runner(commands: &mpsc::Sender<runner::Command>) {
    if commands.send(runner::Command::Shutdown).await.is_err() {
        debug!("frame loop already stopped");
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "ctrl-c handler unavailable; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
