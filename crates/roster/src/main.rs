mod cache;
mod cli;
mod commands;
mod config;
mod output;
mod shell;
mod state;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::{Cli, CliCommand},
    config::Config,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Optional .env file; variables already set in the environment win
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let state = AppState::open(&config)
        .await
        .context("failed to initialize storage")?;

    let signal_state = state.clone();
    let signals = tokio::spawn(async move {
        shutdown_signal().await;
        signal_state.signal_shutdown();
    });

    let result = match cli.command {
        CliCommand::Run(command) => commands::run(command, cli.format, &state)
            .await
            .context("command failed"),
        CliCommand::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            match shell::run(stdin, cli.format, &state).await {
                Ok(0) => Ok(()),
                Ok(failures) => Err(anyhow::anyhow!("{failures} command(s) failed")),
                Err(err) => Err(err),
            }
        }
    };

    signals.abort();
    let closed = state.close().await;

    finish(result, closed)
}

/// Combines the command result with the shutdown result.
///
/// A command error is reported ahead of a close error; the close error is
/// still logged.
fn finish(result: Result<()>, closed: Result<()>) -> Result<()> {
    match (result, closed) {
        (Err(err), Err(close_err)) => {
            tracing::error!(error = ?close_err, "Failed to close connections");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), closed) => closed,
    }
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, cancelling...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, cancelling...");
        }
    }
}
