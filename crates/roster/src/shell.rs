//! Line-oriented session over one open repository.
//!
//! Each input line is parsed like the arguments of a single `roster`
//! invocation. The store and cache stay open between lines.

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::cli::{OutputFormat, ShellLine};
use crate::commands;
use crate::state::AppState;

/// Runs commands read from `input` until end of input, `exit`, or shutdown.
///
/// A failing line is reported on stderr and does not end the session.
/// Returns the number of lines that failed.
pub async fn run<R>(input: R, format: OutputFormat, state: &AppState) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut failures = 0;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read command")?,
            _ = state.shutdown_requested() => {
                tracing::info!("Shutdown requested, ending session");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        if !run_line(line, format, state).await {
            failures += 1;
        }
    }

    tracing::debug!(failures, "Session ended");
    Ok(failures)
}

/// Parses and runs one line, reporting problems on stderr.
///
/// Returns false if the line failed.
async fn run_line(line: &str, format: OutputFormat, state: &AppState) -> bool {
    let words = match shell_words::split(line) {
        Ok(words) => words,
        Err(err) => {
            eprintln!("error: {err}");
            return false;
        }
    };

    let parsed = match ShellLine::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(err) => {
            // --help lands here too, and is not a failure
            let _ = err.print();
            return !err.use_stderr();
        }
    };

    match commands::run(parsed.command, format, state).await {
        Ok(()) => true,
        Err(err) => {
            eprintln!("error: {err}");
            false
        }
    }
}
