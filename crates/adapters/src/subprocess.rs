// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vendor CLI process spawning: output streaming and exit signalling

use fxb_core::CommandSpec;
use std::process::Stdio;
use std::time::Instant;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Errors from spawning the external process
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// One ordered chunk of process output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputChunk {
    Stdout(String),
    Stderr(String),
}

impl OutputChunk {
    pub fn text(&self) -> &str {
        match self {
            OutputChunk::Stdout(text) | OutputChunk::Stderr(text) => text,
        }
    }
}

/// Single-fire exit event, clonable so multiple waiters (progress surface,
/// output collector) can observe the same exit code.
#[derive(Clone)]
pub struct ExitSignal {
    rx: watch::Receiver<Option<i32>>,
}

impl ExitSignal {
    /// Resolve to the normalized exit code once the process terminates.
    pub async fn wait(mut self) -> i32 {
        loop {
            if let Some(code) = *self.rx.borrow() {
                return code;
            }
            if self.rx.changed().await.is_err() {
                // Reaper dropped without publishing; treat as failure.
                return (*self.rx.borrow()).unwrap_or(1);
            }
        }
    }
}

/// One external process invocation: an ordered output-chunk stream plus the
/// exit signal. Owned by the executor run that created it.
#[derive(Debug)]
pub struct Execution {
    output: mpsc::UnboundedReceiver<OutputChunk>,
    exit: watch::Receiver<Option<i32>>,
}

impl Execution {
    pub fn exit_signal(&self) -> ExitSignal {
        ExitSignal { rx: self.exit.clone() }
    }

    /// Next output chunk; `None` once both pipes have closed.
    pub async fn next_chunk(&mut self) -> Option<OutputChunk> {
        self.output.recv().await
    }

    /// Wait for process exit without consuming the output stream.
    pub async fn wait(&mut self) -> i32 {
        self.exit_signal().wait().await
    }
}

/// Spawn the command with piped stdio.
///
/// If `cancel` fires while the process runs, the child is killed and reaped;
/// the exit signal still fires with the (normalized) code. Callers that only
/// want advisory cancellation pass a token they never wire to anything.
pub fn spawn(command: &CommandSpec, cancel: CancellationToken) -> Result<Execution, SpawnError> {
    let mut cmd = tokio::process::Command::new(command.program());
    cmd.args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| SpawnError::Spawn {
        program: command.program().to_string(),
        source,
    })?;

    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let (exit_tx, exit_rx) = watch::channel(None);

    if let Some(stdout) = child.stdout.take() {
        let tx = out_tx.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send(OutputChunk::Stdout(line)).is_err() {
                    break;
                }
            }
        });
    }
    if let Some(stderr) = child.stderr.take() {
        let tx = out_tx;
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send(OutputChunk::Stderr(line)).is_err() {
                    break;
                }
            }
        });
    }

    // Reaper task: waits the child out (killing it on cancel) so no zombie
    // survives, then publishes the exit code exactly once.
    let log_name = command.log_name().to_string();
    let started = Instant::now();
    tokio::spawn(async move {
        let status = tokio::select! {
            status = child.wait() => status,
            _ = cancel.cancelled() => {
                tracing::info!(command = %log_name, "cancel requested, killing child");
                if let Err(e) = child.start_kill() {
                    tracing::warn!(command = %log_name, error = %e, "kill failed");
                }
                child.wait().await
            }
        };
        let code = match status {
            Ok(status) => normalize_exit(status),
            Err(e) => {
                tracing::warn!(command = %log_name, error = %e, "wait failed");
                1
            }
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(command = %log_name, code, elapsed_ms, "process exited");
        let _ = exit_tx.send(Some(code));
    });

    Ok(Execution { output: out_rx, exit: exit_rx })
}

/// Exit code with unix signal deaths mapped to the conventional `128 + signo`.
pub fn normalize_exit(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            code
        } else if let Some(sig) = status.signal() {
            128 + sig
        } else {
            1
        }
    }
    #[cfg(windows)]
    {
        status.code().unwrap_or(1)
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
