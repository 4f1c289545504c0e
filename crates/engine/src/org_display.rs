// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worked-example commandlet: `fx org display --json`.
//!
//! Shows the full shape of a process-backed unit of work: build the command
//! line, spawn through the subprocess adapter, stream output to the channel
//! sink under a bound progress surface, then classify the buffered stdout.

use crate::executor::{RunHandle, UnitOfWork, WorkError};
use crate::messages::{localize, MessageKey};
use crate::progress::ProgressNotification;
use async_trait::async_trait;
use fxb_adapters::subprocess::OutputChunk;
use fxb_adapters::{ChannelAdapter, NotifyAdapter, ProgressAdapter, TelemetryAdapter};
use fxb_core::{classify, CliOutcome, CommandBuilder, CommandSpec};

/// Default name of the wrapped vendor CLI binary
pub const DEFAULT_PROGRAM: &str = "fx";

/// Parameters gathered for org display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgDisplayParams {
    /// Org alias to inspect; the CLI's default org when absent.
    pub target_org: Option<String>,
}

/// Build the external command line for one org-display run.
pub fn build_org_display_command(program: &str, params: &OrgDisplayParams) -> CommandSpec {
    let mut builder = CommandBuilder::new(program)
        .display_name("Org Display")
        .log_name("org_display")
        .arg("org")
        .arg("display")
        .json();
    if let Some(alias) = &params.target_org {
        builder = builder.arg("--target-org").arg(alias);
    }
    builder.build()
}

/// Unit of work running `fx org display` and classifying its output.
pub struct OrgDisplayWork<N, T, Ch, Pr> {
    program: String,
    notifier: N,
    telemetry: T,
    channel: Ch,
    progress: Pr,
}

impl<N, T, Ch, Pr> OrgDisplayWork<N, T, Ch, Pr> {
    pub fn new(notifier: N, telemetry: T, channel: Ch, progress: Pr) -> Self {
        Self { program: DEFAULT_PROGRAM.to_string(), notifier, telemetry, channel, progress }
    }

    /// Override the CLI binary, e.g. when it is installed under a full path.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[async_trait]
impl<N, T, Ch, Pr> UnitOfWork<OrgDisplayParams> for OrgDisplayWork<N, T, Ch, Pr>
where
    N: NotifyAdapter,
    T: TelemetryAdapter,
    Ch: ChannelAdapter,
    Pr: ProgressAdapter,
{
    async fn run(&self, params: &OrgDisplayParams, run: &RunHandle) -> Result<bool, WorkError> {
        let command = build_org_display_command(&self.program, params);
        let mut execution = fxb_adapters::spawn(&command, run.cancel_token())?;
        self.channel.append_line(&command.to_command_line());

        let exit = execution.exit_signal();
        let observe = async {
            if run.has_surface() {
                // The executor's surface already covers this run; its cancel
                // path cancels the shared controller, which the spawn layer
                // observes through the run token.
                exit.wait().await
            } else {
                ProgressNotification::show(
                    command.display_name(),
                    exit,
                    run.controller(),
                    &self.progress,
                    &self.notifier,
                )
                .await
            }
        };
        // Stream chunks while the exit is observed; both end at process exit.
        let drain = async {
            let mut stdout = String::new();
            while let Some(chunk) = execution.next_chunk().await {
                if let OutputChunk::Stdout(line) = &chunk {
                    stdout.push_str(line);
                    stdout.push('\n');
                }
                self.channel.append_line(chunk.text());
            }
            stdout
        };
        let (code, stdout) = tokio::join!(observe, drain);

        if run.is_cancelled() {
            // A killed run has nothing classifiable.
            return Ok(false);
        }

        let command_line = command.to_command_line();
        match classify(&command_line, &stdout) {
            Ok(CliOutcome::Success { result }) => {
                if let Some(username) = result.get("username").and_then(|v| v.as_str()) {
                    self.channel.append_line(&format!("Connected as {username}"));
                }
                Ok(true)
            }
            Ok(CliOutcome::Failure { name, message }) => {
                tracing::info!(
                    command = command.log_name(),
                    code,
                    error = name.as_deref().unwrap_or("unknown"),
                    "vendor CLI reported failure"
                );
                self.channel.append_line(&message);
                Ok(false)
            }
            Err(e) => {
                // Dedicated failure mode: report with its own message and
                // exception event, then resolve as logical failure.
                self.notifier.warning(&localize(MessageKey::UnexpectedOutput, &[&command_line]));
                if let Err(te) =
                    self.telemetry.send_exception(command.log_name(), &e.to_string()).await
                {
                    tracing::warn!(command = command.log_name(), error = %te, "telemetry send failed");
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[path = "org_display_tests.rs"]
mod tests;
