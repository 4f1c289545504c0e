// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The commandlet executor: one consistent run lifecycle for every command.
//!
//! Per invocation the executor guarantees:
//! - the unit of work always completes (success, logical failure, or error)
//!   before any notification or telemetry is dispatched;
//! - exactly one telemetry event is recorded: a command event on the
//!   success/failure/cancel paths, an exception event on the error path;
//! - a cancelled run suppresses success/failure notifications entirely but
//!   still records its command event;
//! - notification dispatch always precedes the telemetry await.

use crate::cancel::CancelController;
use crate::messages::{localize, MessageKey};
use crate::settings::SettingsAdapter;
use async_trait::async_trait;
use fxb_adapters::subprocess::SpawnError;
use fxb_adapters::{
    ChannelAdapter, NotifyAction, NotifyAdapter, ProgressAdapter, TelemetryAdapter, TelemetryProps,
};
use fxb_core::{Clock, CommandSpec};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// The unit of work threw. Distinct from logical failure (`Ok(false)`).
#[derive(Debug, Error)]
pub enum WorkError {
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error("{0}")]
    Failed(String),
}

/// Errors surfaced to the executor's caller. Logical failures and
/// cancellations are terminal at the executor and never appear here.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Work(#[from] WorkError),
}

/// Per-invocation run state handed to the unit of work.
///
/// Carries the run's cancel controller; a fresh handle is created for every
/// `execute` call so a shared executor can run concurrently without
/// cross-call interference.
pub struct RunHandle {
    cancel: CancelController,
    surface_bound: bool,
}

impl RunHandle {
    fn new() -> Self {
        Self { cancel: CancelController::new(), surface_bound: false }
    }

    fn with_surface() -> Self {
        Self { cancel: CancelController::new(), surface_bound: true }
    }

    pub fn controller(&self) -> &CancelController {
        &self.cancel
    }

    /// Whether the executor already bound a progress surface to this run.
    ///
    /// One surface per run: process-backed works check this and reuse the
    /// executor's surface instead of beginning a second one with the same
    /// title.
    pub fn has_surface(&self) -> bool {
        self.surface_bound
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token for the spawn layer; fires when this run is cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }
}

/// The command body injected into the executor.
///
/// `Ok(true)` is logical success, `Ok(false)` logical failure; `Err` is the
/// exceptional path. Implementations must not retain resources beyond their
/// own return.
#[async_trait]
pub trait UnitOfWork<P: Send + Sync>: Send + Sync {
    async fn run(&self, params: &P, run: &RunHandle) -> Result<bool, WorkError>;
}

/// Orchestrates one external command run against injected collaborators.
pub struct CommandletExecutor<N, T, Ch, Pr, S, C> {
    notifier: N,
    telemetry: T,
    channel: Ch,
    progress: Pr,
    settings: S,
    clock: C,
}

impl<N, T, Ch, Pr, S, C> CommandletExecutor<N, T, Ch, Pr, S, C>
where
    N: NotifyAdapter,
    T: TelemetryAdapter,
    Ch: ChannelAdapter,
    Pr: ProgressAdapter,
    S: SettingsAdapter,
    C: Clock,
{
    pub fn new(notifier: N, telemetry: T, channel: Ch, progress: Pr, settings: S, clock: C) -> Self {
        Self { notifier, telemetry, channel, progress, settings, clock }
    }

    pub fn channel(&self) -> &Ch {
        &self.channel
    }

    /// Run one command body through the full lifecycle.
    ///
    /// With `cancellable` set, the run is wrapped in a cancellable progress
    /// surface; user cancel marks the run cancelled and warns once, but the
    /// unit of work still runs to completion unless it observes the token
    /// itself. The run handle records the binding, so process-backed works
    /// share the surface instead of beginning their own.
    pub async fn execute<P, W>(
        &self,
        command: &CommandSpec,
        cancellable: bool,
        params: P,
        work: &W,
    ) -> Result<bool, ExecuteError>
    where
        P: Send + Sync,
        W: UnitOfWork<P>,
    {
        let started = self.clock.now();
        let started_epoch_ms = self.clock.epoch_ms();
        tracing::info!(command = command.log_name(), cancellable, "executing commandlet");

        // Read fresh on every invocation, never cached.
        if self.settings.clear_output_on_run() {
            self.channel.clear();
        }

        let (run, result) = if cancellable {
            let title = localize(MessageKey::ProgressText, &[command.display_name()]);
            let surface = self.progress.begin(&title, true);
            let user_cancel = surface.user_cancel();
            let run = RunHandle::with_surface();

            let result = {
                let work_fut = work.run(&params, &run);
                tokio::pin!(work_fut);
                let mut warned = false;
                loop {
                    tokio::select! {
                        res = &mut work_fut => break res,
                        _ = user_cancel.cancelled(), if !warned => {
                            // Advisory: the work keeps running; only the
                            // completion-time reporting changes.
                            warned = true;
                            run.controller().cancel();
                            self.notifier.canceled(&localize(
                                MessageKey::RunCanceled,
                                &[command.display_name()],
                            ));
                        }
                    }
                }
            };
            surface.finish();
            (run, result)
        } else {
            let run = RunHandle::new();
            let result = work.run(&params, &run).await;
            (run, result)
        };

        match result {
            Ok(success) => {
                self.report_completion(command, &run, success).await;

                let mut properties = TelemetryProps::new();
                properties
                    .insert("outcome".to_string(), outcome_label(&run, success).to_string());
                let duration = self.clock.elapsed_since(started);
                if let Err(e) = self
                    .telemetry
                    .send_command_event(command.log_name(), started_epoch_ms, duration, properties)
                    .await
                {
                    tracing::warn!(command = command.log_name(), error = %e, "telemetry send failed");
                }
                Ok(success)
            }
            Err(e) => {
                self.channel.append_line("");
                self.channel.append_line(&e.to_string());

                let message = localize(MessageKey::CommandFailedToRun, &[command.display_name()]);
                if let Err(ne) = self.notifier.failure(&message).await {
                    tracing::warn!(command = command.log_name(), error = %ne, "failure notification failed");
                }
                if let Err(te) =
                    self.telemetry.send_exception(command.log_name(), &e.to_string()).await
                {
                    tracing::warn!(command = command.log_name(), error = %te, "telemetry send failed");
                }
                Err(ExecuteError::Work(e))
            }
        }
    }

    async fn report_completion(&self, command: &CommandSpec, run: &RunHandle, success: bool) {
        if run.is_cancelled() {
            tracing::info!(command = command.log_name(), "run canceled, notifications suppressed");
            return;
        }
        if success {
            let message = localize(MessageKey::SuccessText, &[command.display_name()]);
            match self.notifier.success(&message).await {
                Ok(NotifyAction::RevealChannel) => self.channel.reveal(),
                Ok(NotifyAction::Dismissed) => {}
                Err(e) => {
                    tracing::warn!(command = command.log_name(), error = %e, "success notification failed");
                }
            }
        } else {
            let message = localize(MessageKey::FailureText, &[command.display_name()]);
            if let Err(e) = self.notifier.failure(&message).await {
                tracing::warn!(command = command.log_name(), error = %e, "failure notification failed");
            }
        }
    }
}

fn outcome_label(run: &RunHandle, success: bool) -> &'static str {
    if run.is_cancelled() {
        "canceled"
    } else if success {
        "success"
    } else {
        "failure"
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
