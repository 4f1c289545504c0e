// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commandlet: precondition check, parameter gathering, then execution

use crate::executor::{CommandletExecutor, ExecuteError, UnitOfWork};
use crate::settings::SettingsAdapter;
use async_trait::async_trait;
use fxb_adapters::{ChannelAdapter, NotifyAdapter, ProgressAdapter, TelemetryAdapter};
use fxb_core::{Clock, CommandSpec, GatherOutcome};
use thiserror::Error;

/// Errors from the gathering step itself (not the user cancelling)
#[derive(Debug, Error)]
pub enum GatherError {
    #[error("input error: {0}")]
    Input(String),
}

/// Errors surfaced by a commandlet run
#[derive(Debug, Error)]
pub enum CommandletError {
    #[error(transparent)]
    Gather(#[from] GatherError),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// Validates environment state before anything runs
#[async_trait]
pub trait PreconditionChecker: Send + Sync {
    async fn check(&self) -> bool;
}

/// Collects user input for the command
#[async_trait]
pub trait ParametersGatherer<P>: Send + Sync {
    async fn gather(&self) -> Result<GatherOutcome<P>, GatherError>;
}

/// How a commandlet run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandletOutcome {
    /// Preconditions not met; nothing ran.
    Skipped,
    /// The user backed out during gathering.
    Canceled,
    /// The executor ran the unit of work to completion.
    Completed { success: bool },
}

/// The full user-facing pipeline for one command.
pub struct Commandlet<K, G, W> {
    checker: K,
    gatherer: G,
    work: W,
    command: CommandSpec,
    cancellable: bool,
}

impl<K, G, W> Commandlet<K, G, W>
where
    K: PreconditionChecker,
{
    pub fn new(checker: K, gatherer: G, work: W, command: CommandSpec, cancellable: bool) -> Self {
        Self { checker, gatherer, work, command, cancellable }
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Sequence checker, gatherer, executor.
    ///
    /// Skips and user cancellations are ordinary outcomes; only gathering
    /// errors and thrown execution errors propagate.
    pub async fn run<P, N, T, Ch, Pr, S, C>(
        &self,
        executor: &CommandletExecutor<N, T, Ch, Pr, S, C>,
    ) -> Result<CommandletOutcome, CommandletError>
    where
        P: Send + Sync,
        G: ParametersGatherer<P>,
        W: UnitOfWork<P>,
        N: NotifyAdapter,
        T: TelemetryAdapter,
        Ch: ChannelAdapter,
        Pr: ProgressAdapter,
        S: SettingsAdapter,
        C: Clock,
    {
        if !self.checker.check().await {
            tracing::info!(command = self.command.log_name(), "preconditions not met");
            return Ok(CommandletOutcome::Skipped);
        }

        match self.gatherer.gather().await? {
            GatherOutcome::Cancel => Ok(CommandletOutcome::Canceled),
            GatherOutcome::Continue(params) => {
                let success =
                    executor.execute(&self.command, self.cancellable, params, &self.work).await?;
                Ok(CommandletOutcome::Completed { success })
            }
        }
    }
}

/// Checker for commands with no environment preconditions
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReady;

#[async_trait]
impl PreconditionChecker for AlwaysReady {
    async fn check(&self) -> bool {
        true
    }
}

/// Gatherer with a pre-decided outcome, for programmatic invocation where
/// the parameters came from somewhere other than a prompt.
#[derive(Debug, Clone)]
pub struct FixedParams<P>(pub GatherOutcome<P>);

#[async_trait]
impl<P> ParametersGatherer<P> for FixedParams<P>
where
    P: Clone + Send + Sync,
{
    async fn gather(&self) -> Result<GatherOutcome<P>, GatherError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
#[path = "commandlet_tests.rs"]
mod tests;
