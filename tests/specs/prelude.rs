// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for the spec suite

pub use async_trait::async_trait;
pub use fxb_adapters::{
    spawn, ChannelAdapter, ChannelCall, FakeChannelAdapter, FakeNotifyAdapter, FakeProgressAdapter,
    FakeTelemetryAdapter, FileChannelAdapter, NotifyAdapter, TelemetryEvent,
};
pub use fxb_core::{CommandBuilder, CommandSpec, FakeClock, GatherOutcome};
pub use fxb_engine::{
    build_org_display_command, AlwaysReady, Commandlet, CommandletExecutor, CommandletOutcome,
    FakeSettingsAdapter, FixedParams, OrgDisplayParams, OrgDisplayWork, RunHandle, UnitOfWork,
    WorkError,
};

use std::path::Path;

/// The executor wired to the full set of fakes.
pub type FakeExecutor = CommandletExecutor<
    FakeNotifyAdapter,
    FakeTelemetryAdapter,
    FakeChannelAdapter,
    FakeProgressAdapter,
    FakeSettingsAdapter,
    FakeClock,
>;

/// One fully-faked pipeline: every collaborator is recorded so specs can
/// assert on exact side effects.
pub struct Pipeline {
    pub notify: FakeNotifyAdapter,
    pub telemetry: FakeTelemetryAdapter,
    pub channel: FakeChannelAdapter,
    pub progress: FakeProgressAdapter,
    pub settings: FakeSettingsAdapter,
    pub clock: FakeClock,
    pub executor: FakeExecutor,
}

impl Pipeline {
    pub fn new() -> Self {
        let notify = FakeNotifyAdapter::new();
        let telemetry = FakeTelemetryAdapter::new();
        let channel = FakeChannelAdapter::new();
        let progress = FakeProgressAdapter::new();
        let settings = FakeSettingsAdapter::new();
        let clock = FakeClock::new();
        let executor = CommandletExecutor::new(
            notify.clone(),
            telemetry.clone(),
            channel.clone(),
            progress.clone(),
            settings.clone(),
            clock.clone(),
        );
        Pipeline { notify, telemetry, channel, progress, settings, clock, executor }
    }

    /// An org-display unit of work wired to this pipeline's fakes,
    /// pointed at `program` instead of the real vendor CLI.
    pub fn org_display_work(
        &self,
        program: &str,
    ) -> OrgDisplayWork<FakeNotifyAdapter, FakeTelemetryAdapter, FakeChannelAdapter, FakeProgressAdapter>
    {
        OrgDisplayWork::new(
            self.notify.clone(),
            self.telemetry.clone(),
            self.channel.clone(),
            self.progress.clone(),
        )
        .with_program(program)
    }
}

/// Write an executable stand-in for the vendor CLI into `dir` and return
/// its path as a program string.
#[cfg(unix)]
pub fn fake_cli(dir: &Path, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("fx");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

/// Unit of work that runs a shell script through the subprocess adapter and
/// maps exit zero to logical success.
pub struct ShellWork {
    script: String,
}

impl ShellWork {
    pub fn new(script: impl Into<String>) -> Self {
        Self { script: script.into() }
    }
}

#[async_trait]
impl UnitOfWork<()> for ShellWork {
    async fn run(&self, _params: &(), run: &RunHandle) -> Result<bool, WorkError> {
        let command = CommandBuilder::new("sh")
            .display_name("Shell")
            .arg("-c")
            .arg(&self.script)
            .build();
        let mut execution = spawn(&command, run.cancel_token())?;
        Ok(execution.wait().await == 0)
    }
}

/// Unit of work with no body at all; for specs about the lifecycle around it.
pub struct NoopWork;

#[async_trait]
impl UnitOfWork<()> for NoopWork {
    async fn run(&self, _params: &(), _run: &RunHandle) -> Result<bool, WorkError> {
        Ok(true)
    }
}

/// A plain command spec for lifecycle specs that never spawn anything.
pub fn any_command() -> CommandSpec {
    CommandBuilder::new("fx").display_name("Org Display").build()
}
