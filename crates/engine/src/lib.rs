// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fxb-engine: the commandlet execution state machine.
//!
//! A commandlet is the full user-facing pipeline for one wrapped CLI command:
//! precondition check, parameter gathering, then execution with progress,
//! cancellation, notification, and telemetry side effects coordinated so
//! that every run reports its outcome exactly once no matter how it ends.

pub mod cancel;
pub mod commandlet;
pub mod executor;
pub mod messages;
pub mod org_display;
pub mod progress;
pub mod settings;

pub use cancel::CancelController;
pub use commandlet::{
    AlwaysReady, Commandlet, CommandletError, CommandletOutcome, FixedParams, GatherError,
    ParametersGatherer, PreconditionChecker,
};
pub use executor::{CommandletExecutor, ExecuteError, RunHandle, UnitOfWork, WorkError};
pub use messages::{localize, MessageKey};
pub use org_display::{build_org_display_command, OrgDisplayParams, OrgDisplayWork};
pub use progress::ProgressNotification;
pub use settings::{SettingsAdapter, TomlSettingsAdapter};

#[cfg(any(test, feature = "test-support"))]
pub use settings::FakeSettingsAdapter;
