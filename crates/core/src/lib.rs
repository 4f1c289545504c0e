// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fxb-core: data model for the fxbridge command pipeline

pub mod cli_output;
pub mod clock;
pub mod command;
pub mod gather;

pub use cli_output::{classify, ClassifyError, CliOutcome};
pub use clock::{Clock, SystemClock};
pub use command::{CommandBuilder, CommandSpec};
pub use gather::GatherOutcome;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
