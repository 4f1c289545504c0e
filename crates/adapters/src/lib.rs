// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fxb-adapters: collaborator handles consumed by the fxbridge engine.
//!
//! Each adapter is a trait with a production implementation and a `Fake*`
//! recording double. The engine never reaches for a global service locator;
//! every collaborator is passed in explicitly so tests can substitute fakes
//! without monkey-patching.

pub mod channel;
pub mod notify;
pub mod progress;
pub mod subprocess;
pub mod telemetry;

pub use channel::{ChannelAdapter, FileChannelAdapter};
pub use notify::{DesktopNotifyAdapter, NotifyAction, NotifyAdapter, NotifyError};
pub use progress::{ProgressAdapter, ProgressHandle, SpinnerProgressAdapter};
pub use subprocess::{spawn, Execution, ExitSignal, OutputChunk, SpawnError};
pub use telemetry::{TelemetryAdapter, TelemetryError, TelemetryProps, TracingTelemetryAdapter};

#[cfg(any(test, feature = "test-support"))]
pub use channel::{ChannelCall, FakeChannelAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use progress::{FakeProgressAdapter, ProgressBegin};
#[cfg(any(test, feature = "test-support"))]
pub use telemetry::{FakeTelemetryAdapter, TelemetryEvent};
