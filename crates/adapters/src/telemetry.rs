// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Telemetry sink: command duration and exception events

use async_trait::async_trait;
use indexmap::IndexMap;
use std::time::Duration;
use thiserror::Error;

/// Errors from the telemetry sink. Delivery failures never affect the run's
/// outcome; the engine logs and discards them.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Extra event properties, insertion-ordered for stable output.
pub type TelemetryProps = IndexMap<String, String>;

/// Adapter for recording command metrics.
///
/// The engine guarantees exactly one event per run: a command event on the
/// success/failure/cancel paths, an exception event on the thrown path.
#[async_trait]
pub trait TelemetryAdapter: Clone + Send + Sync + 'static {
    async fn send_command_event(
        &self,
        log_name: &str,
        started_epoch_ms: u64,
        duration: Duration,
        properties: TelemetryProps,
    ) -> Result<(), TelemetryError>;

    async fn send_exception(&self, log_name: &str, message: &str) -> Result<(), TelemetryError>;
}

/// Telemetry sink that emits structured `tracing` events under the
/// `telemetry` target. Shipping them out of the process is the subscriber's
/// concern, not ours.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTelemetryAdapter;

impl TracingTelemetryAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TelemetryAdapter for TracingTelemetryAdapter {
    async fn send_command_event(
        &self,
        log_name: &str,
        started_epoch_ms: u64,
        duration: Duration,
        properties: TelemetryProps,
    ) -> Result<(), TelemetryError> {
        let elapsed_ms = duration.as_millis() as u64;
        let props = serde_props(&properties);
        tracing::info!(
            target: "telemetry",
            command = log_name,
            started_epoch_ms,
            elapsed_ms,
            %props,
            "command event"
        );
        Ok(())
    }

    async fn send_exception(&self, log_name: &str, message: &str) -> Result<(), TelemetryError> {
        tracing::error!(target: "telemetry", command = log_name, %message, "exception event");
        Ok(())
    }
}

fn serde_props(properties: &TelemetryProps) -> String {
    let mut out = String::new();
    for (key, val) in properties {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(val);
    }
    out
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{TelemetryAdapter, TelemetryError, TelemetryProps};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded telemetry event
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum TelemetryEvent {
        Command {
            log_name: String,
            started_epoch_ms: u64,
            duration: Duration,
            properties: Vec<(String, String)>,
        },
        Exception {
            log_name: String,
            message: String,
        },
    }

    /// Fake telemetry sink for testing
    #[derive(Clone, Default)]
    pub struct FakeTelemetryAdapter {
        events: Arc<Mutex<Vec<TelemetryEvent>>>,
    }

    impl FakeTelemetryAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<TelemetryEvent> {
            self.events.lock().clone()
        }

        pub fn command_events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .iter()
                .filter(|e| matches!(e, TelemetryEvent::Command { .. }))
                .cloned()
                .collect()
        }

        pub fn exceptions(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .iter()
                .filter(|e| matches!(e, TelemetryEvent::Exception { .. }))
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl TelemetryAdapter for FakeTelemetryAdapter {
        async fn send_command_event(
            &self,
            log_name: &str,
            started_epoch_ms: u64,
            duration: Duration,
            properties: TelemetryProps,
        ) -> Result<(), TelemetryError> {
            self.events.lock().push(TelemetryEvent::Command {
                log_name: log_name.to_string(),
                started_epoch_ms,
                duration,
                properties: properties.into_iter().collect(),
            });
            Ok(())
        }

        async fn send_exception(
            &self,
            log_name: &str,
            message: &str,
        ) -> Result<(), TelemetryError> {
            self.events.lock().push(TelemetryEvent::Exception {
                log_name: log_name.to_string(),
                message: message.to_string(),
            });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTelemetryAdapter, TelemetryEvent};

#[cfg(test)]
#[path = "telemetry_tests.rs"]
mod tests;
