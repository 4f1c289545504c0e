// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification adapter: success/failure/warning/cancel surfaces

use async_trait::async_trait;
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// What the user did with a success notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyAction {
    /// Dismissed the prompt without picking anything.
    Dismissed,
    /// Asked to reveal the output channel.
    RevealChannel,
}

/// Adapter for surfacing run outcomes to the user.
///
/// `success` resolves when the user dismisses or interacts with the prompt;
/// the rest are fire-and-forget.
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn success(&self, message: &str) -> Result<NotifyAction, NotifyError>;
    async fn failure(&self, message: &str) -> Result<(), NotifyError>;
    fn warning(&self, message: &str);
    fn canceled(&self, message: &str);
}

/// Desktop notification adapter using notify-rust.
///
/// On macOS, `notify-rust` uses `mac-notification-sys` (Cocoa bindings) to
/// send notifications via the Notification Center. The first notification
/// triggers `ensure_application_set()` which runs an AppleScript to look up a
/// bundle identifier. In a headless context without Automation permissions,
/// that AppleScript blocks forever. We pre-set the bundle identifier at
/// construction time to bypass the lookup entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }

    fn dispatch(severity: &'static str, message: &str) {
        let message = message.to_string();
        // notify_rust::Notification::show() is synchronous on macOS.
        // Fire-and-forget on tokio's bounded blocking thread pool to avoid
        // blocking the async runtime while capping OS thread count.
        tokio::task::spawn_blocking(move || {
            match notify_rust::Notification::new().summary(severity).body(&message).show() {
                Ok(_) => {
                    tracing::info!(severity, %message, "desktop notification sent");
                }
                Err(e) => {
                    tracing::warn!(severity, error = %e, "desktop notification failed");
                }
            }
        });
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn success(&self, message: &str) -> Result<NotifyAction, NotifyError> {
        // Desktop notifications have no reliable action callback across
        // platforms; the success prompt resolves as dismissed.
        Self::dispatch("Success", message);
        Ok(NotifyAction::Dismissed)
    }

    async fn failure(&self, message: &str) -> Result<(), NotifyError> {
        Self::dispatch("Failed", message);
        Ok(())
    }

    fn warning(&self, message: &str) {
        Self::dispatch("Warning", message);
    }

    fn canceled(&self, message: &str) {
        Self::dispatch("Canceled", message);
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{NotifyAction, NotifyAdapter, NotifyError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded notification
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum NotifyCall {
        Success(String),
        Failure(String),
        Warning(String),
        Canceled(String),
    }

    struct FakeNotifyState {
        calls: Vec<NotifyCall>,
        success_action: NotifyAction,
    }

    /// Fake notification adapter for testing
    #[derive(Clone)]
    pub struct FakeNotifyAdapter {
        inner: Arc<Mutex<FakeNotifyState>>,
    }

    impl Default for FakeNotifyAdapter {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeNotifyState {
                    calls: Vec::new(),
                    success_action: NotifyAction::Dismissed,
                })),
            }
        }
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Script what the user picks on the next success prompt.
        pub fn set_success_action(&self, action: NotifyAction) {
            self.inner.lock().success_action = action;
        }

        /// Get all recorded notifications
        pub fn calls(&self) -> Vec<NotifyCall> {
            self.inner.lock().calls.clone()
        }

        pub fn successes(&self) -> Vec<String> {
            self.of(|c| match c {
                NotifyCall::Success(m) => Some(m),
                _ => None,
            })
        }

        pub fn failures(&self) -> Vec<String> {
            self.of(|c| match c {
                NotifyCall::Failure(m) => Some(m),
                _ => None,
            })
        }

        pub fn warnings(&self) -> Vec<String> {
            self.of(|c| match c {
                NotifyCall::Warning(m) => Some(m),
                _ => None,
            })
        }

        pub fn canceled(&self) -> Vec<String> {
            self.of(|c| match c {
                NotifyCall::Canceled(m) => Some(m),
                _ => None,
            })
        }

        fn of(&self, pick: impl Fn(NotifyCall) -> Option<String>) -> Vec<String> {
            self.inner.lock().calls.iter().cloned().filter_map(pick).collect()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn success(&self, message: &str) -> Result<NotifyAction, NotifyError> {
            let mut state = self.inner.lock();
            state.calls.push(NotifyCall::Success(message.to_string()));
            Ok(state.success_action)
        }

        async fn failure(&self, message: &str) -> Result<(), NotifyError> {
            self.inner.lock().calls.push(NotifyCall::Failure(message.to_string()));
            Ok(())
        }

        fn warning(&self, message: &str) {
            self.inner.lock().calls.push(NotifyCall::Warning(message.to_string()));
        }

        fn canceled(&self, message: &str) {
            self.inner.lock().calls.push(NotifyCall::Canceled(message.to_string()));
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
