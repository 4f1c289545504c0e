// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress surface adapter: indeterminate, optionally user-cancellable

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A live progress surface.
///
/// The handle carries the surface's user-cancel token: it fires if and when
/// the user cancels through the surface, and never otherwise. Dropping the
/// handle without `finish` leaves the surface up, so callers finish it on
/// every exit path.
pub struct ProgressHandle {
    cancel: CancellationToken,
    spinner: Option<indicatif::ProgressBar>,
    finished: Arc<AtomicBool>,
}

impl ProgressHandle {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel, spinner: None, finished: Arc::new(AtomicBool::new(false)) }
    }

    pub fn with_spinner(cancel: CancellationToken, spinner: indicatif::ProgressBar) -> Self {
        Self { cancel, spinner: Some(spinner), finished: Arc::new(AtomicBool::new(false)) }
    }

    /// Token fired by the user cancelling the surface.
    pub fn user_cancel(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub(crate) fn finished_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.finished)
    }

    /// Tear the surface down.
    pub fn finish(self) {
        self.finished.store(true, Ordering::SeqCst);
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Adapter producing progress surfaces scoped to one run.
pub trait ProgressAdapter: Clone + Send + Sync + 'static {
    /// Show an indeterminate surface titled `title`. `cancellable` controls
    /// whether the surface offers a cancel affordance at all.
    fn begin(&self, title: &str, cancellable: bool) -> ProgressHandle;
}

/// Terminal spinner surface via indicatif.
///
/// A spinner has no cancel affordance of its own; editor hosts bind their
/// cancellable progress UI through their own `ProgressAdapter`, so the token
/// on this handle simply never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinnerProgressAdapter;

impl SpinnerProgressAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressAdapter for SpinnerProgressAdapter {
    fn begin(&self, title: &str, _cancellable: bool) -> ProgressHandle {
        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_message(title.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        ProgressHandle::with_spinner(CancellationToken::new(), spinner)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ProgressAdapter, ProgressHandle};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    /// Recorded surface configuration at `begin` time
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ProgressBegin {
        pub title: String,
        pub cancellable: bool,
    }

    #[derive(Default)]
    struct FakeProgressState {
        begun: Vec<ProgressBegin>,
        tokens: Vec<CancellationToken>,
        finished: Vec<Arc<AtomicBool>>,
    }

    /// Fake progress adapter for testing; lets tests fire the user-cancel
    /// token of the most recent surface.
    #[derive(Clone, Default)]
    pub struct FakeProgressAdapter {
        inner: Arc<Mutex<FakeProgressState>>,
    }

    impl FakeProgressAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn begun(&self) -> Vec<ProgressBegin> {
            self.inner.lock().begun.clone()
        }

        /// Simulate the user hitting cancel on the most recent surface.
        pub fn cancel_current(&self) {
            if let Some(token) = self.inner.lock().tokens.last() {
                token.cancel();
            }
        }

        /// How many surfaces have been torn down via `finish`.
        pub fn finished_count(&self) -> usize {
            self.inner.lock().finished.iter().filter(|f| f.load(Ordering::SeqCst)).count()
        }
    }

    impl ProgressAdapter for FakeProgressAdapter {
        fn begin(&self, title: &str, cancellable: bool) -> ProgressHandle {
            let token = CancellationToken::new();
            let handle = ProgressHandle::new(token.clone());
            let mut state = self.inner.lock();
            state.begun.push(ProgressBegin { title: title.to_string(), cancellable });
            state.tokens.push(token);
            state.finished.push(handle.finished_flag());
            handle
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProgressAdapter, ProgressBegin};

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
