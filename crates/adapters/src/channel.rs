// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel sink: the append-only text output surface shared by all executors

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Append-only text output sink consumed by the engine.
///
/// Sink failures never affect the run's outcome, so the contract is
/// infallible from the caller's side; implementations log their own errors.
/// Appends are atomic per line; no ordering is guaranteed across callers
/// beyond append order.
pub trait ChannelAdapter: Clone + Send + Sync + 'static {
    fn append_line(&self, text: &str);
    fn clear(&self);
    /// Bring the sink to the user's attention (open the log, focus the pane).
    fn reveal(&self);
}

/// Channel sink backed by a log file under a state directory, one file per
/// adapter instance. Lines are mirrored through `tracing` at debug level.
#[derive(Clone)]
pub struct FileChannelAdapter {
    path: Arc<PathBuf>,
    // Held across the open/write pair so concurrent appends stay line-atomic.
    lock: Arc<Mutex<()>>,
}

impl FileChannelAdapter {
    /// Create a sink writing to `<state_dir>/channel-<uuid>.log`.
    pub fn new(state_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(state_dir)?;
        let path = state_dir.join(format!("channel-{}.log", uuid::Uuid::new_v4()));
        File::create(&path)?;
        Ok(Self { path: Arc::new(path), lock: Arc::new(Mutex::new(())) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, text: &str) {
        let _guard = self.lock.lock();
        let result = OpenOptions::new()
            .append(true)
            .open(self.path.as_ref())
            .and_then(|mut file| writeln!(file, "{}", text));
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "channel append failed");
        }
    }
}

impl ChannelAdapter for FileChannelAdapter {
    fn append_line(&self, text: &str) {
        tracing::debug!(channel = %self.path.display(), "{}", text);
        self.write(text);
    }

    fn clear(&self) {
        let _guard = self.lock.lock();
        if let Err(e) = File::create(self.path.as_ref()) {
            tracing::warn!(path = %self.path.display(), error = %e, "channel clear failed");
        }
    }

    fn reveal(&self) {
        // Headless builds have nothing to focus; surface the location instead.
        tracing::info!(path = %self.path.display(), "output channel requested");
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::ChannelAdapter;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded channel operation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ChannelCall {
        Append(String),
        Clear,
        Reveal,
    }

    /// Fake channel sink for testing
    #[derive(Clone, Default)]
    pub struct FakeChannelAdapter {
        calls: Arc<Mutex<Vec<ChannelCall>>>,
    }

    impl FakeChannelAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// All recorded operations, in call order
        pub fn calls(&self) -> Vec<ChannelCall> {
            self.calls.lock().clone()
        }

        /// Appended lines only
        pub fn lines(&self) -> Vec<String> {
            self.calls
                .lock()
                .iter()
                .filter_map(|c| match c {
                    ChannelCall::Append(line) => Some(line.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn clear_count(&self) -> usize {
            self.calls.lock().iter().filter(|c| matches!(c, ChannelCall::Clear)).count()
        }

        pub fn reveal_count(&self) -> usize {
            self.calls.lock().iter().filter(|c| matches!(c, ChannelCall::Reveal)).count()
        }
    }

    impl ChannelAdapter for FakeChannelAdapter {
        fn append_line(&self, text: &str) {
            self.calls.lock().push(ChannelCall::Append(text.to_string()));
        }

        fn clear(&self) {
            self.calls.lock().push(ChannelCall::Clear);
        }

        fn reveal(&self) {
            self.calls.lock().push(ChannelCall::Reveal);
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ChannelCall, FakeChannelAdapter};

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
