// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace settings consumed by the executor

use std::path::PathBuf;
use std::sync::Arc;

/// Read access to the executor's configuration.
///
/// The engine reads every option fresh on each invocation and never caches,
/// so a settings edit applies to the very next run.
pub trait SettingsAdapter: Clone + Send + Sync + 'static {
    /// Clear the output channel before each run.
    fn clear_output_on_run(&self) -> bool;
}

/// Settings backed by a TOML file, re-read on every call.
///
/// ```toml
/// [commandlet]
/// clear_output_on_run = true
/// ```
///
/// A missing file, unreadable file, or absent key all default to `false`.
#[derive(Clone, Debug)]
pub struct TomlSettingsAdapter {
    path: Arc<PathBuf>,
}

impl TomlSettingsAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Arc::new(path.into()) }
    }

    fn read(&self) -> Option<toml::Value> {
        let text = std::fs::read_to_string(self.path.as_ref()).ok()?;
        match text.parse::<toml::Value>() {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "settings parse failed");
                None
            }
        }
    }
}

impl SettingsAdapter for TomlSettingsAdapter {
    fn clear_output_on_run(&self) -> bool {
        self.read()
            .as_ref()
            .and_then(|doc| doc.get("commandlet"))
            .and_then(|table| table.get("clear_output_on_run"))
            .and_then(toml::Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::SettingsAdapter;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fake settings for testing; counts reads so tests can assert the
    /// engine reads fresh on every invocation.
    #[derive(Clone, Default)]
    pub struct FakeSettingsAdapter {
        clear_output_on_run: Arc<AtomicBool>,
        reads: Arc<AtomicUsize>,
    }

    impl FakeSettingsAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_clear_output_on_run(&self, value: bool) {
            self.clear_output_on_run.store(value, Ordering::SeqCst);
        }

        /// How many times the option has been read
        pub fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl SettingsAdapter for FakeSettingsAdapter {
        fn clear_output_on_run(&self) -> bool {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.clear_output_on_run.load(Ordering::SeqCst)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSettingsAdapter;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
