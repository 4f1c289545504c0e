// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of a user-input gathering step

use serde::{Deserialize, Serialize};

/// Result of a parameter-gathering step: either the user supplied what the
/// command needs, or they backed out. Created once per gather call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatherOutcome<T> {
    Continue(T),
    Cancel,
}

impl<T> GatherOutcome<T> {
    pub fn is_cancel(&self) -> bool {
        matches!(self, GatherOutcome::Cancel)
    }

    /// The continuation payload, if the user did not cancel.
    pub fn into_continue(self) -> Option<T> {
        match self {
            GatherOutcome::Continue(data) => Some(data),
            GatherOutcome::Cancel => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GatherOutcome<U> {
        match self {
            GatherOutcome::Continue(data) => GatherOutcome::Continue(f(data)),
            GatherOutcome::Cancel => GatherOutcome::Cancel,
        }
    }
}

#[cfg(test)]
#[path = "gather_tests.rs"]
mod tests;
