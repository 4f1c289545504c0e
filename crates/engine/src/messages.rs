// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display strings keyed by stable message identifiers.
//!
//! The identifiers and their substitution arguments are the contract; the
//! wording is not. Keeping the lookup in one place means a localization
//! layer can replace this table without touching call sites.

/// Stable identifiers for user-facing strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// arg 0: display name. Fixed message for the thrown-error path.
    CommandFailedToRun,
    /// arg 0: display name. Generic logical-failure notification.
    FailureText,
    /// arg 0: display name. Title of the progress surface.
    ProgressText,
    /// arg 0: display name. Cancellation warning.
    RunCanceled,
    /// arg 0: display name. Success notification.
    SuccessText,
    /// arg 0: full command line. Output could not be classified.
    UnexpectedOutput,
}

/// Resolve a message key with positional substitution arguments. Missing
/// arguments render as empty rather than failing the notification.
pub fn localize(key: MessageKey, args: &[&str]) -> String {
    let arg = |i: usize| args.get(i).copied().unwrap_or("");
    match key {
        MessageKey::CommandFailedToRun => format!("{} failed to run", arg(0)),
        MessageKey::FailureText => format!("{} failed", arg(0)),
        MessageKey::ProgressText => format!("Running {}", arg(0)),
        MessageKey::RunCanceled => format!("{} was canceled", arg(0)),
        MessageKey::SuccessText => format!("{} successfully ran", arg(0)),
        MessageKey::UnexpectedOutput => format!("Unexpected output from {}", arg(0)),
    }
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
