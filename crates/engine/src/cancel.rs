// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation shared between the progress surface and the run

use tokio_util::sync::CancellationToken;

/// A single cancel request, observed by zero or more listeners.
///
/// The flag is monotonic (false to true, never back) and the event fires at
/// most once per listener. Cancellation is advisory: setting it never
/// preempts an in-flight unit of work, it only changes what happens when the
/// work completes. Clones share the same request; lifetime is the longest
/// holder.
#[derive(Clone, Debug, Default)]
pub struct CancelController {
    token: CancellationToken,
}

impl CancelController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves when cancellation is requested; immediately if it already was.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// A child token for the spawn layer: fires when this controller is
    /// cancelled, without letting the spawn layer cancel the controller.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
