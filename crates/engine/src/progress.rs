// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binding between a running execution and a cancellable progress surface

use crate::cancel::CancelController;
use crate::messages::{localize, MessageKey};
use fxb_adapters::subprocess::ExitSignal;
use fxb_adapters::{NotifyAdapter, ProgressAdapter};

/// Shows an indeterminate, cancellable progress surface for a spawned
/// process and keeps it up until the process exits.
///
/// Process-backed works bind this only when their run carries no
/// executor-bound surface; a cancellable `execute` owns the run's single
/// surface itself.
pub struct ProgressNotification;

impl ProgressNotification {
    /// Bind the surface to `exit`.
    ///
    /// If the user cancels through the surface, the shared `controller` is
    /// cancelled and one cancellation notification is issued with the
    /// command's display name. The future resolves only when the exit signal
    /// fires, never early on cancel; whether cancellation also terminates
    /// the process is the spawn layer's business.
    pub async fn show<Pr, N>(
        display_name: &str,
        exit: ExitSignal,
        controller: &CancelController,
        progress: &Pr,
        notifier: &N,
    ) -> i32
    where
        Pr: ProgressAdapter,
        N: NotifyAdapter,
    {
        let surface = progress.begin(&localize(MessageKey::ProgressText, &[display_name]), true);
        let user_cancel = surface.user_cancel();

        let exit_fut = exit.wait();
        tokio::pin!(exit_fut);
        let mut warned = false;
        let code = loop {
            tokio::select! {
                code = &mut exit_fut => break code,
                _ = user_cancel.cancelled(), if !warned => {
                    warned = true;
                    controller.cancel();
                    notifier.canceled(&localize(MessageKey::RunCanceled, &[display_name]));
                }
            }
        };
        surface.finish();
        code
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
