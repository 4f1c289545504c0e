// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellation specs
//!
//! User cancellation is advisory: the run is marked, the user is warned
//! once, and completion notifications are suppressed, while the spawn layer
//! kills the child so the work still comes back promptly.

use crate::prelude::*;

#[cfg(unix)]
#[tokio::test]
async fn user_cancel_kills_the_process_and_suppresses_reporting() {
    let p = Pipeline::new();

    let command = any_command();
    let work = ShellWork::new("sleep 30");
    let run = p.executor.execute(&command, true, (), &work);
    let fire = async {
        while p.progress.begun().is_empty() {
            tokio::task::yield_now().await;
        }
        p.progress.cancel_current();
    };
    let (result, ()) = tokio::join!(run, fire);

    // SIGKILL death is a nonzero exit, so the work resolves unsuccessful,
    // but the cancel suppresses both completion notifications.
    assert!(!result.unwrap());
    assert!(p.notify.successes().is_empty());
    assert!(p.notify.failures().is_empty());
    assert_eq!(p.notify.canceled(), vec!["Org Display was canceled"]);

    match &p.telemetry.events()[0] {
        TelemetryEvent::Command { properties, .. } => {
            assert_eq!(properties, &vec![("outcome".to_string(), "canceled".to_string())]);
        }
        other => panic!("expected a command event, got {other:?}"),
    }
}

#[tokio::test]
async fn cancellable_run_left_alone_completes_normally() {
    let p = Pipeline::new();

    let success =
        p.executor.execute(&any_command(), true, (), &ShellWork::new("exit 0")).await.unwrap();

    assert!(success);
    assert_eq!(p.notify.successes(), vec!["Org Display successfully ran"]);
    assert!(p.notify.canceled().is_empty());

    let begun = p.progress.begun();
    assert_eq!(begun.len(), 1);
    assert_eq!(begun[0].title, "Running Org Display");
    assert!(begun[0].cancellable);
    assert_eq!(p.progress.finished_count(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn canceled_org_display_skips_classification() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_cli(dir.path(), "sleep 30");
    let p = Pipeline::new();
    let work = p.org_display_work(&program);

    let params = OrgDisplayParams::default();
    let command = build_org_display_command(&program, &params);
    let run = p.executor.execute(&command, true, params, &work);
    let fire = async {
        while p.progress.begun().is_empty() {
            tokio::task::yield_now().await;
        }
        p.progress.cancel_current();
    };
    let (result, ()) = tokio::join!(run, fire);

    assert!(!result.unwrap());
    // The process-backed work shares the executor's surface.
    assert_eq!(p.progress.begun().len(), 1);
    // No classification of a killed run: no parse warning, no exception.
    assert!(p.notify.warnings().is_empty());
    assert!(p.telemetry.exceptions().is_empty());
    assert_eq!(p.notify.canceled(), vec!["Org Display was canceled"]);
}
