// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full-pipeline specs for the org-display commandlet
//!
//! Precondition check, parameter gathering, execution, and classification
//! against a scripted stand-in for the vendor CLI.

use crate::prelude::*;

fn org_display_commandlet(
    p: &Pipeline,
    program: &str,
    params: OrgDisplayParams,
) -> Commandlet<
    AlwaysReady,
    FixedParams<OrgDisplayParams>,
    OrgDisplayWork<FakeNotifyAdapter, FakeTelemetryAdapter, FakeChannelAdapter, FakeProgressAdapter>,
> {
    let command = build_org_display_command(program, &params);
    Commandlet::new(
        AlwaysReady,
        FixedParams(GatherOutcome::Continue(params)),
        p.org_display_work(program),
        command,
        false,
    )
}

#[cfg(unix)]
#[tokio::test]
async fn org_display_happy_path() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_cli(
        dir.path(),
        r#"echo '{"status": 0, "result": {"username": "dev@example.com", "id": "00D"}}'"#,
    );
    let p = Pipeline::new();

    let commandlet = org_display_commandlet(&p, &program, OrgDisplayParams::default());
    let outcome = commandlet.run(&p.executor).await.unwrap();

    assert_eq!(outcome, CommandletOutcome::Completed { success: true });
    assert_eq!(p.notify.successes(), vec!["Org Display successfully ran"]);

    let lines = p.channel.lines();
    assert!(lines[0].ends_with("org display --json"));
    assert!(lines.contains(&"Connected as dev@example.com".to_string()));

    assert_eq!(p.telemetry.events().len(), 1);
    assert_eq!(p.telemetry.command_events().len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn org_display_passes_the_target_org_through() {
    let dir = tempfile::tempdir().unwrap();
    // Echo the arguments back so the spec can see what the CLI received.
    let program = fake_cli(
        dir.path(),
        r#"echo "{\"status\": 0, \"result\": {\"args\": \"$*\"}}""#,
    );
    let p = Pipeline::new();

    let params = OrgDisplayParams { target_org: Some("dev-sandbox".to_string()) };
    let commandlet = org_display_commandlet(&p, &program, params);
    let outcome = commandlet.run(&p.executor).await.unwrap();

    assert_eq!(outcome, CommandletOutcome::Completed { success: true });
    let echoed = p.channel.lines().into_iter().find(|l| l.contains("dev-sandbox"));
    assert!(echoed.unwrap().contains("org display --json --target-org dev-sandbox"));
}

#[cfg(unix)]
#[tokio::test]
async fn org_display_vendor_error_is_reported_not_thrown() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_cli(
        dir.path(),
        r#"echo '{"status": 1, "name": "NoOrgFound", "message": "No default org is set"}'
exit 1"#,
    );
    let p = Pipeline::new();

    let commandlet = org_display_commandlet(&p, &program, OrgDisplayParams::default());
    let outcome = commandlet.run(&p.executor).await.unwrap();

    assert_eq!(outcome, CommandletOutcome::Completed { success: false });
    assert_eq!(p.notify.failures(), vec!["Org Display failed"]);
    assert!(p.channel.lines().contains(&"No default org is set".to_string()));
    assert!(p.telemetry.exceptions().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn org_display_unparseable_output_warns_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let program = fake_cli(dir.path(), "echo 'Warning: update available'");
    let p = Pipeline::new();

    let commandlet = org_display_commandlet(&p, &program, OrgDisplayParams::default());
    let outcome = commandlet.run(&p.executor).await.unwrap();

    assert_eq!(outcome, CommandletOutcome::Completed { success: false });
    assert_eq!(p.notify.warnings().len(), 1);
    assert!(p.notify.warnings()[0].starts_with("Unexpected output from"));
    assert_eq!(p.telemetry.exceptions().len(), 1);
}

#[tokio::test]
async fn failed_precondition_skips_the_whole_pipeline() {
    struct NoCli;

    #[async_trait]
    impl fxb_engine::PreconditionChecker for NoCli {
        async fn check(&self) -> bool {
            false
        }
    }

    let p = Pipeline::new();
    let params = OrgDisplayParams::default();
    let command = build_org_display_command("fx", &params);
    let commandlet = Commandlet::new(
        NoCli,
        FixedParams(GatherOutcome::Continue(params)),
        p.org_display_work("fx"),
        command,
        false,
    );

    let outcome = commandlet.run(&p.executor).await.unwrap();

    assert_eq!(outcome, CommandletOutcome::Skipped);
    assert!(p.channel.calls().is_empty());
    assert!(p.telemetry.events().is_empty());
}

#[tokio::test]
async fn gather_cancel_stops_before_execution() {
    let p = Pipeline::new();
    let command = build_org_display_command("fx", &OrgDisplayParams::default());
    let commandlet = Commandlet::new(
        AlwaysReady,
        FixedParams(GatherOutcome::<OrgDisplayParams>::Cancel),
        p.org_display_work("fx"),
        command,
        false,
    );

    let outcome = commandlet.run(&p.executor).await.unwrap();

    assert_eq!(outcome, CommandletOutcome::Canceled);
    assert!(p.telemetry.events().is_empty());
}
