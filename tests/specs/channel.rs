// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel sink specs
//!
//! The file-backed sink and the TOML settings adapter against real files.

use crate::prelude::*;
use fxb_engine::TomlSettingsAdapter;

fn read(channel: &FileChannelAdapter) -> String {
    std::fs::read_to_string(channel.path()).unwrap()
}

#[test]
fn file_channel_appends_lines_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let channel = FileChannelAdapter::new(dir.path()).unwrap();

    channel.append_line("$ fx org display --json");
    channel.append_line("Connected as dev@example.com");

    assert_eq!(read(&channel), "$ fx org display --json\nConnected as dev@example.com\n");
}

#[test]
fn clear_truncates_and_further_appends_work() {
    let dir = tempfile::tempdir().unwrap();
    let channel = FileChannelAdapter::new(dir.path()).unwrap();

    channel.append_line("old run");
    channel.clear();
    assert_eq!(read(&channel), "");

    channel.append_line("new run");
    assert_eq!(read(&channel), "new run\n");
}

#[test]
fn each_adapter_gets_its_own_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = FileChannelAdapter::new(dir.path()).unwrap();
    let second = FileChannelAdapter::new(dir.path()).unwrap();

    assert_ne!(first.path(), second.path());
}

#[tokio::test]
async fn clear_on_run_follows_the_settings_file_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.toml");
    std::fs::write(&settings_path, "[commandlet]\nclear_output_on_run = true\n").unwrap();

    let channel = FileChannelAdapter::new(dir.path()).unwrap();
    let executor = CommandletExecutor::new(
        FakeNotifyAdapter::new(),
        FakeTelemetryAdapter::new(),
        channel.clone(),
        FakeProgressAdapter::new(),
        TomlSettingsAdapter::new(&settings_path),
        FakeClock::new(),
    );

    channel.append_line("stale");
    executor.execute(&any_command(), false, (), &NoopWork).await.unwrap();
    assert!(!read(&channel).contains("stale"));

    // Edit applies to the very next run, no restart required.
    std::fs::write(&settings_path, "[commandlet]\nclear_output_on_run = false\n").unwrap();
    channel.append_line("kept");
    executor.execute(&any_command(), false, (), &NoopWork).await.unwrap();
    assert!(read(&channel).contains("kept"));
}

#[tokio::test]
async fn missing_settings_file_defaults_to_keeping_output() {
    let dir = tempfile::tempdir().unwrap();
    let channel = FileChannelAdapter::new(dir.path()).unwrap();
    let executor = CommandletExecutor::new(
        FakeNotifyAdapter::new(),
        FakeTelemetryAdapter::new(),
        channel.clone(),
        FakeProgressAdapter::new(),
        TomlSettingsAdapter::new(dir.path().join("nope.toml")),
        FakeClock::new(),
    );

    channel.append_line("kept");
    executor.execute(&any_command(), false, (), &NoopWork).await.unwrap();
    assert!(read(&channel).contains("kept"));
}
