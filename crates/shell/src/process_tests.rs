// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::Process;
use crate::kind::ShellKind;
use flux_core::Signal;

#[tokio::test]
async fn exit_code_is_reported_for_successful_command() {
    let mut proc = Process::spawn("test", "exit 0", ShellKind::Sh, None).await.unwrap();
    let status = proc.wait().await.unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn exit_code_is_reported_for_failing_command() {
    let mut proc = Process::spawn("test", "exit 7", ShellKind::Sh, None).await.unwrap();
    let status = proc.wait().await.unwrap();
    assert_eq!(status.code(), Some(7));
}

#[tokio::test]
async fn empty_command_is_rejected() {
    let err = Process::spawn("test", "   ", ShellKind::Sh, None).await.unwrap_err();
    assert!(matches!(err, crate::error::ExecError::EmptyCommand));
}

#[tokio::test]
async fn exec_mode_splits_argv_without_a_shell() {
    let mut proc = Process::spawn("test", "true", ShellKind::Exec, None).await.unwrap();
    let status = proc.wait().await.unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn cwd_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker"), b"hi").unwrap();
    let mut proc =
        Process::spawn("test", "test -f marker", ShellKind::Sh, Some(dir.path())).await.unwrap();
    let status = proc.wait().await.unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn spawn_captured_buffers_stderr_lines() {
    let mut proc = Process::spawn_captured("test", "echo one 1>&2; echo two 1>&2; exit 1", ShellKind::Sh, None)
        .await
        .unwrap();
    proc.wait().await.unwrap();
    assert_eq!(proc.captured_stderr(), vec!["one".to_string(), "two".to_string()]);
}

#[tokio::test]
async fn plain_spawn_does_not_capture_stderr() {
    let mut proc = Process::spawn("test", "echo oops 1>&2; exit 1", ShellKind::Sh, None).await.unwrap();
    proc.wait().await.unwrap();
    assert!(proc.captured_stderr().is_empty());
}

#[tokio::test]
async fn sigterm_stops_a_sleeping_process() {
    let proc = Process::spawn("test", "trap 'exit 0' TERM; sleep 30", ShellKind::Sh, None)
        .await
        .unwrap();
    proc.stop(Signal::Term, Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn stop_force_kills_a_process_ignoring_the_signal() {
    let proc =
        Process::spawn("test", "trap '' TERM; sleep 30", ShellKind::Sh, None).await.unwrap();
    proc.stop(Signal::Term, Duration::from_millis(200)).await.unwrap();
}
