// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use flux_core::{DaemonSpec, Signal};
use flux_shell::ShellKind;

use super::DaemonPen;

#[tokio::test]
async fn restart_fans_out_to_every_daemon_in_the_pen() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    let daemons = vec![
        DaemonSpec {
            command: format!("echo a >> {}; sleep 30", a.display()),
            restart_signal: Signal::Term,
            pipe_restart_signal: false,
        },
        DaemonSpec {
            command: format!("echo b >> {}; sleep 30", b.display()),
            restart_signal: Signal::Term,
            pipe_restart_signal: false,
        },
    ];
    let pen = DaemonPen::spawn("block", &daemons, ShellKind::Sh, None);
    pen.restart();
    tokio::time::sleep(Duration::from_millis(100)).await;
    pen.stop().await;

    assert!(a.exists());
    assert!(b.exists());
}

#[test]
fn an_empty_pen_reports_itself_as_empty() {
    let pen = DaemonPen::spawn("block", &[], ShellKind::Sh, None);
    assert!(pen.is_empty());
}
