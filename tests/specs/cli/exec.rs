// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use predicates::prelude::*;

use crate::prelude::Project;

#[test]
fn exec_runs_the_given_command_once_without_a_config_file() {
    Project::empty()
        .flux()
        .arg("--exec")
        .arg("echo hello-from-exec")
        .arg("--prep")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-from-exec"));
}

#[test]
fn exec_surfaces_a_failing_command() {
    Project::empty()
        .flux()
        .arg("--exec")
        .arg("exit 1")
        .arg("--prep")
        .assert()
        .failure();
}
