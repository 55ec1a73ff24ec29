// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use predicates::prelude::*;

use crate::prelude::Project;

#[test]
fn help_shows_usage() {
    Project::empty().flux().arg("--help").assert().success().stdout(predicate::str::contains("Usage:"));
}

#[test]
fn version_shows_version() {
    Project::empty().flux().arg("--version").assert().success().stdout(predicate::str::contains("flux"));
}

#[test]
fn ignores_lists_the_built_in_exclude_patterns() {
    Project::empty()
        .flux()
        .arg("--ignores")
        .assert()
        .success()
        .stdout(predicate::str::contains(".git"))
        .stdout(predicate::str::contains("node_modules"));
}
