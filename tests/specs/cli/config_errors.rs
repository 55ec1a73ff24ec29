// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use predicates::prelude::*;

use crate::prelude::Project;

#[test]
fn missing_config_file_is_a_clean_failure() {
    Project::empty()
        .flux()
        .arg("--prep")
        .assert()
        .failure()
        .stderr(predicate::str::contains("flux.conf"));
}

#[test]
fn malformed_config_is_a_clean_failure() {
    let project = Project::empty();
    project.file("flux.conf", "{ unknown directive }\n");
    project.flux().arg("--prep").assert().failure();
}
