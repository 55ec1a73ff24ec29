// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use predicates::prelude::*;

use crate::prelude::Project;

#[test]
fn prep_only_runs_the_configured_command_once() {
    let project = Project::empty();
    project.file(
        "flux.conf",
        "src/**/*.rs {\n    prep: echo building-the-project\n}\n",
    );
    project.flux().arg("--prep").assert().success().stdout(predicate::str::contains("building-the-project"));
}

#[test]
fn a_failing_prep_fails_the_whole_invocation() {
    let project = Project::empty();
    project.file("flux.conf", "src/**/*.rs {\n    prep: exit 3\n}\n");
    project.flux().arg("--prep").assert().failure();
}
