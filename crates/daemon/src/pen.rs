// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A pen groups every daemon declared in one config block; restarting or
//! stopping the pen fans out to each of them.

use std::path::PathBuf;

use flux_core::DaemonSpec;
use flux_shell::ShellKind;

use crate::supervisor::DaemonHandle;

pub struct DaemonPen {
    handles: Vec<DaemonHandle>,
}

impl DaemonPen {
    pub fn spawn(label_prefix: &str, daemons: &[DaemonSpec], shell: ShellKind, cwd: Option<PathBuf>) -> Self {
        let handles = daemons
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let label = format!("{label_prefix}#{i}");
                DaemonHandle::spawn(label, spec.clone(), shell, cwd.clone())
            })
            .collect();
        Self { handles }
    }

    /// Start every daemon in the pen that isn't running yet, and signal the
    /// ones that are.
    pub fn restart(&self) {
        for handle in &self.handles {
            handle.restart();
        }
    }

    pub async fn stop(self) {
        for handle in self.handles {
            handle.stop().await;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
#[path = "pen_tests.rs"]
mod tests;
