// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs a block's `prep:` commands to completion, in declaration order,
//! stopping at the first failure. A prep marked `+onchange` is skipped on
//! the synthetic initial invocation (`initial = true`, no change-set yet).

use std::path::Path;
use std::time::Instant;

use thiserror::Error;

use flux_adapters::{Logger, Notifier, Stream};
use flux_core::{Block, Mod, VariableMap};
use flux_shell::{ExecError, ShellKind};

use crate::render::{RenderError, VarCmd};

#[derive(Debug, Error)]
pub enum PrepError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("{command}: {message}")]
    Failed { command: String, message: String },
}

/// Run every prep in `block` in sequence. Returns the first failure; prior
/// preps in the block have already completed by then.
pub async fn run_preps(
    block: &Block,
    vars: &VariableMap,
    modset: Option<&Mod>,
    root: &Path,
    shell: ShellKind,
    initial: bool,
    log: &Logger,
    notifier: &dyn Notifier,
) -> Result<(), PrepError> {
    let vcmd = VarCmd { block, modset, vars, root };
    for prep in &block.preps {
        let command = vcmd.render(&prep.command)?;
        if initial && prep.onchange {
            log.say(&format!("skipping prep: {command}"));
            continue;
        }
        let stream = log.stream(format!("prep: {command}"));
        let cwd = block.in_dir.as_deref();
        if let Err(err) = run_proc(&command, shell, cwd, &stream).await {
            let _ = notifier.notify("flux error", &err.to_string()).await;
            return Err(err);
        }
    }
    Ok(())
}

async fn run_proc(
    command: &str,
    shell: ShellKind,
    cwd: Option<&Path>,
    stream: &Stream,
) -> Result<(), PrepError> {
    let start = Instant::now();
    let mut proc = flux_shell::Process::spawn_captured(stream.header(), command, shell, cwd).await?;
    let status = proc.wait().await?;
    if status.success() {
        stream.notice(&format!(">> done ({:.2?})", start.elapsed()));
        Ok(())
    } else {
        let stderr = proc.captured_stderr();
        let message = if stderr.is_empty() {
            format!("exited with {}", describe_exit(&status))
        } else {
            format!("exited with {}: {}", describe_exit(&status), stderr.join("\n"))
        };
        stream.shout(&format!("exited with {}", describe_exit(&status)));
        Err(PrepError::Failed { command: command.to_string(), message })
    }
}

fn describe_exit(status: &std::process::ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

#[cfg(test)]
#[path = "prep_tests.rs"]
mod tests;
