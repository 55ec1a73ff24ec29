// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawns a prep or daemon command and streams its output to `tracing`.
//!
//! Every spawned command runs in its own process group so a restart signal
//! (or the final stop) reaches children it may have forked, not just the
//! immediate shell.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};

use flux_core::Signal;

use crate::error::ExecError;
use crate::kind::ShellKind;

/// A spawned command with its output streamed to `tracing` under `label`.
pub struct Process {
    child: Child,
    command: String,
    label: String,
    captured_stderr: Option<Arc<Mutex<Vec<String>>>>,
    stderr_reader: Option<tokio::task::JoinHandle<()>>,
    stdin: Option<ChildStdin>,
}

impl Process {
    /// Spawn `command` through `shell`, with its working directory set to
    /// `cwd` (the process's own cwd if `None`). Output lines are logged
    /// under `label` as they arrive.
    pub async fn spawn(
        label: &str,
        command: &str,
        shell: ShellKind,
        cwd: Option<&Path>,
    ) -> Result<Self, ExecError> {
        Self::spawn_inner(label, command, shell, cwd, false, false).await
    }

    /// Like [`spawn`](Self::spawn), but also buffers stderr lines so they can
    /// be retrieved afterwards with [`captured_stderr`](Self::captured_stderr).
    pub async fn spawn_captured(
        label: &str,
        command: &str,
        shell: ShellKind,
        cwd: Option<&Path>,
    ) -> Result<Self, ExecError> {
        Self::spawn_inner(label, command, shell, cwd, true, false).await
    }

    /// Like [`spawn`](Self::spawn), but leaves stdin piped instead of null so
    /// a restart signal can be written to it with
    /// [`write_stdin_line`](Self::write_stdin_line), for platforms or
    /// processes that accept signals that way instead of via a real POSIX
    /// signal.
    pub async fn spawn_piped(
        label: &str,
        command: &str,
        shell: ShellKind,
        cwd: Option<&Path>,
    ) -> Result<Self, ExecError> {
        Self::spawn_inner(label, command, shell, cwd, false, true).await
    }

    async fn spawn_inner(
        label: &str,
        command: &str,
        shell: ShellKind,
        cwd: Option<&Path>,
        capture_stderr: bool,
        pipe_stdin: bool,
    ) -> Result<Self, ExecError> {
        if command.trim().is_empty() {
            return Err(ExecError::EmptyCommand);
        }

        let mut cmd = match shell {
            ShellKind::Exec => {
                let mut parts = command.split_whitespace();
                let program = parts.next().ok_or(ExecError::EmptyCommand)?;
                let mut cmd = Command::new(program);
                cmd.args(parts);
                cmd
            }
            other => {
                let (program, args) = other.invocation(command);
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
        };

        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let stdin = if pipe_stdin { Stdio::piped() } else { Stdio::null() };
        cmd.stdin(stdin).stdout(Stdio::piped()).stderr(Stdio::piped());
        new_process_group(&mut cmd);

        let mut child = cmd
            .spawn()
            .map_err(|source| ExecError::Spawn { command: command.to_string(), source })?;

        let captured_stderr = if capture_stderr { Some(Arc::new(Mutex::new(Vec::new()))) } else { None };
        let stdin = child.stdin.take();

        if let Some(stdout) = child.stdout.take() {
            spawn_log_reader(label.to_string(), stdout, false, None);
        }
        let stderr_reader = child
            .stderr
            .take()
            .map(|stderr| spawn_log_reader(label.to_string(), stderr, true, captured_stderr.clone()));

        Ok(Self {
            child,
            command: command.to_string(),
            label: label.to_string(),
            captured_stderr,
            stderr_reader,
            stdin,
        })
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// The stderr lines captured so far, in order. Empty unless this process
    /// was spawned with [`spawn_captured`](Self::spawn_captured).
    pub fn captured_stderr(&self) -> Vec<String> {
        match &self.captured_stderr {
            Some(buf) => buf.lock().clone(),
            None => Vec::new(),
        }
    }

    /// Write `line` followed by a newline to the child's stdin. Only
    /// available on a process spawned with
    /// [`spawn_piped`](Self::spawn_piped).
    pub async fn write_stdin_line(&mut self, line: &str) -> Result<(), ExecError> {
        use tokio::io::AsyncWriteExt;
        let stdin =
            self.stdin.as_mut().ok_or_else(|| ExecError::NoStdin { command: self.command.clone() })?;
        stdin
            .write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(|source| ExecError::WriteStdin { command: self.command.clone(), source })
    }

    pub async fn wait(&mut self) -> Result<ExitStatus, ExecError> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|source| ExecError::Wait { command: self.command.clone(), source })?;
        // The pipe closes once the child exits, so the reader task is at
        // most a few polls from done; join it so a captured-stderr caller
        // never races it.
        if let Some(reader) = self.stderr_reader.take() {
            let _ = reader.await;
        }
        Ok(status)
    }

    /// Deliver `sig` to the command's whole process group.
    pub fn signal(&self, sig: Signal) -> Result<(), ExecError> {
        let pid = self.pid().ok_or_else(|| ExecError::AlreadyExited { command: self.command.clone() })?;
        send_signal_to_group(pid as i32, sig)
            .map_err(|source| ExecError::Signal { command: self.command.clone(), pid: pid as i32, source })
    }

    /// Ask the process to exit (its configured restart/stop signal), giving
    /// it `grace` to do so before force-killing the whole group.
    pub async fn stop(mut self, signal: Signal, grace: Duration) -> Result<(), ExecError> {
        if self.signal(signal).is_ok() {
            if tokio::time::timeout(grace, self.wait()).await.is_ok() {
                return Ok(());
            }
        }
        tracing::warn!(label = %self.label, "process did not exit within grace period, killing");
        let _ = self.child.kill().await;
        self.wait().await.map(|_| ())
    }
}

fn spawn_log_reader(
    label: String,
    pipe: impl tokio::io::AsyncRead + Unpin + Send + 'static,
    is_stderr: bool,
    capture: Option<Arc<Mutex<Vec<String>>>>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(pipe).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if is_stderr {
                tracing::warn!(target: "flux::exec", label = %label, "{line}");
                if let Some(buf) = &capture {
                    buf.lock().push(line);
                }
            } else {
                tracing::info!(target: "flux::exec", label = %label, "{line}");
            }
        }
    });
}

#[cfg(unix)]
fn new_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.as_std_mut().process_group(0);
}

#[cfg(not(unix))]
fn new_process_group(_cmd: &mut Command) {}

#[cfg(unix)]
fn send_signal_to_group(pid: i32, sig: Signal) -> std::io::Result<()> {
    use nix::sys::signal::{kill, Signal as NixSignal};
    use nix::unistd::Pid;

    let nix_sig = match sig {
        Signal::Hup => NixSignal::SIGHUP,
        Signal::Term => NixSignal::SIGTERM,
        Signal::Int => NixSignal::SIGINT,
        Signal::Kill => NixSignal::SIGKILL,
        Signal::Quit => NixSignal::SIGQUIT,
        Signal::Usr1 => NixSignal::SIGUSR1,
        Signal::Usr2 => NixSignal::SIGUSR2,
        Signal::Winch => NixSignal::SIGWINCH,
    };
    // Negative pid targets the whole process group created by
    // `new_process_group`.
    kill(Pid::from_raw(-pid), nix_sig).map_err(std::io::Error::from)
}

#[cfg(not(unix))]
fn send_signal_to_group(_pid: i32, _sig: Signal) -> std::io::Result<()> {
    Err(std::io::Error::new(std::io::ErrorKind::Unsupported, "signals are not supported on this platform"))
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
