// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervises a single daemon: starts it on first restart, keeps restarting
//! it with backoff whenever it exits on its own, and forwards a restart as a
//! signal while it is still running. Grounded on the original Go daemon's
//! `Run`/`Restart`/`Shutdown` loop: a daemon isn't started until the first
//! `Restart`, and once started it restarts itself forever until `Shutdown`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use flux_core::DaemonSpec;
use flux_shell::{Process, ShellKind};

use crate::backoff::Backoff;
use crate::state::DaemonState;

/// Grace period given to a daemon to exit on its own signal before it is
/// force-killed.
const STOP_GRACE: Duration = Duration::from_secs(5);

enum Command {
    Restart,
    Stop,
}

enum Outcome {
    Exited,
    Stop,
}

/// A handle to a running supervisor task. Dropping it without calling
/// [`DaemonHandle::stop`] leaves the task running detached.
pub struct DaemonHandle {
    tx: mpsc::UnboundedSender<Command>,
    state: Arc<Mutex<DaemonState>>,
    join: JoinHandle<()>,
}

impl DaemonHandle {
    pub fn spawn(label: String, spec: DaemonSpec, shell: ShellKind, cwd: Option<PathBuf>) -> Self {
        Self::spawn_with_backoff(label, spec, shell, cwd, Backoff::new())
    }

    pub fn spawn_with_backoff(
        label: String,
        spec: DaemonSpec,
        shell: ShellKind,
        cwd: Option<PathBuf>,
        backoff: Backoff,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Arc::new(Mutex::new(DaemonState::Idle));
        let join = tokio::spawn(run_loop(label, spec, shell, cwd, rx, state.clone(), backoff));
        Self { tx, state, join }
    }

    /// Start the daemon if it isn't running, or signal it to restart if it
    /// is.
    pub fn restart(&self) {
        let _ = self.tx.send(Command::Restart);
    }

    pub fn state(&self) -> DaemonState {
        *self.state.lock()
    }

    /// Stop the daemon and wait for its supervisor task to finish.
    pub async fn stop(self) {
        let _ = self.tx.send(Command::Stop);
        let _ = self.join.await;
    }
}

async fn run_loop(
    label: String,
    spec: DaemonSpec,
    shell: ShellKind,
    cwd: Option<PathBuf>,
    mut rx: mpsc::UnboundedReceiver<Command>,
    state: Arc<Mutex<DaemonState>>,
    mut backoff: Backoff,
) {
    loop {
        match rx.recv().await {
            None | Some(Command::Stop) => {
                *state.lock() = DaemonState::Stopped;
                return;
            }
            Some(Command::Restart) => break,
        }
    }

    loop {
        *state.lock() = DaemonState::Running;
        let start = Instant::now();
        let spawned = if spec.pipe_restart_signal {
            Process::spawn_piped(&label, &spec.command, shell, cwd.as_deref()).await
        } else {
            Process::spawn(&label, &spec.command, shell, cwd.as_deref()).await
        };
        let mut proc = match spawned {
            Ok(proc) => proc,
            Err(err) => {
                tracing::error!(label = %label, error = %err, "failed to start daemon");
                backoff.record_run(start.elapsed());
                *state.lock() = DaemonState::Sleep;
                tokio::time::sleep(backoff.delay()).await;
                continue;
            }
        };

        let outcome = loop {
            tokio::select! {
                status = proc.wait() => {
                    match status {
                        Ok(status) => tracing::warn!(label = %label, %status, "daemon exited"),
                        Err(err) => tracing::warn!(label = %label, error = %err, "daemon wait failed"),
                    }
                    break Outcome::Exited;
                }
                cmd = rx.recv() => match cmd {
                    None | Some(Command::Stop) => break Outcome::Stop,
                    Some(Command::Restart) => {
                        let result = if spec.pipe_restart_signal {
                            proc.write_stdin_line(spec.restart_signal.pipe_name()).await
                        } else {
                            proc.signal(spec.restart_signal)
                        };
                        if let Err(err) = result {
                            tracing::warn!(label = %label, error = %err, "failed to signal daemon");
                        }
                    }
                },
            }
        };

        match outcome {
            Outcome::Exited => {
                *state.lock() = DaemonState::Exited;
                backoff.record_run(start.elapsed());
                *state.lock() = DaemonState::Sleep;
                tokio::time::sleep(backoff.delay()).await;
            }
            Outcome::Stop => {
                *state.lock() = DaemonState::Stopped;
                let _ = proc.stop(spec.restart_signal, STOP_GRACE).await;
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
