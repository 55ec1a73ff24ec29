// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while spawning, signalling, or waiting on a command.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("empty command specification")]
    EmptyCommand,

    #[error("failed to spawn {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait on {command:?}: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to signal {command:?} (pid {pid}): {source}")]
    Signal {
        command: String,
        pid: i32,
        #[source]
        source: std::io::Error,
    },

    #[error("process for {command:?} has already exited")]
    AlreadyExited { command: String },

    #[error("failed to write to stdin of {command:?}: {source}")]
    WriteStdin {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process for {command:?} was not spawned with a piped stdin")]
    NoStdin { command: String },
}
