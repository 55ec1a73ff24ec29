// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shell backend a prep or daemon command is run through.

/// How a command string is turned into an argv.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// `bash -c <command>`.
    Bash,
    /// `sh -c <command>` (or the platform's minimal POSIX shell).
    Sh,
    /// `powershell -Command <command>`, the Windows default.
    PowerShell,
    /// No shell at all: the command string is split on whitespace and run
    /// directly, so it can't use pipes, redirection, or globbing.
    Exec,
}

impl ShellKind {
    /// Parse an explicit `@shell` value (`bash`, `sh`, `powershell`, `exec`).
    /// Unrecognized values are treated as `exec` naming a custom
    /// interpreter to be substituted in by the caller, not matched here.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bash" => Some(Self::Bash),
            "sh" => Some(Self::Sh),
            "powershell" => Some(Self::PowerShell),
            "exec" => Some(Self::Exec),
            _ => None,
        }
    }

    /// The platform default when `@shell` is absent or empty.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::PowerShell
        } else {
            Self::Sh
        }
    }

    /// Resolve the shell to use for a config, given its (possibly absent or
    /// empty) `@shell` declaration and a config-wide fallback (e.g. a value
    /// inherited from an `indir`-enclosing scope). An empty `@shell` falls
    /// through to `fallback`, which itself falls through to the platform
    /// default.
    pub fn resolve(declared: Option<&str>, fallback: Option<Self>) -> Self {
        match declared {
            Some(s) if !s.is_empty() => Self::parse(s).unwrap_or(Self::Exec),
            _ => fallback.unwrap_or_else(Self::platform_default),
        }
    }

    /// The program name and leading args used to invoke `command` through
    /// this shell. `Exec` is handled separately by the caller since it has
    /// no fixed leading argv.
    pub fn invocation(self, command: &str) -> (&'static str, Vec<String>) {
        match self {
            Self::Bash => ("bash", vec!["-c".to_string(), command.to_string()]),
            Self::Sh => ("sh", vec!["-c".to_string(), command.to_string()]),
            Self::PowerShell => ("powershell", vec!["-Command".to_string(), command.to_string()]),
            Self::Exec => unreachable!("Exec has no shell invocation"),
        }
    }
}
