// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `@name = value` variable map and the restart-signal vocabulary.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while building a [`VariableMap`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariableError {
    #[error("invalid variable name: @{0}")]
    InvalidName(String),

    #[error("variable @{0} is declared more than once")]
    Redeclared(String),
}

/// A signal a daemon can be sent to request a restart, plus the subset that
/// has no real equivalent on platforms without POSIX signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Hup,
    Term,
    Int,
    Kill,
    Quit,
    Usr1,
    Usr2,
    Winch,
}

impl Signal {
    /// Parse a `+sig*` config option tag, e.g. `sighup`.
    pub fn from_option(opt: &str) -> Option<Self> {
        match opt {
            "sighup" => Some(Self::Hup),
            "sigterm" => Some(Self::Term),
            "sigint" => Some(Self::Int),
            "sigkill" => Some(Self::Kill),
            "sigquit" => Some(Self::Quit),
            "sigusr1" => Some(Self::Usr1),
            "sigusr2" => Some(Self::Usr2),
            "sigwinch" => Some(Self::Winch),
            _ => None,
        }
    }

    /// USR1/USR2/WINCH have no portable non-POSIX equivalent.
    pub fn is_posix_only(self) -> bool {
        matches!(self, Self::Usr1 | Self::Usr2 | Self::Winch)
    }

    /// Present-tense name written to a daemon's stdin when
    /// `pipe_restart_signal` substitutes for a real signal delivery.
    pub fn pipe_name(self) -> &'static str {
        match self {
            Self::Term => "terminate",
            Self::Quit => "abort",
            Self::Kill => "kill",
            Self::Hup => "hup",
            Self::Int => "int",
            Self::Usr1 => "usr1",
            Self::Usr2 => "usr2",
            Self::Winch => "winch",
        }
    }
}

/// A mapping from `@name` to string value, as declared at the top of a
/// config file. Redeclaration of a name is rejected at insert time so the
/// parser can surface it as a config error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    vars: BTreeMap<String, String>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `@name = value`. Errors if the name is malformed or already
    /// present.
    pub fn declare(&mut self, name: &str, value: impl Into<String>) -> Result<(), VariableError> {
        validate_name(name)?;
        if self.vars.contains_key(name) {
            return Err(VariableError::Redeclared(name.to_string()));
        }
        self.vars.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Overwrite or insert a value without redeclaration checking, used for
    /// synthesized variables like `@mods`/`@dirmods` at render time.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// The `@shell` reserved variable, if declared.
    pub fn shell(&self) -> Option<&str> {
        self.get("shell")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Validate `name` (without the leading `@`) against `[a-zA-Z_][a-zA-Z_0-9]*`.
fn validate_name(name: &str) -> Result<(), VariableError> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(VariableError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
#[path = "variables_tests.rs"]
mod tests;
