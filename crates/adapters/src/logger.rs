// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A small vocabulary over `tracing` - `say`/`notice`/`warn`/`shout` plus a
//! `stream(header)` factory for grouping a command's output lines under one
//! heading - so call sites read like the narration a file watcher's output
//! is expected to have, without hand-rolling terminal formatting.

/// Top-level logger. Cheap to clone; carries no state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Self
    }

    /// Plain informational line.
    pub fn say(&self, message: &str) {
        tracing::info!(target: "flux", "{message}");
    }

    /// A line marking successful completion of something.
    pub fn notice(&self, message: &str) {
        tracing::info!(target: "flux", notice = true, "{message}");
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!(target: "flux", "{message}");
    }

    /// A line that should stand out - process failures, fatal config errors.
    pub fn shout(&self, message: &str) {
        tracing::error!(target: "flux", "{message}");
    }

    /// A named sub-log for one command's output, e.g. `prep: npm test`.
    pub fn stream(&self, header: impl Into<String>) -> Stream {
        Stream::new(header.into())
    }
}

/// Output lines grouped under one heading, emitted as they're logged rather
/// than buffered.
pub struct Stream {
    header: String,
}

impl Stream {
    fn new(header: String) -> Self {
        tracing::info!(target: "flux", header = %header, "starting");
        Self { header }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn say(&self, message: &str) {
        tracing::info!(target: "flux::exec", header = %self.header, "{message}");
    }

    pub fn notice(&self, message: &str) {
        tracing::info!(target: "flux::exec", header = %self.header, notice = true, "{message}");
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!(target: "flux::exec", header = %self.header, "{message}");
    }

    pub fn shout(&self, message: &str) {
        tracing::error!(target: "flux::exec", header = %self.header, "{message}");
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
