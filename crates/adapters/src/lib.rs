// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! flux-adapters: notification backends (desktop, terminal bell) and a
//! small narration vocabulary over `tracing` shared by the prep runner and
//! the daemon supervisor's output streaming.

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod logger;
mod notify;

pub use logger::{Logger, Stream};
pub use notify::{BellNotifier, DesktopNotifier, NotifierSet, NotifyError, Notifier};

#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifier, NotifyCall};
