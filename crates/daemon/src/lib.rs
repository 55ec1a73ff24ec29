// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! flux-daemon: supervises the long-lived processes declared by `daemon:`
//! directives. Each one is started on first restart and then restarts
//! itself forever with exponential backoff whenever it exits on its own; a
//! restart while it's still running is forwarded as a signal instead of a
//! relaunch.

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod backoff;
mod pen;
mod state;
mod supervisor;
mod world;

pub use backoff::Backoff;
pub use pen::DaemonPen;
pub use state::DaemonState;
pub use supervisor::DaemonHandle;
pub use world::DaemonWorld;
