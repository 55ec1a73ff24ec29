// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! flux-watch: turns OS filesystem events into debounced [`flux_core::Mod`]
//! batches.

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod batcher;
mod filter;
mod watcher;

use std::path::Path;
use std::time::{Duration, Instant};

pub use batcher::{Batcher, ChangeKind, RawChange};
pub use filter::{filter_mod, path_matches};
pub use watcher::{watch, WatchError};

use flux_core::Mod;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Debounce tuning: how long the tree must be quiet before a batch flushes,
/// and the ceiling on how long a batch can be held open under continuous
/// activity.
#[derive(Debug, Clone, Copy)]
pub struct DebounceConfig {
    pub lull: Duration,
    pub max_wait: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { lull: Duration::from_millis(300), max_wait: Duration::from_millis(1_500) }
    }
}

/// Watch `root` and stream debounced [`Mod`] batches to `out` until the
/// sender side is dropped or the underlying watcher fails.
pub async fn run(root: &Path, config: DebounceConfig, out: mpsc::UnboundedSender<Mod>) -> Result<(), WatchError> {
    let (mut raw_rx, _watcher) = watch(root)?;
    let mut batcher = Batcher::new(config.lull, config.max_wait, root.to_path_buf());
    let mut ticker = interval(config.lull.min(Duration::from_millis(50)).max(Duration::from_millis(1)));

    loop {
        tokio::select! {
            maybe_change = raw_rx.recv() => {
                match maybe_change {
                    Some(change) => batcher.record(change, Instant::now()),
                    None => {
                        if let Some(modset) = batcher.flush() {
                            let _ = out.send(modset);
                        }
                        return Ok(());
                    }
                }
            }
            _ = ticker.tick() => {
                if batcher.is_pending() && batcher.ready(Instant::now()) {
                    if let Some(modset) = batcher.flush() {
                        if out.send(modset).is_err() {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
