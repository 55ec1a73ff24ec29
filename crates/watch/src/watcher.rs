// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS filesystem event ingestion via the `notify` crate, bridged onto a
//! tokio channel of [`RawChange`]s normalized relative to the watched root.

use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;

use flux_core::normalize_path;

use crate::batcher::{ChangeKind, RawChange};

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to start filesystem watcher: {0}")]
    Notify(#[from] notify::Error),
}

/// Begin watching `root` recursively. Returns a channel of normalized raw
/// changes and the live [`RecommendedWatcher`] - the watcher must be kept
/// alive for as long as events are wanted; dropping it stops delivery.
pub fn watch(root: &Path) -> Result<(mpsc::UnboundedReceiver<RawChange>, RecommendedWatcher), WatchError> {
    let (tx, rx) = mpsc::unbounded_channel();
    let root_buf = root.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        let Ok(event) = res else { return };
        for change in classify(&root_buf, &event) {
            // The watcher callback runs on notify's own thread; an unbounded
            // channel send here never blocks and only fails once every
            // receiver has been dropped, which means shutdown is in
            // progress and the event can be discarded.
            let _ = tx.send(change);
        }
    })?;
    watcher.watch(root, RecursiveMode::Recursive)?;

    Ok((rx, watcher))
}

fn classify(root: &Path, event: &Event) -> Vec<RawChange> {
    let kind = match event.kind {
        EventKind::Create(_) => ChangeKind::Created,
        // Rename events come in several shapes across platforms (one event
        // with both paths, or a separate From/To pair) - every path they
        // touch is recorded independently and resolved against the
        // filesystem at flush time, not trusted as "the new name" here.
        EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Renamed,
        EventKind::Modify(_) => ChangeKind::Modified,
        EventKind::Remove(_) => ChangeKind::Removed,
        _ => return Vec::new(),
    };
    event
        .paths
        .iter()
        .map(|p| RawChange::new(normalize_path(root, p), kind))
        .collect()
}
