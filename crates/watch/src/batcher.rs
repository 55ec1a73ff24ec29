// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Debounce accumulator turning a stream of raw filesystem events into
//! discrete [`Mod`] batches.
//!
//! Events are accumulated until the filesystem has been quiet for `lull`,
//! or `max_wait` has elapsed since the first event in the batch - whichever
//! comes first. The second bound keeps a continuously-busy tree (a build
//! directory under active compilation, say) from starving the batcher
//! forever.
//!
//! Notifiers disagree across platforms on rename semantics and on whether a
//! transient file (created and deleted again within one lull window) is
//! even visible at all. Rather than trust any single event's claim, `flush`
//! reconciles every accumulated path against the filesystem at emit time -
//! existence there is the arbiter of truth, not the event kind that put the
//! path in the batch.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use flux_core::Mod;

/// The filesystem operation observed for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
    /// One side of a rename. Notifiers report renames inconsistently (a
    /// single paired event, or a `From`/`To` pair) so each path is recorded
    /// independently and resolved against the filesystem at flush time.
    Renamed,
}

/// A single normalized filesystem event, ready to be recorded by a
/// [`Batcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChange {
    pub path: String,
    pub kind: ChangeKind,
}

impl RawChange {
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self { path: path.into(), kind }
    }
}

pub struct Batcher {
    root: PathBuf,
    lull: Duration,
    max_wait: Duration,
    added: BTreeSet<String>,
    changed: BTreeSet<String>,
    deleted: BTreeSet<String>,
    renamed: BTreeSet<String>,
    first_seen: Option<Instant>,
    last_seen: Option<Instant>,
}

impl Batcher {
    /// `root` is used only to resolve normalized paths back to filesystem
    /// locations for the existence check at flush time.
    pub fn new(lull: Duration, max_wait: Duration, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lull,
            max_wait,
            added: BTreeSet::new(),
            changed: BTreeSet::new(),
            deleted: BTreeSet::new(),
            renamed: BTreeSet::new(),
            first_seen: None,
            last_seen: None,
        }
    }

    /// Record one raw event into the in-flight batch.
    pub fn record(&mut self, change: RawChange, now: Instant) {
        match change.kind {
            ChangeKind::Created => {
                self.deleted.remove(&change.path);
                self.changed.remove(&change.path);
                self.renamed.remove(&change.path);
                self.added.insert(change.path);
            }
            ChangeKind::Modified => {
                self.deleted.remove(&change.path);
                self.renamed.remove(&change.path);
                if !self.added.contains(&change.path) {
                    self.changed.insert(change.path);
                }
            }
            ChangeKind::Removed => {
                self.added.remove(&change.path);
                self.changed.remove(&change.path);
                self.renamed.remove(&change.path);
                self.deleted.insert(change.path);
            }
            ChangeKind::Renamed => {
                if !self.added.contains(&change.path) && !self.deleted.contains(&change.path) {
                    self.renamed.insert(change.path);
                }
            }
        }
        if self.first_seen.is_none() {
            self.first_seen = Some(now);
        }
        self.last_seen = Some(now);
    }

    /// Whether the in-flight batch, if any, should be flushed at `now`.
    pub fn ready(&self, now: Instant) -> bool {
        match (self.first_seen, self.last_seen) {
            (Some(first), Some(last)) => {
                now.saturating_duration_since(last) >= self.lull
                    || now.saturating_duration_since(first) >= self.max_wait
            }
            _ => false,
        }
    }

    /// True once an event has been recorded and not yet flushed.
    pub fn is_pending(&self) -> bool {
        self.first_seen.is_some()
    }

    /// Resolve a normalized path (`./rel`, `./`, or an absolute path) back
    /// to a filesystem location under `root`.
    fn resolve(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("./") {
            self.root.join(rest)
        } else if path == "." || path == "./" {
            self.root.clone()
        } else if path.starts_with('/') {
            PathBuf::from(path)
        } else {
            self.root.join(path)
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    /// Drain the in-flight batch into a `Mod`, reconciling every
    /// accumulated path against the filesystem and resetting the
    /// accumulator. Returns `None` if nothing was pending.
    pub fn flush(&mut self) -> Option<Mod> {
        if self.added.is_empty()
            && self.changed.is_empty()
            && self.deleted.is_empty()
            && self.renamed.is_empty()
        {
            self.first_seen = None;
            self.last_seen = None;
            return None;
        }
        let mut added = std::mem::take(&mut self.added);
        let mut changed = std::mem::take(&mut self.changed);
        let mut deleted = std::mem::take(&mut self.deleted);
        let renamed = std::mem::take(&mut self.renamed);
        self.first_seen = None;
        self.last_seen = None;

        // 1. Resolve renamed paths: present now -> added, else -> removed.
        for path in renamed {
            if self.exists(&path) {
                changed.remove(&path);
                deleted.remove(&path);
                added.insert(path);
            } else {
                changed.remove(&path);
                added.remove(&path);
                deleted.insert(path);
            }
        }

        // 2. An added path that no longer exists was transient within this
        // lull window; strike it entirely rather than report a phantom add.
        for path in std::mem::take(&mut added) {
            if self.exists(&path) {
                changed.remove(&path);
                deleted.remove(&path);
                added.insert(path);
            } else {
                changed.remove(&path);
                deleted.remove(&path);
            }
        }

        // 3. A removed path that exists again by emit time is not a
        // deletion; drop it from `deleted` without promoting it elsewhere.
        // A removed path confirmed gone is struck from added/changed, in
        // case step 1 or overlapping events left it there.
        for path in std::mem::take(&mut deleted) {
            if self.exists(&path) {
                added.remove(&path);
                changed.remove(&path);
            } else {
                added.remove(&path);
                changed.remove(&path);
                deleted.insert(path);
            }
        }

        Some(Mod::new(added, changed, deleted))
    }
}

#[cfg(test)]
#[path = "batcher_tests.rs"]
mod tests;
