// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`Mod`]: the debounced, reconciled change-set the batcher emits and the
//! control loop consumes.

use std::collections::BTreeSet;
use std::path::Path;

/// An immutable, reconciled change-set.
///
/// Construction enforces pairwise disjointness by giving `added` priority
/// over `changed`, and `changed` priority over `deleted` - by the time the
/// batcher calls `Mod::new` the three inputs should already be disjoint, but
/// this keeps the invariant true even if a caller (e.g. a test) passes
/// overlapping sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mod {
    added: BTreeSet<String>,
    changed: BTreeSet<String>,
    deleted: BTreeSet<String>,
}

impl Mod {
    pub fn new(
        added: impl IntoIterator<Item = String>,
        changed: impl IntoIterator<Item = String>,
        deleted: impl IntoIterator<Item = String>,
    ) -> Self {
        let added: BTreeSet<String> = added.into_iter().collect();
        let mut changed: BTreeSet<String> = changed.into_iter().collect();
        changed.retain(|p| !added.contains(p));
        let mut deleted: BTreeSet<String> = deleted.into_iter().collect();
        deleted.retain(|p| !added.contains(p) && !changed.contains(p));
        Self { added, changed, deleted }
    }

    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.added.iter().map(String::as_str)
    }

    pub fn changed(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    pub fn deleted(&self) -> impl Iterator<Item = &str> {
        self.deleted.iter().map(String::as_str)
    }

    /// `added ∪ changed`, sorted and de-duplicated. Deletions are excluded:
    /// most consumers (prep commands, `@mods`) want files that still exist.
    pub fn all(&self) -> Vec<String> {
        self.added.union(&self.changed).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.deleted.is_empty()
    }

    /// True if `path` (after lexical cleaning) appears in any of the three
    /// sets.
    pub fn has(&self, path: &str) -> bool {
        let probe = clean_slash_path(path);
        self.added.iter().chain(self.changed.iter()).chain(self.deleted.iter()).any(|entry| clean_slash_path(entry) == probe)
    }
}

/// Lexically clean a slash-delimited path the way `path.Clean` does: collapse
/// `.` components, resolve `..` against preceding components, and drop empty
/// components from repeated slashes. Does not touch the filesystem.
pub fn clean_slash_path(p: &str) -> String {
    if p.is_empty() {
        return ".".to_string();
    }
    let is_abs = p.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for comp in p.split('/') {
        match comp {
            "" | "." => continue,
            ".." => match out.last() {
                Some(&last) if last != ".." => {
                    out.pop();
                }
                _ if !is_abs => out.push(".."),
                _ => {}
            },
            c => out.push(c),
        }
    }
    let joined = out.join("/");
    if is_abs {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Normalize an absolute filesystem path for inclusion in a [`Mod`]: slash
/// delimited, relative to `root` (prefixed `./`) when under it, else
/// absolute. `root` itself normalizes to `./`.
pub fn normalize_path(root: &Path, path: &Path) -> String {
    let to_slash = |p: &Path| p.to_string_lossy().replace('\\', "/");
    match path.strip_prefix(root) {
        Ok(rel) => {
            let cleaned = clean_slash_path(&to_slash(rel));
            if cleaned == "." {
                "./".to_string()
            } else {
                format!("./{cleaned}")
            }
        }
        Err(_) => clean_slash_path(&to_slash(path)),
    }
}

#[cfg(test)]
#[path = "modset_tests.rs"]
mod tests;
