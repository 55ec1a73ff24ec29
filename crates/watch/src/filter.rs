// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-block filtering of a batched [`Mod`] against a block's include/exclude
//! pattern lists.

use flux_core::{Block, Mod};

/// Does `path` match at least one include pattern (or have no include
/// patterns to satisfy at all - an exclude-only block matches everything
/// not excluded) and no exclude pattern?
pub fn path_matches(block: &Block, path: &str) -> bool {
    let included = block.include.is_empty() || block.include.iter().any(|p| p.matches(path));
    if !included {
        return false;
    }
    !block.exclude.iter().any(|p| p.matches(path))
}

/// Restrict `modset` to the paths a block cares about. Returns `None` if no
/// path in the original batch matches.
pub fn filter_mod(block: &Block, modset: &Mod) -> Option<Mod> {
    let added: Vec<String> =
        modset.added().filter(|p| path_matches(block, p)).map(str::to_string).collect();
    let changed: Vec<String> =
        modset.changed().filter(|p| path_matches(block, p)).map(str::to_string).collect();
    let deleted: Vec<String> =
        modset.deleted().filter(|p| path_matches(block, p)).map(str::to_string).collect();

    if added.is_empty() && changed.is_empty() && deleted.is_empty() {
        None
    } else {
        Some(Mod::new(added, changed, deleted))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
