// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Renders a prep/daemon command's `@name` variables: user-declared ones
//! from the config, plus two synthesized ones - `@mods` (the changed files
//! that triggered this run, or the block's initial matches) and `@dirmods`
//! (their containing directories) - each rendered as a space-joined,
//! individually double-quoted path list.
//!
//! A run of `k` backslashes immediately before `@word` escapes in pairs: odd
//! `k` emits `(k-1)/2` literal backslashes followed by the unsubstituted
//! `@word`; even `k` emits `k/2` literal backslashes followed by the
//! substituted value.

use std::path::{Path, PathBuf};

use thiserror::Error;

use flux_core::{Block, Mod, VariableMap};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("no such variable: @{0}")]
    NoSuchVariable(String),
}

/// Renders commands for one block, against one root directory and an
/// optional change-set (`None` on the synthetic initial invocation).
pub struct VarCmd<'a> {
    pub block: &'a Block,
    pub modset: Option<&'a Mod>,
    pub vars: &'a VariableMap,
    pub root: &'a Path,
}

impl<'a> VarCmd<'a> {
    pub fn render(&self, command: &str) -> Result<String, RenderError> {
        let mods = self.mod_paths();
        let dirmods = dir_paths(&mods);
        let mods_joined = join_quoted(&mods);
        let dirmods_joined = join_quoted(&dirmods);

        let mut out = String::with_capacity(command.len());
        let chars: Vec<char> = command.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\\' {
                let run_start = i;
                while i < chars.len() && chars[i] == '\\' {
                    i += 1;
                }
                let k = i - run_start;
                if chars.get(i) == Some(&'@') {
                    out.extend(std::iter::repeat('\\').take(k / 2));
                    if k % 2 == 1 {
                        // Odd run: the last backslash escapes the `@` itself.
                        out.push('@');
                        i += 1;
                    } else {
                        i = self.render_variable(&chars, i, &mut out, &mods_joined, &dirmods_joined)?;
                    }
                } else {
                    out.extend(std::iter::repeat('\\').take(k));
                }
                continue;
            }
            if c == '@' {
                i = self.render_variable(&chars, i, &mut out, &mods_joined, &dirmods_joined)?;
                continue;
            }
            out.push(c);
            i += 1;
        }
        Ok(out)
    }

    /// Renders the `@word` starting at `chars[at]` (which must be `@`) into
    /// `out`, returning the index just past the name. A bare `@` with no
    /// following name is passed through literally.
    fn render_variable(
        &self,
        chars: &[char],
        at: usize,
        out: &mut String,
        mods_joined: &str,
        dirmods_joined: &str,
    ) -> Result<usize, RenderError> {
        let mut j = at + 1;
        let mut name = String::new();
        while let Some(&n) = chars.get(j) {
            if n.is_ascii_alphanumeric() || n == '_' {
                name.push(n);
                j += 1;
            } else {
                break;
            }
        }
        if name.is_empty() {
            out.push('@');
            return Ok(at + 1);
        }
        match name.as_str() {
            "mods" => out.push_str(mods_joined),
            "dirmods" => out.push_str(dirmods_joined),
            _ => match self.vars.get(&name) {
                Some(value) => out.push_str(value),
                None => return Err(RenderError::NoSuchVariable(name)),
            },
        }
        Ok(j)
    }

    /// The paths that should fill `@mods`: the change-set if one triggered
    /// this run, or every file the block's include patterns already match
    /// on disk for the synthetic initial invocation.
    fn mod_paths(&self) -> Vec<String> {
        match self.modset {
            Some(modset) => modset.all(),
            None => self.initial_matches(),
        }
    }

    fn initial_matches(&self) -> Vec<String> {
        let mut found = std::collections::BTreeSet::new();
        for pattern in &self.block.include {
            let glob_path = self.root.join(pattern.raw());
            let Ok(paths) = glob::glob(&glob_path.to_string_lossy()) else { continue };
            for entry in paths.flatten() {
                if self.block.exclude.iter().any(|ex| ex.matches(&flux_core::normalize_path(self.root, &entry))) {
                    continue;
                }
                found.insert(flux_core::normalize_path(self.root, &entry));
            }
        }
        found.into_iter().collect()
    }
}

/// The containing directory of each path, deduplicated and sorted; the root
/// directory itself renders as `./.`.
fn dir_paths(paths: &[String]) -> Vec<String> {
    let mut dirs = std::collections::BTreeSet::new();
    for p in paths {
        let stripped = p.strip_prefix("./").unwrap_or(p);
        let parent = PathBuf::from(stripped).parent().map(PathBuf::from).unwrap_or_default();
        let rendered = if parent.as_os_str().is_empty() {
            "./.".to_string()
        } else {
            format!("./{}", parent.display())
        };
        dirs.insert(rendered);
    }
    dirs.into_iter().collect()
}

fn join_quoted(paths: &[String]) -> String {
    paths.iter().map(|p| format!("\"{p}\"")).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
