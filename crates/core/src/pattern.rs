// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Glob patterns used by block include/exclude lists.
//!
//! Matching itself is delegated to the `glob` crate; this module adds what
//! the underlying matcher doesn't support natively: the leading `!`
//! pattern-negation convention, brace (`{a,b,c}`) alternation, and
//! translating `[^...]` negated character classes (the spelling this DSL
//! documents) into the `[!...]` spelling `glob::Pattern` actually
//! recognizes.

use thiserror::Error;

/// Errors raised while compiling a pattern string.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern {pattern:?}: {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// A compiled include/exclude glob pattern.
///
/// A pattern beginning with `!` is an exclude; everything else is an
/// include. Brace groups are expanded ahead of time into one `glob::Pattern`
/// per alternative, and a path matches the `Pattern` if it matches any of
/// them.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    negated: bool,
    alternatives: Vec<glob::Pattern>,
}

impl Pattern {
    /// Compile a pattern string. A leading `!` marks it as an exclude and is
    /// stripped before brace expansion and compilation.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let (negated, body) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let alternatives = expand_braces(body)
            .into_iter()
            .map(|alt| {
                let translated = translate_negated_classes(&alt);
                glob::Pattern::new(&translated)
                    .map_err(|source| PatternError::Invalid { pattern: alt, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { raw: raw.to_string(), negated, alternatives })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_exclude(&self) -> bool {
        self.negated
    }

    /// Test a slash-delimited path against this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let opts = glob::MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.alternatives.iter().any(|p| p.matches_with(path, opts))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Pattern {}

/// Rewrite `[^...]` character classes to the `[!...]` spelling
/// `glob::Pattern` recognizes. Escaped brackets (`\[`) are left alone; a
/// `[` with no matching `]` is passed through untouched so the underlying
/// compiler reports the same "invalid pattern" error it always did.
fn translate_negated_classes(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => {
                out.push_str(&s[i..i + 2]);
                i += 2;
            }
            b'[' => {
                let mut j = i + 1;
                while j < bytes.len() && bytes[j] != b']' {
                    j += 1;
                }
                if j < bytes.len() {
                    let inner = &s[i + 1..j];
                    if let Some(rest) = inner.strip_prefix('^') {
                        out.push_str("[!");
                        out.push_str(rest);
                        out.push(']');
                    } else {
                        out.push_str(&s[i..=j]);
                    }
                    i = j + 1;
                } else {
                    out.push('[');
                    i += 1;
                }
            }
            _ => {
                let ch_len = s[i..].chars().next().map(|c| c.len_utf8()).unwrap_or(1);
                out.push_str(&s[i..i + ch_len]);
                i += ch_len;
            }
        }
    }
    out
}

/// Expand a single level of `{a,b,c}` alternation into N literal strings.
/// Nested braces are tracked so that `{a,{b,c}}` expands correctly; this is
/// more than the config grammar requires but costs nothing extra.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    match find_brace(pattern) {
        None => vec![pattern.to_string()],
        Some((start, end)) => {
            let prefix = &pattern[..start];
            let inner = &pattern[start + 1..end];
            let suffix = &pattern[end + 1..];
            split_top_level(inner)
                .into_iter()
                .flat_map(|alt| expand_braces(&format!("{prefix}{alt}{suffix}")))
                .collect()
        }
    }
}

/// Find the first unescaped `{...}` group, returning byte offsets of the
/// braces themselves.
fn find_brace(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'{' => {
                let mut depth = 1usize;
                let mut j = i + 1;
                while j < bytes.len() && depth > 0 {
                    match bytes[j] {
                        b'\\' => j += 1,
                        b'{' => depth += 1,
                        b'}' => depth -= 1,
                        _ => {}
                    }
                    j += 1;
                }
                if depth == 0 {
                    return Some((i, j - 1));
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// Split a brace body on top-level commas (commas inside nested braces are
/// preserved).
fn split_top_level(s: &str) -> Vec<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                out.push(s[start..i].to_string());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    out.push(s[start..].to_string());
    out
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
