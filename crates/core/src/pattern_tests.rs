// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn plain_include_matches() {
    let p = Pattern::parse("**/*.go").unwrap();
    assert!(!p.is_exclude());
    assert!(p.matches("src/main.go"));
    assert!(p.matches("main.go"));
    assert!(!p.matches("main.rs"));
}

#[test]
fn leading_bang_is_exclude() {
    let p = Pattern::parse("!**/vendor/**").unwrap();
    assert!(p.is_exclude());
    assert!(p.matches("a/vendor/b.go"));
}

#[test]
fn brace_alternation_expands() {
    let p = Pattern::parse("**/*.{go,rs}").unwrap();
    assert!(p.matches("src/main.go"));
    assert!(p.matches("src/main.rs"));
    assert!(!p.matches("src/main.py"));
}

#[test]
fn single_star_does_not_cross_separators() {
    let p = Pattern::parse("a/*.go").unwrap();
    assert!(p.matches("a/b.go"));
    assert!(!p.matches("a/b/c.go"));
}

#[test]
fn double_star_crosses_separators() {
    let p = Pattern::parse("a/**/b.go").unwrap();
    assert!(p.matches("a/x/y/b.go"));
    assert!(p.matches("a/b.go"));
}

#[test]
fn invalid_pattern_is_rejected() {
    assert!(Pattern::parse("[").is_err());
}

#[test]
fn equality_is_by_raw_string() {
    let a = Pattern::parse("*.go").unwrap();
    let b = Pattern::parse("*.go").unwrap();
    let c = Pattern::parse("!*.go").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn caret_negated_class_excludes_the_listed_chars() {
    let p = Pattern::parse("a/[^bx].go").unwrap();
    assert!(p.matches("a/c.go"));
    assert!(!p.matches("a/b.go"));
    assert!(!p.matches("a/x.go"));
}

#[test]
fn nested_brace_expansion() {
    let expanded = expand_braces("x{a,{b,c}}y");
    let mut expanded = expanded;
    expanded.sort();
    assert_eq!(expanded, vec!["xay", "xby", "xcy"]);
}
