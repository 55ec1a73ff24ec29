// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn all_is_sorted_union_of_added_and_changed() {
    let m = Mod::new(
        vec!["./b.txt".to_string()],
        vec!["./a.txt".to_string()],
        vec!["./c.txt".to_string()],
    );
    assert_eq!(m.all(), vec!["./a.txt".to_string(), "./b.txt".to_string()]);
}

#[test]
fn empty_mod_is_empty() {
    assert!(Mod::new(vec![], vec![], vec![]).is_empty());
    assert!(!Mod::new(vec!["./a".to_string()], vec![], vec![]).is_empty());
}

#[test]
fn construction_enforces_disjointness() {
    let m = Mod::new(
        vec!["./a".to_string()],
        vec!["./a".to_string(), "./b".to_string()],
        vec!["./a".to_string(), "./b".to_string()],
    );
    assert_eq!(m.added().collect::<Vec<_>>(), vec!["./a"]);
    assert_eq!(m.changed().collect::<Vec<_>>(), vec!["./b"]);
    assert!(m.deleted().next().is_none());
}

#[test]
fn has_ignores_dot_slash_noise() {
    let m = Mod::new(vec!["./a/b.txt".to_string()], vec![], vec![]);
    assert!(m.has("a/b.txt"));
    assert!(m.has("./a/b.txt"));
    assert!(!m.has("a/c.txt"));
}

#[test]
fn clean_slash_path_collapses_dot_and_dotdot() {
    assert_eq!(clean_slash_path("./a/./b"), "a/b");
    assert_eq!(clean_slash_path("a/b/../c"), "a/c");
    assert_eq!(clean_slash_path(""), ".");
    assert_eq!(clean_slash_path("/a/../../b"), "/b");
}

#[test]
fn normalize_relative_to_root() {
    let root = Path::new("/proj");
    assert_eq!(normalize_path(root, Path::new("/proj/a/b.go")), "./a/b.go");
    assert_eq!(normalize_path(root, Path::new("/proj")), "./");
    assert_eq!(normalize_path(root, Path::new("/other/x")), "/other/x");
}
