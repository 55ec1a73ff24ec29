// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use flux_core::{Block, Mod, Pattern, VariableMap};

use super::{RenderError, VarCmd};

#[test]
fn user_variable_is_substituted() {
    let block = Block::default();
    let mut vars = VariableMap::new();
    vars.declare("foo", "bar").unwrap();
    let vc = VarCmd { block: &block, modset: None, vars: &vars, root: std::path::Path::new(".") };
    assert_eq!(vc.render("@foo@foo").unwrap(), "barbar");
}

#[test]
fn unknown_variable_is_an_error() {
    let block = Block::default();
    let vars = VariableMap::new();
    let vc = VarCmd { block: &block, modset: None, vars: &vars, root: std::path::Path::new(".") };
    assert_eq!(vc.render("@nonexistent"), Err(RenderError::NoSuchVariable("nonexistent".to_string())));
}

#[test]
fn escaped_at_sign_is_literal() {
    let block = Block::default();
    let vars = VariableMap::new();
    let vc = VarCmd { block: &block, modset: None, vars: &vars, root: std::path::Path::new(".") };
    assert_eq!(vc.render(r"user\@host").unwrap(), "user@host");
}

#[test]
fn a_double_backslash_before_at_is_one_literal_backslash_plus_substitution() {
    let block = Block::default();
    let mut vars = VariableMap::new();
    vars.declare("foo", "bar").unwrap();
    let vc = VarCmd { block: &block, modset: None, vars: &vars, root: std::path::Path::new(".") };
    assert_eq!(vc.render(r"\\@foo").unwrap(), r"\bar");
}

#[test]
fn a_triple_backslash_before_at_is_one_literal_backslash_plus_the_escaped_at() {
    let block = Block::default();
    let vars = VariableMap::new();
    let vc = VarCmd { block: &block, modset: None, vars: &vars, root: std::path::Path::new(".") };
    assert_eq!(vc.render(r"\\\@foo").unwrap(), r"\@foo");
}

#[test]
fn mods_and_dirmods_render_from_the_change_set() {
    let block = Block::default();
    let vars = VariableMap::new();
    let modset = Mod::new(vec![], vec!["./foo".to_string()], vec![]);
    let vc = VarCmd { block: &block, modset: Some(&modset), vars: &vars, root: std::path::Path::new(".") };
    assert_eq!(vc.render("@mods @dirmods").unwrap(), r#""./foo" "./.""#);
}

#[test]
fn mods_renders_every_initial_match_when_there_is_no_change_set() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("tdir")).unwrap();
    std::fs::write(dir.path().join("tdir").join("tfile"), b"x").unwrap();

    let mut block = Block::default();
    block.include.push(Pattern::parse("tdir/**").unwrap());
    let vars = VariableMap::new();
    let vc = VarCmd { block: &block, modset: None, vars: &vars, root: dir.path() };
    let rendered = vc.render("@mods").unwrap();
    assert!(rendered.contains("tfile"), "expected tfile in {rendered:?}");
}
