// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::pattern::Pattern;

#[test]
fn empty_block_is_inert() {
    assert!(Block::default().is_inert());
}

#[test]
fn block_with_include_is_not_inert() {
    let mut block = Block::default();
    block.include.push(Pattern::parse("**/*.go").unwrap());
    assert!(!block.is_inert());
}

#[test]
fn block_with_only_prep_is_not_inert() {
    let mut block = Block::default();
    block.preps.push(PrepSpec { command: "echo hi".into(), onchange: false });
    assert!(!block.is_inert());
}

#[test]
fn config_equality_is_structural() {
    let mut a = Config::new();
    a.variables.declare("shell", "bash").unwrap();
    let mut b = Config::new();
    b.variables.declare("shell", "bash").unwrap();
    assert_eq!(a, b);

    b.blocks.push(Block::default());
    assert_ne!(a, b);
}
