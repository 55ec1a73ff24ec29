// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The default exclude patterns applied to every block unless it declares
//! `+noignore` or `no_common_filter`.

/// Patterns injected into a block's exclude list by default.
pub const COMMON_EXCLUDES: &[&str] = &[
    "**/.git/**",
    "**/.hg/**",
    "**/.svn/**",
    "**/.bzr/**",
    "**/.DS_Store/**",
    "**.tmp",
    "**~",
    "**#",
    "**.bak",
    "**.swp",
    "**.___jb_old___",
    "**.___jb_bak___",
    "**.py[cod]",
    "**/node_modules/**",
];
