// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Lexer;
use crate::token::TokenKind;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::tokenize(input).into_iter().map(|t| t.kind).collect()
}

fn non_space_kinds(input: &str) -> Vec<TokenKind> {
    kinds(input).into_iter().filter(|k| !matches!(k, TokenKind::Space)).collect()
}

#[test]
fn empty_input_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn comment_runs_to_end_of_line() {
    let toks = non_space_kinds("# hello\n@shell = bash\n");
    assert!(matches!(&toks[0], TokenKind::Comment(text) if text == "# hello\n"));
}

#[test]
fn variable_assignment_bare_value() {
    let toks = non_space_kinds("@shell = bash\n");
    assert_eq!(
        toks,
        vec![
            TokenKind::VarName("@shell".to_string()),
            TokenKind::Equals,
            TokenKind::BareString("bash".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn variable_assignment_quoted_value() {
    let toks = non_space_kinds("@shell = \"/bin/bash\"\n");
    assert_eq!(
        toks,
        vec![
            TokenKind::VarName("@shell".to_string()),
            TokenKind::Equals,
            TokenKind::QuotedString("/bin/bash".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn variable_without_equals_errors() {
    let toks = kinds("@shell bash\n");
    assert!(matches!(
        toks.last().unwrap(),
        TokenKind::Error(msg) if msg == "unterminated variable assignment"
    ));
}

#[test]
fn dotted_word_is_not_treated_as_variable() {
    // `@` not followed by a valid identifier is just a pattern-ish bare string.
    let toks = non_space_kinds("@foo.bar {\n}\n");
    assert_eq!(
        toks,
        vec![
            TokenKind::BareString("@foo.bar".to_string()),
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn block_with_prep_and_daemon() {
    let toks = non_space_kinds(
        "**/*.go {\n    prep: go build ./...\n    prep +onchange: go test ./...\n    daemon +sighup: ./server\n}\n",
    );
    assert_eq!(
        toks,
        vec![
            TokenKind::BareString("**/*.go".to_string()),
            TokenKind::LeftBrace,
            TokenKind::Prep,
            TokenKind::Colon,
            TokenKind::BareString("go build ./...\n".to_string()),
            TokenKind::Prep,
            TokenKind::BareString("+onchange".to_string()),
            TokenKind::Colon,
            TokenKind::BareString("go test ./...\n".to_string()),
            TokenKind::Daemon,
            TokenKind::BareString("+sighup".to_string()),
            TokenKind::Colon,
            TokenKind::BareString("./server\n".to_string()),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn exclude_pattern_with_leading_bang() {
    let toks = non_space_kinds("!**/vendor/** {\n    daemon +sigterm: ./server\n}\n");
    assert!(matches!(&toks[0], TokenKind::BareString(s) if s == "!**/vendor/**"));
}

#[test]
fn bang_alone_is_an_error() {
    let toks = kinds("! {\n}\n");
    assert!(matches!(
        toks.last().unwrap(),
        TokenKind::Error(msg) if msg == "! must be followed by a string"
    ));
}

#[test]
fn unterminated_quoted_string_is_an_error() {
    let toks = kinds("\"abc\n");
    assert!(matches!(
        toks.last().unwrap(),
        TokenKind::Error(msg) if msg == "unterminated quoted string"
    ));
}

#[test]
fn quoted_string_unescapes_only_its_own_delimiter() {
    let toks = non_space_kinds("\"a\\\"b\\nc\" {\n}\n");
    assert!(matches!(&toks[0], TokenKind::QuotedString(s) if s == "a\"b\\nc"));
}

#[test]
fn unknown_directive_is_an_error() {
    let toks = kinds("**/*.go {\n    bogus: foo\n}\n");
    assert!(matches!(
        toks.last().unwrap(),
        TokenKind::Error(msg) if msg == "unknown directive: bogus"
    ));
}

#[test]
fn option_without_plus_prefix_is_invalid() {
    let toks = kinds("**/*.go {\n    prep onchange: foo\n}\n");
    assert!(matches!(
        toks.last().unwrap(),
        TokenKind::Error(msg) if msg == "invalid command option"
    ));
}

#[test]
fn unterminated_block_at_eof() {
    let toks = kinds("**/*.go {\n    prep: foo\n");
    assert!(matches!(
        toks.last().unwrap(),
        TokenKind::Error(msg) if msg == "unterminated block"
    ));
}

#[test]
fn indir_directive_is_recognized() {
    let toks = non_space_kinds("**/*.go {\n    indir: sub/dir\n    prep: make\n}\n");
    assert_eq!(
        toks,
        vec![
            TokenKind::BareString("**/*.go".to_string()),
            TokenKind::LeftBrace,
            TokenKind::InDir,
            TokenKind::Colon,
            TokenKind::BareString("sub/dir\n".to_string()),
            TokenKind::Prep,
            TokenKind::Colon,
            TokenKind::BareString("make\n".to_string()),
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn command_value_preserves_backslash_newline_continuation() {
    let toks = non_space_kinds("**/*.go {\n    prep: go build \\\n        ./...\n}\n");
    assert!(matches!(
        &toks[4],
        TokenKind::BareString(s) if s == "go build \\\n        ./...\n"
    ));
}
