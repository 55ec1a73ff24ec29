// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexer and parser error types, reported as `<file>:<line>: <message>`.

use thiserror::Error;

/// A single lex or parse failure, positioned by line number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{file}:{line}: {message}")]
pub struct ConfigError {
    pub file: String,
    pub line: usize,
    pub message: String,
}

impl ConfigError {
    pub fn new(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self { file: file.into(), line, message: message.into() }
    }
}

/// The exact lexer failure messages named by the spec, before they're
/// wrapped into a [`ConfigError`] with file/line context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexMessage {
    UnterminatedQuotedString,
    UnterminatedBlock,
    InvalidInput,
    InvalidCommandOption,
    EmptyCommandSpecification,
    BangMustBeFollowedByString,
    EqualsMustBeFollowedByString,
    UnterminatedVariableAssignment,
    UnknownDirective(String),
    DuplicateIndir,
    DuplicateVariable(String),
}

impl std::fmt::Display for LexMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedQuotedString => write!(f, "unterminated quoted string"),
            Self::UnterminatedBlock => write!(f, "unterminated block"),
            Self::InvalidInput => write!(f, "invalid input"),
            Self::InvalidCommandOption => write!(f, "invalid command option"),
            Self::EmptyCommandSpecification => write!(f, "empty command specification"),
            Self::BangMustBeFollowedByString => write!(f, "! must be followed by a string"),
            Self::EqualsMustBeFollowedByString => write!(f, "= must be followed by a string"),
            Self::UnterminatedVariableAssignment => write!(f, "unterminated variable assignment"),
            Self::UnknownDirective(name) => write!(f, "unknown directive: {name}"),
            Self::DuplicateIndir => write!(f, "duplicate indir in block"),
            Self::DuplicateVariable(name) => write!(f, "@{name} is declared more than once"),
        }
    }
}
