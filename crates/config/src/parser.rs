// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive-descent parser turning a token stream into a [`Config`].
//!
//! Runs over the non-trivial tokens only (comments and inter-token spacing
//! are dropped before parsing begins); every error carries the 1-based line
//! of the token that triggered it.

use std::path::PathBuf;

use flux_core::{Block, Config, DaemonSpec, Pattern, PrepSpec, Signal, VariableError};

use crate::env;
use crate::error::{ConfigError, LexMessage};
use crate::ignores::COMMON_EXCLUDES;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Parse `input` (the contents of `file`), expanding `$VAR`/`${VAR}`
/// references in prep/daemon command strings against the process
/// environment.
pub fn parse_str(input: &str, file: &str) -> Result<Config, ConfigError> {
    parse_with(input, file, |name| std::env::var(name).ok())
}

/// As [`parse_str`], but with an injectable environment lookup (used by
/// tests to avoid depending on the real process environment).
pub fn parse_with(
    input: &str,
    file: &str,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    parse_with_options(input, file, env_lookup, true)
}

/// As [`parse_with`], but lets the caller turn off common-excludes
/// injection entirely. The CLI always passes `true` here - per-block
/// opt-out is `+noignore`, not a global flag.
pub fn parse_with_options(
    input: &str,
    file: &str,
    env_lookup: impl Fn(&str) -> Option<String>,
    inject_common_excludes: bool,
) -> Result<Config, ConfigError> {
    let raw_tokens = Lexer::tokenize(input);
    let tokens: Vec<Token> = raw_tokens
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Space | TokenKind::Comment(_)))
        .collect();

    let mut parser = Parser { tokens, pos: 0, file, env_lookup };
    let mut config = Config::new();
    parser.parse_top(&mut config)?;
    if inject_common_excludes {
        apply_common_excludes(&mut config)?;
    }
    Ok(config)
}

fn apply_common_excludes(config: &mut Config) -> Result<(), ConfigError> {
    let mut common = Vec::with_capacity(COMMON_EXCLUDES.len());
    for raw in COMMON_EXCLUDES {
        let pattern = Pattern::parse(raw)
            .map_err(|e| ConfigError::new("<built-in>", 0, e.to_string()))?;
        common.push(pattern);
    }
    for block in &mut config.blocks {
        if !block.no_common_filter {
            block.exclude.extend(common.iter().cloned());
        }
    }
    Ok(())
}

struct Parser<'a, F> {
    tokens: Vec<Token>,
    pos: usize,
    file: &'a str,
    env_lookup: F,
}

impl<'a, F> Parser<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, line: usize, message: impl std::fmt::Display) -> ConfigError {
        ConfigError::new(self.file.to_string(), line, message.to_string())
    }

    fn err_at(&self, tok: &Token, message: impl std::fmt::Display) -> ConfigError {
        self.err(tok.span.line, message)
    }

    fn parse_top(&mut self, config: &mut Config) -> Result<(), ConfigError> {
        loop {
            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Error(msg) => return Err(self.err_at(&tok, msg)),
                TokenKind::VarName(name) => {
                    self.advance();
                    self.parse_variable(config, &tok, &name)?;
                }
                _ => self.parse_block(config)?,
            }
        }
    }

    fn parse_variable(
        &mut self,
        config: &mut Config,
        name_tok: &Token,
        name: &str,
    ) -> Result<(), ConfigError> {
        let eq = self.advance();
        if !matches!(eq.kind, TokenKind::Equals) {
            return Err(self.err_at(&eq, LexMessage::UnterminatedVariableAssignment));
        }
        let value_tok = self.advance();
        let value = match &value_tok.kind {
            TokenKind::BareString(s) | TokenKind::QuotedString(s) => s.clone(),
            TokenKind::Error(msg) => return Err(self.err_at(&value_tok, msg)),
            _ => return Err(self.err_at(&value_tok, LexMessage::EqualsMustBeFollowedByString)),
        };
        let bare_name = name.trim_start_matches('@');
        config
            .variables
            .declare(bare_name, &value)
            .map_err(|e| self.variable_error(name_tok, bare_name, e))?;
        Ok(())
    }

    fn variable_error(&self, tok: &Token, name: &str, err: VariableError) -> ConfigError {
        match err {
            VariableError::Redeclared(_) => {
                self.err_at(tok, LexMessage::DuplicateVariable(name.to_string()))
            }
            VariableError::InvalidName(_) => self.err_at(tok, LexMessage::InvalidInput),
        }
    }

    fn parse_block(&mut self, config: &mut Config) -> Result<(), ConfigError> {
        let mut block = Block::default();
        loop {
            let tok = self.peek().clone();
            match &tok.kind {
                TokenKind::LeftBrace => {
                    self.advance();
                    break;
                }
                TokenKind::BareString(s) | TokenKind::QuotedString(s) => {
                    self.advance();
                    if s == "+noignore" {
                        block.no_common_filter = true;
                        continue;
                    }
                    let pattern = Pattern::parse(s).map_err(|e| self.err_at(&tok, e))?;
                    if pattern.is_exclude() {
                        block.exclude.push(pattern);
                    } else {
                        block.include.push(pattern);
                    }
                }
                TokenKind::Error(msg) => return Err(self.err_at(&tok, msg.clone())),
                _ => return Err(self.err_at(&tok, LexMessage::InvalidInput)),
            }
        }
        self.parse_block_body(&mut block)?;
        config.blocks.push(block);
        Ok(())
    }

    fn parse_block_body(&mut self, block: &mut Block) -> Result<(), ConfigError> {
        loop {
            let tok = self.peek().clone();
            match tok.kind {
                TokenKind::RightBrace => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::Eof | TokenKind::Error(_) => {
                    return Err(self.err_at(&tok, LexMessage::UnterminatedBlock))
                }
                TokenKind::InDir => {
                    self.advance();
                    self.reject_options(&tok)?;
                    let value = self.expect_command_value()?;
                    if block.in_dir.is_some() {
                        return Err(self.err_at(&tok, LexMessage::DuplicateIndir));
                    }
                    block.in_dir = Some(PathBuf::from(value));
                }
                TokenKind::Prep => {
                    self.advance();
                    let onchange = self.parse_prep_options(&tok)?;
                    let value = self.expect_command_value()?;
                    if value.is_empty() {
                        return Err(self.err_at(&tok, LexMessage::EmptyCommandSpecification));
                    }
                    let command = env::expand(&value, |name| (self.env_lookup)(name));
                    block.preps.push(PrepSpec { command, onchange });
                }
                TokenKind::Daemon => {
                    self.advance();
                    let (restart_signal, pipe_restart_signal) = self.parse_daemon_options(&tok)?;
                    let value = self.expect_command_value()?;
                    if value.is_empty() {
                        return Err(self.err_at(&tok, LexMessage::EmptyCommandSpecification));
                    }
                    let command = env::expand(&value, |name| (self.env_lookup)(name));
                    block.daemons.push(DaemonSpec { command, restart_signal, pipe_restart_signal });
                }
                _ => return Err(self.err_at(&tok, LexMessage::InvalidInput)),
            }
        }
    }

    fn reject_options(&mut self, directive: &Token) -> Result<(), ConfigError> {
        if let TokenKind::BareString(s) = self.peek().kind.clone() {
            if s.starts_with('+') {
                let bad = self.advance();
                return Err(self.err_at(&bad, LexMessage::InvalidCommandOption));
            }
        }
        let colon = self.advance();
        if !matches!(colon.kind, TokenKind::Colon) {
            return Err(self.err_at(directive, LexMessage::InvalidInput));
        }
        Ok(())
    }

    fn parse_prep_options(&mut self, directive: &Token) -> Result<bool, ConfigError> {
        let mut onchange = false;
        loop {
            match self.peek().kind.clone() {
                TokenKind::Colon => {
                    self.advance();
                    return Ok(onchange);
                }
                TokenKind::BareString(s) if s.starts_with('+') => {
                    let tok = self.advance();
                    match s.as_str() {
                        "+onchange" => onchange = true,
                        _ => return Err(self.err_at(&tok, LexMessage::InvalidCommandOption)),
                    }
                }
                _ => return Err(self.err_at(directive, LexMessage::InvalidInput)),
            }
        }
    }

    fn parse_daemon_options(&mut self, directive: &Token) -> Result<(Signal, bool), ConfigError> {
        let mut signal = Signal::Term;
        let mut pipe = false;
        loop {
            match self.peek().kind.clone() {
                TokenKind::Colon => {
                    self.advance();
                    return Ok((signal, pipe));
                }
                TokenKind::BareString(s) if s.starts_with('+') => {
                    let tok = self.advance();
                    let option = s.trim_start_matches('+');
                    if option == "pipe" {
                        pipe = true;
                    } else if let Some(sig) = Signal::from_option(option) {
                        signal = sig;
                    } else {
                        return Err(self.err_at(&tok, LexMessage::InvalidCommandOption));
                    }
                }
                _ => return Err(self.err_at(directive, LexMessage::InvalidInput)),
            }
        }
    }

    fn expect_command_value(&mut self) -> Result<String, ConfigError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::BareString(s) | TokenKind::QuotedString(s) => Ok(s.trim().to_string()),
            TokenKind::Error(msg) => Err(self.err_at(&tok, msg)),
            _ => Err(self.err_at(&tok, LexMessage::InvalidInput)),
        }
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
