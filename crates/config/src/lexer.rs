// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hand-written state machine tokenizer for the config DSL.
//!
//! Three lexing contexts: [`Mode::Top`] (variables and block patterns),
//! [`Mode::Inside`] (directive keywords inside `{ }`), and [`Mode::Command`]
//! (option tags, then `:`, then the command/path value of a directive).

use crate::span::Span;
use crate::token::{Token, TokenKind};

const SPACES: &[char] = &[' ', '\t', '\n'];
const QUOTES: &[char] = &['\'', '"'];

fn is_space(c: char) -> bool {
    SPACES.contains(&c)
}

fn is_quote(c: char) -> bool {
    QUOTES.contains(&c)
}

/// Characters not permitted inside a bare (unquoted) string.
fn is_bare_disallowed(c: char) -> bool {
    matches!(c, '{' | '}' | '#' | '\n' | '\t' | ' ' | '\'' | '"' | ':')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Top,
    Inside,
    /// Reading option tags, then `:`, then the value, for the directive
    /// token just emitted.
    Command,
    /// Just emitted a `VarName`; expecting `=`.
    VarEquals,
    /// Just emitted `Equals`; expecting the assigned value.
    VarValue,
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    mode: Mode,
    done: bool,
    /// Within [`Mode::Command`], whether the `:` separating option tags
    /// from the command value has already been consumed.
    command_colon_seen: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
            mode: Mode::Top,
            done: false,
            command_colon_seen: false,
        }
    }

    /// Tokenize the whole input. Stops at the first [`TokenKind::Error`]
    /// without a trailing `Eof`, satisfying lexer totality: either a finite
    /// token stream ending in `Eof`, or one ending in `Error`.
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some(tok) = lexer.next_token() {
            let is_error = matches!(tok.kind, TokenKind::Error(_));
            let is_eof = matches!(tok.kind, TokenKind::Eof);
            tokens.push(tok);
            if is_error || is_eof {
                break;
            }
        }
        tokens
    }

    fn byte_pos(&self) -> usize {
        self.chars.get(self.pos).map(|(b, _)| *b).unwrap_or(self.input.len())
    }

    fn line_at(&self, byte_pos: usize) -> usize {
        crate::span::line_at(self.input, byte_pos)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| c).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|(_, c)| c).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        let start_byte = self.chars.get(start).map(|(b, _)| *b).unwrap_or(self.input.len());
        let end_byte = self.chars.get(end).map(|(b, _)| *b).unwrap_or(self.input.len());
        &self.input[start_byte..end_byte]
    }

    fn span(&self, start: usize) -> Span {
        let start_byte = self.chars.get(start).map(|(b, _)| *b).unwrap_or(self.input.len());
        let end_byte = self.byte_pos();
        Span::new(start_byte, end_byte, self.line_at(start_byte))
    }

    fn error(&mut self, start: usize, message: impl Into<String>) -> Token {
        self.done = true;
        Token::new(TokenKind::Error(message.into()), self.span(start))
    }

    /// Consume a run of whitespace.
    fn accept_spaces(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Consume a bare string run starting at the current position (which
    /// must already point at a non-disallowed character).
    fn accept_bare(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|c| !is_bare_disallowed(c)) {
            self.pos += 1;
        }
        start
    }

    /// Consume through the closing `quote`, unescaping `\<quote>` and
    /// leaving every other backslash sequence verbatim. `quote` has already
    /// been consumed.
    fn accept_quoted(&mut self, quote: char) -> Result<String, ()> {
        let mut out = String::new();
        loop {
            match self.advance() {
                None => return Err(()),
                Some('\\') => match self.advance() {
                    None => return Err(()),
                    Some(c) if c == quote => out.push(c),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    /// Consume the rest of a logical line: stops at the first unescaped
    /// `\n` (included in the result) or at EOF. `\<newline>` is preserved
    /// verbatim and does not terminate the scan.
    fn accept_logical_line(&mut self) -> String {
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return out,
                Some('\\') if self.peek_at(1) == Some('\n') => {
                    out.push('\\');
                    out.push('\n');
                    self.pos += 2;
                }
                Some('\n') => {
                    out.push('\n');
                    self.pos += 1;
                    return out;
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        match self.mode {
            Mode::Top => Some(self.lex_top()),
            Mode::Inside => Some(self.lex_inside()),
            Mode::Command => Some(self.lex_command()),
            Mode::VarEquals => Some(self.lex_var_equals()),
            Mode::VarValue => Some(self.lex_var_value()),
        }
    }

    fn lex_top(&mut self) -> Token {
        let start = self.pos;
        match self.advance() {
            None => {
                self.done = true;
                Token::new(TokenKind::Eof, self.span(start))
            }
            Some('#') => {
                self.pos = start;
                self.pos += 1;
                let text = self.accept_logical_line();
                Token::new(TokenKind::Comment(text), self.span(start))
            }
            Some(c) if is_quote(c) => match self.accept_quoted(c) {
                Ok(text) => Token::new(TokenKind::QuotedString(text), self.span(start)),
                Err(()) => self.error(start, "unterminated quoted string"),
            },
            Some('{') => {
                self.mode = Mode::Inside;
                Token::new(TokenKind::LeftBrace, self.span(start))
            }
            Some(c) if is_space(c) => {
                self.accept_spaces();
                Token::new(TokenKind::Space, self.span(start))
            }
            Some('!') => self.lex_bang(start),
            Some(c) if !is_bare_disallowed(c) => {
                self.pos = start;
                self.accept_bare();
                let word = self.slice(start, self.pos);
                if is_variable_name(word) {
                    self.lex_variable(start, word)
                } else {
                    Token::new(TokenKind::BareString(word.to_string()), self.span(start))
                }
            }
            Some(_) => self.error(start, "invalid input"),
        }
    }

    /// Handle a leading `!`: either a quoted string, a continued bare
    /// string, or (if nothing valid follows) an error.
    fn lex_bang(&mut self, start: usize) -> Token {
        match self.peek() {
            Some(c) if is_quote(c) => {
                self.pos += 1;
                match self.accept_quoted(c) {
                    Ok(text) => Token::new(TokenKind::QuotedString(format!("!{text}")), self.span(start)),
                    Err(()) => self.error(start, "unterminated quoted string"),
                }
            }
            Some(c) if !is_bare_disallowed(c) => {
                self.accept_bare();
                let word = self.slice(start, self.pos);
                Token::new(TokenKind::BareString(word.to_string()), self.span(start))
            }
            _ => self.error(start, "! must be followed by a string"),
        }
    }

    /// `word` is `@` followed by a valid identifier; this always commits to
    /// variable-assignment parsing (a bare `@name` with no value is itself
    /// an error, not a pattern). The `=` and the value are lexed as
    /// separate tokens by [`Self::lex_var_equals`] / [`Self::lex_var_value`].
    fn lex_variable(&mut self, start: usize, word: &str) -> Token {
        self.mode = Mode::VarEquals;
        Token::new(TokenKind::VarName(word.to_string()), self.span(start))
    }

    fn lex_var_equals(&mut self) -> Token {
        let start = self.pos;
        self.accept_spaces();
        match self.peek() {
            Some('=') => {
                self.pos += 1;
                self.mode = Mode::VarValue;
                Token::new(TokenKind::Equals, self.span(start))
            }
            _ => self.error(start, "unterminated variable assignment"),
        }
    }

    fn lex_var_value(&mut self) -> Token {
        let start = self.pos;
        self.accept_spaces();
        match self.peek() {
            Some(c) if is_quote(c) => {
                self.pos += 1;
                match self.accept_quoted(c) {
                    Ok(text) => {
                        self.mode = Mode::Top;
                        Token::new(TokenKind::QuotedString(text), self.span(start))
                    }
                    Err(()) => self.error(start, "unterminated quoted string"),
                }
            }
            Some(c) if !is_bare_disallowed(c) => {
                self.accept_bare();
                let word = self.slice(start, self.pos).to_string();
                self.mode = Mode::Top;
                Token::new(TokenKind::BareString(word), self.span(start))
            }
            _ => self.error(start, "= must be followed by a string"),
        }
    }

    fn lex_inside(&mut self) -> Token {
        let start = self.pos;
        match self.advance() {
            None => self.error(start, "unterminated block"),
            Some('#') => {
                self.pos = start + 1;
                let text = self.accept_logical_line();
                Token::new(TokenKind::Comment(text), self.span(start))
            }
            Some('}') => {
                self.mode = Mode::Top;
                Token::new(TokenKind::RightBrace, self.span(start))
            }
            Some('{') => self.error(start, "unterminated block"),
            Some(c) if is_space(c) => {
                self.accept_spaces();
                Token::new(TokenKind::Space, self.span(start))
            }
            Some(c) if !is_bare_disallowed(c) => {
                self.pos = start;
                self.accept_bare();
                let word = self.slice(start, self.pos);
                match word {
                    "daemon" => {
                        self.mode = Mode::Command;
                        self.command_colon_seen = false;
                        Token::new(TokenKind::Daemon, self.span(start))
                    }
                    "prep" => {
                        self.mode = Mode::Command;
                        self.command_colon_seen = false;
                        Token::new(TokenKind::Prep, self.span(start))
                    }
                    "indir" => {
                        self.mode = Mode::Command;
                        self.command_colon_seen = false;
                        Token::new(TokenKind::InDir, self.span(start))
                    }
                    other => self.error(start, format!("unknown directive: {other}")),
                }
            }
            Some(_) => self.error(start, "invalid input"),
        }
    }

    /// Before the `:`: option tags (`+foo`) and whitespace. After the `:`:
    /// a single value token, either a quoted string (may span newlines) or
    /// the rest of the logical line (`\<newline>` continuations preserved
    /// verbatim, trimming left to the parser).
    fn lex_command(&mut self) -> Token {
        if !self.command_colon_seen {
            let start = self.pos;
            match self.advance() {
                None => self.error(start, "unterminated block"),
                Some(c) if is_space(c) => {
                    self.accept_spaces();
                    Token::new(TokenKind::Space, self.span(start))
                }
                Some(':') => {
                    self.command_colon_seen = true;
                    Token::new(TokenKind::Colon, self.span(start))
                }
                Some(c) if !is_bare_disallowed(c) => {
                    self.pos = start;
                    self.accept_bare();
                    let word = self.slice(start, self.pos).to_string();
                    if word.starts_with('+') {
                        Token::new(TokenKind::BareString(word), self.span(start))
                    } else {
                        self.error(start, "invalid command option")
                    }
                }
                Some(_) => self.error(start, "invalid input"),
            }
        } else {
            let start = self.pos;
            match self.peek() {
                None => self.error(start, "unterminated block"),
                Some(c) if is_space(c) && c != '\n' => {
                    self.accept_spaces();
                    Token::new(TokenKind::Space, self.span(start))
                }
                Some(c) if is_quote(c) => {
                    self.pos += 1;
                    match self.accept_quoted(c) {
                        Ok(text) => {
                            self.mode = Mode::Inside;
                            self.command_colon_seen = false;
                            Token::new(TokenKind::QuotedString(text), self.span(start))
                        }
                        Err(()) => self.error(start, "unterminated quoted string"),
                    }
                }
                Some(_) => {
                    let line = self.accept_logical_line();
                    self.mode = Mode::Inside;
                    self.command_colon_seen = false;
                    Token::new(TokenKind::BareString(line), self.span(start))
                }
            }
        }
    }
}

/// `@[a-zA-Z_][a-zA-Z_0-9]*`, `word` includes the leading `@`.
fn is_variable_name(word: &str) -> bool {
    let Some(rest) = word.strip_prefix('@') else { return false };
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
