//! Lexer for the Inmanta configuration language
//!
//! Handles tokenization including:
//! - Keywords, identifiers and type identifiers (`CID`, decided by the case of the first letter)
//! - Integer, float, string and multi-line string literals
//! - Regex literals (`/pattern/`), compiled while scanning
//! - Comparison operators, relation arrows and punctuation (`::`, `--`, `->`, `<-`, ...)
//! - `#` and `//` line comments
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - Quoted string scanning and escape decoding
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::{Position, RegexPattern, Span};
use crate::diagnostics::{self, CompileError, DEFAULT_FRAGMENT_LIMIT};
use inmanta_core::lang::operators::{self, OperatorId};
use inmanta_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// The scanner has two modes:
//
// [Normal] --- `"""` ---> [InMultilineString] --- `"""` ---> [Normal]
//
// After the Eof token or the first error it parks in the terminal `Done`
// state, where iteration yields `None`. `Done` never scans input.
//
// Line and column bookkeeping happens in `advance`, so every mode counts the
// newlines it consumes.
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    /// Inside `"""`; `start`/`position` locate the opening delimiter.
    InMultilineString { start: usize, position: Position },
    /// Terminal state: Eof or an error has been yielded.
    Done,
}

/// Outcome of one scanning step.
enum Step {
    /// Trivia (whitespace, newline, comment) or a mode switch; scan again.
    Skip,
    Emit(Token),
}

/// Lazy lexer for Inmanta source code.
///
/// Iterating yields tokens in source order, ending with a single `Eof` token. The first lexical
/// error is yielded as `Err` and ends the iteration: the lexer does not resynchronise.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// 1-based line of `current_pos`.
    line: usize,
    /// Byte offset where the current line starts.
    line_start: usize,
    mode: Mode,
    fragment_limit: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            line_start: 0,
            mode: Mode::Normal,
            fragment_limit: DEFAULT_FRAGMENT_LIMIT,
        }
    }

    /// Limit how many characters of unmatched input a lexical error keeps.
    pub fn with_fragment_limit(mut self, limit: usize) -> Self {
        self.fragment_limit = limit;
        self
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(self) -> Result<Vec<Token>, CompileError> {
        self.collect()
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.current_pos;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    /// Line/column of `current_pos`. Column counts characters, not bytes.
    fn cursor_position(&self) -> Position {
        let column = self.source[self.line_start..self.current_pos].chars().count();
        Position::new(self.line, column)
    }

    fn span_from(&self, start: usize, position: Position) -> Span {
        Span::new(start, self.current_pos, position)
    }

    fn error(&self, message: impl Into<String>, start: usize, position: Position) -> CompileError {
        let fragment = diagnostics::fragment(&self.source[start..], self.fragment_limit);
        CompileError::lex(message, self.span_from(start, position), fragment)
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_normal(&mut self) -> Result<Step, CompileError> {
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.advance();
        }

        let start = self.current_pos;
        let position = self.cursor_position();

        let Some(c) = self.advance() else {
            return Ok(Step::Emit(Token::new(TokenKind::Eof, self.span_from(start, position))));
        };

        let kind = match c {
            '\n' => return Ok(Step::Skip),

            // Comments
            '#' => {
                self.skip_line();
                return Ok(Step::Skip);
            }
            '/' if self.peek() == Some('/') => {
                self.skip_line();
                return Ok(Step::Skip);
            }

            // Regex literal
            '/' => self.scan_regex(start, position)?,

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            ':' => {
                if self.match_char(':') {
                    TokenKind::Punctuation(PunctuationId::ColonColon)
                } else {
                    TokenKind::Punctuation(PunctuationId::Colon)
                }
            }

            '-' => {
                if self.match_char('-') {
                    TokenKind::Punctuation(PunctuationId::DashDash)
                } else if self.match_char('>') {
                    TokenKind::Punctuation(PunctuationId::Arrow)
                } else if starts_number(self.peek(), self.peek_next()) {
                    self.scan_number(start, position, false)?
                } else {
                    return Err(self.error("unexpected character '-'", start, position));
                }
            }

            // `<-` is matched before the comparisons, so `a<-1` reads as an arrow.
            '<' if self.match_char('-') => TokenKind::Punctuation(PunctuationId::LeftArrow),
            '<' | '>' | '!' | '=' => match self.scan_comparison(start) {
                Some(id) => TokenKind::Operator(id),
                None if c == '=' => TokenKind::Punctuation(PunctuationId::Eq),
                None => return Err(self.error(format!("unexpected character {c:?}"), start, position)),
            },

            // Strings
            '"' => {
                if self.rest().starts_with("\"\"") {
                    self.advance();
                    self.advance();
                    self.mode = Mode::InMultilineString { start, position };
                    return Ok(Step::Skip);
                }
                if self.match_char('"') {
                    TokenKind::String(String::new())
                } else {
                    self.scan_string(start, position)?
                }
            }

            // Numbers
            '0'..='9' => self.scan_number(start, position, false)?,
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.scan_number(start, position, true)?,

            _ => match punctuation::from_char(c) {
                Some(id) => TokenKind::Punctuation(id),
                None => return Err(self.error(format!("unexpected character {c:?}"), start, position)),
            },
        };

        Ok(Step::Emit(Token::new(kind, self.span_from(start, position))))
    }

    /// Consume the body of a multi-line string; the opening `"""` is already consumed.
    fn scan_multiline_body(&mut self, start: usize, position: Position) -> Result<Step, CompileError> {
        let body_start = self.current_pos;
        loop {
            if self.rest().starts_with("\"\"\"") {
                let text = self.source[body_start..self.current_pos].to_string();
                for _ in 0..3 {
                    self.advance();
                }
                self.mode = Mode::Normal;
                let span = self.span_from(start, position);
                return Ok(Step::Emit(Token::new(TokenKind::MultiLineString(text), span)));
            }
            if self.advance().is_none() {
                return Err(self.error("unterminated multi-line string", start, position));
            }
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Match the longest comparison spelling at `start`; the first character is already consumed.
    fn scan_comparison(&mut self, start: usize) -> Option<OperatorId> {
        let rest = &self.source[start..];
        let (spelling, id) = operators::comparison_spellings().find(|(s, _)| rest.starts_with(s))?;
        for _ in 1..spelling.len() {
            self.advance();
        }
        Some(id)
    }

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        let spelling = &self.source[start..self.current_pos];
        match keyword_id(spelling) {
            Some(id) => TokenKind::Keyword(id),
            None => tokens::identifier(spelling),
        }
    }

    /// Scan `/pattern/`; the opening slash is already consumed. The pattern may span lines.
    fn scan_regex(&mut self, start: usize, position: Position) -> Result<TokenKind, CompileError> {
        let body_start = self.current_pos;
        loop {
            match self.advance() {
                Some('/') => break,
                Some(_) => {}
                None => return Err(self.error("unterminated regex literal", start, position)),
            }
        }
        let pattern = &self.source[body_start..self.current_pos - 1];
        RegexPattern::new(pattern)
            .map(TokenKind::Regex)
            .map_err(|e| self.error(format!("invalid regex /{pattern}/: {e}"), start, position))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match self.mode {
                Mode::Done => return None,
                Mode::Normal => self.scan_normal(),
                Mode::InMultilineString { start, position } => self.scan_multiline_body(start, position),
            };
            match step {
                Ok(Step::Skip) => continue,
                Ok(Step::Emit(token)) => {
                    if token.kind == TokenKind::Eof {
                        self.mode = Mode::Done;
                    }
                    return Some(Ok(token));
                }
                Err(err) => {
                    self.mode = Mode::Done;
                    return Some(Err(err));
                }
            }
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier. Dashes are allowed (`my-module`).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// `-` starts a number when followed by a digit or by `.digit`.
fn starts_number(next: Option<char>, after: Option<char>) -> bool {
    match next {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => after.is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
