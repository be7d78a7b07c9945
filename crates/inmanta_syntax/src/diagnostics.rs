//! Diagnostics for the Inmanta syntax front end
//!
//! A compile unit fails with exactly one [`CompileError`]: the lexer and parser do not recover.

use miette::{Diagnostic, LabeledSpan, Severity};
use thiserror::Error;

use crate::ast::{Position, Span};

/// Maximum number of characters of unmatched input kept in a lexical error.
pub const DEFAULT_FRAGMENT_LIMIT: usize = 10;

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {pos}: {message}", pos = .span.position)]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    /// Offending source text; only set for lexical errors.
    pub fragment: Option<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    /// No token rule matches at `span`; `fragment` is the unmatched remainder, already truncated.
    pub fn lex(message: impl Into<String>, span: Span, fragment: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Lex,
            fragment: Some(fragment.into()),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Syntax,
            fragment: None,
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn position(&self) -> Position {
        self.span.position
    }

    pub fn line(&self) -> usize {
        self.span.line()
    }

    pub fn column(&self) -> usize {
        self.span.column()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No token rule matches the input.
    Lex,
    /// The token stream matches no grammar production.
    Syntax,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

impl Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.kind {
            ErrorKind::Lex => "inmanta::lex",
            ErrorKind::Syntax => "inmanta::syntax",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        if self.hints.is_empty() {
            None
        } else {
            Some(Box::new(self.hints.join("\n")))
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = match &self.fragment {
            Some(fragment) => format!("unexpected `{fragment}`"),
            None => self.message.clone(),
        };
        let len = self.span.len().max(1);
        Some(Box::new(std::iter::once(LabeledSpan::new(
            Some(label),
            self.span.start,
            len,
        ))))
    }
}

/// Truncate `text` to at most `limit` characters (not bytes).
pub fn fragment(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
