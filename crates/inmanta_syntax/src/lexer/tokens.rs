//! Token types for the Inmanta lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (word operators like `and` included)
//! - `Operator(OperatorId)` for the symbolic comparisons
//! - `Punctuation(PunctuationId)` for delimiters, separators, `::` and the relation arrows
//!
//! ## Notes
//! - Identifier case is decided here, once: `Ident` starts lowercase (or `_`), `TypeIdent` starts
//!   uppercase. The parser never re-inspects spellings to tell them apart.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::{RegexPattern, Span};
use inmanta_core::lang::keywords::{self, KeywordId};
use inmanta_core::lang::operators::OperatorId;
use inmanta_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers ==========
    Ident(String),
    /// Identifier starting with an uppercase letter (`CID`).
    TypeIdent(String),

    // ========== Literals ==========
    Int(i64),
    Float(f64),
    /// Escape-decoded single-line string.
    String(String),
    /// Verbatim `"""..."""` body.
    MultiLineString(String),
    /// `/pattern/`, compiled while scanning.
    Regex(RegexPattern),

    // ========== Special ==========
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}

/// Classify an identifier spelling that is not reserved.
pub fn identifier(spelling: &str) -> TokenKind {
    if spelling.starts_with(|c: char| c.is_ascii_uppercase()) {
        TokenKind::TypeIdent(spelling.to_string())
    } else {
        TokenKind::Ident(spelling.to_string())
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use inmanta_core::lang::{operators, punctuation};
        match self {
            TokenKind::Keyword(id) => write!(f, "`{}`", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "`{}`", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "`{}`", punctuation::as_str(*id)),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::TypeIdent(name) => write!(f, "type name `{name}`"),
            TokenKind::Int(n) => write!(f, "integer `{n}`"),
            TokenKind::Float(x) => write!(f, "float `{x:?}`"),
            TokenKind::String(s) => write!(f, "string {s:?}"),
            TokenKind::MultiLineString(_) => write!(f, "multi-line string"),
            TokenKind::Regex(pattern) => write!(f, "regex {pattern:?}"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
