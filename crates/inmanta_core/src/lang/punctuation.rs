//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the
//! lexer/parser: delimiters, separators, the scope separator and the relation arrows.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//!
//! ## Examples
//! ```rust
//! use inmanta_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("::"), Some(PunctuationId::ColonColon));
//! assert_eq!(punctuation::as_str(PunctuationId::DashDash), "--");
//! ```

use super::registry::Stability;

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and parentheses.
    Delimiter,
    /// Separators like `,`, `:` and `=`.
    Separator,
    /// Access/path markers like `.` and `::`.
    Access,
    /// Relation arrows `--`, `->`, `<-`.
    Relation,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Colon,
    Eq,

    // Access / path
    Dot,
    ColonColon,

    // Relation arrows
    DashDash,
    Arrow,
    LeftArrow,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    pub stability: Stability,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Separators
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator, Stability::Stable),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator, Stability::Stable),
    info(PunctuationId::Eq, "=", PunctuationCategory::Separator, Stability::Stable),
    // Access / path
    info(PunctuationId::Dot, ".", PunctuationCategory::Access, Stability::Stable),
    info(PunctuationId::ColonColon, "::", PunctuationCategory::Access, Stability::Stable),
    // Relation arrows; the directed forms predate `--` and are kept for old models.
    info(PunctuationId::DashDash, "--", PunctuationCategory::Relation, Stability::Stable),
    info(PunctuationId::Arrow, "->", PunctuationCategory::Relation, Stability::Deprecated),
    info(PunctuationId::LeftArrow, "<-", PunctuationCategory::Relation, Stability::Deprecated),
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter, Stability::Stable),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter, Stability::Stable),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter, Stability::Stable),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter, Stability::Stable),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Resolve a single-character punctuation token.
pub fn from_char(c: char) -> Option<PunctuationId> {
    PUNCTUATION
        .iter()
        .find(|p| {
            let mut chars = p.canonical.chars();
            chars.next() == Some(c) && chars.next().is_none()
        })
        .map(|p| p.id)
}

const fn info(
    id: PunctuationId,
    canonical: &'static str,
    category: PunctuationCategory,
    stability: Stability,
) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        stability,
    }
}
