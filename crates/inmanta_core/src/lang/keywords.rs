//! Define the reserved keyword vocabulary for the Inmanta language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const table ([`KEYWORDS`]) that records the canonical spellings.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**. Every reserved word is lowercase, so a
//!   capitalised spelling such as `Entity` is never a keyword (it lexes as a type identifier).
//! - Some reserved words are also “word operators” (e.g. `and`). If you need operator
//!   precedence/associativity, use [`crate::lang::operators`].
//!
//! ## Examples
//! ```rust
//! use inmanta_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("typedef"), Some(KeywordId::Typedef));
//! assert_eq!(keywords::from_str("Typedef"), None);
//! assert_eq!(keywords::as_str(KeywordId::Matching), "matching");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Definitions
    Entity,
    Extends,
    Typedef,
    As,
    Matching,
    Implementation,
    Implement,
    Using,
    When,
    Index,
    Import,
    End,

    // Statements
    For,
    In,

    // Literals
    True,
    False,

    // Word operators
    And,
    Or,
    Not,
    Is,
    Defined,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Definitions
    info(KeywordId::Entity, "entity"),
    info(KeywordId::Extends, "extends"),
    info(KeywordId::Typedef, "typedef"),
    info(KeywordId::As, "as"),
    info(KeywordId::Matching, "matching"),
    info(KeywordId::Implementation, "implementation"),
    info(KeywordId::Implement, "implement"),
    info(KeywordId::Using, "using"),
    info(KeywordId::When, "when"),
    info(KeywordId::Index, "index"),
    info(KeywordId::Import, "import"),
    info(KeywordId::End, "end"),
    // Statements
    info(KeywordId::For, "for"),
    info(KeywordId::In, "in"),
    // Literals
    info(KeywordId::True, "true"),
    info(KeywordId::False, "false"),
    // Word operators
    info(KeywordId::And, "and"),
    info(KeywordId::Or, "or"),
    info(KeywordId::Not, "not"),
    info(KeywordId::Is, "is"),
    info(KeywordId::Defined, "defined"),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` if `s` is a reserved word.
pub fn is_reserved(s: &str) -> bool {
    from_str(s).is_some()
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str) -> KeywordInfo {
    KeywordInfo { id, canonical }
}
