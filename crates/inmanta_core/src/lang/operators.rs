//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol comparisons like `<=` and word operators
//! like `and`) along with the precedence and associativity the parser climbs by.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Word operators (`and`, `or`, `not`, `in`, `is defined`) are lexed as keywords; their entries
//!   here have [`OperatorInfo::is_keyword_spelling`] set to `true`.
//! - Comparisons are non-associative: the parser rejects `a < b < c`.
//!
//! ## Examples
//! ```rust
//! use inmanta_core::lang::operators::{self, Associativity, OperatorId};
//!
//! assert_eq!(operators::from_str("<="), Some(OperatorId::LtEq));
//! assert_eq!(operators::info_for(OperatorId::LtEq).associativity, Associativity::None);
//! assert!(operators::info_for(OperatorId::And).precedence > operators::info_for(OperatorId::Or).precedence);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Word operators
    And,
    Or,
    Not,
    In,
    IsDefined,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is a relative ordering where higher binds tighter.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spellings: &'static [&'static str],
    pub precedence: u8,
    pub associativity: Associativity,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Comparison (longest spellings are matched first by the lexer)
    op(OperatorId::EqEq, &["=="], 40, Associativity::None, false),
    op(OperatorId::NotEq, &["!="], 40, Associativity::None, false),
    op(OperatorId::LtEq, &["<="], 40, Associativity::None, false),
    op(OperatorId::GtEq, &[">="], 40, Associativity::None, false),
    op(OperatorId::Lt, &["<"], 40, Associativity::None, false),
    op(OperatorId::Gt, &[">"], 40, Associativity::None, false),
    // Word operators
    op(OperatorId::Or, &["or"], 10, Associativity::Left, true),
    op(OperatorId::And, &["and"], 20, Associativity::Left, true),
    op(OperatorId::Not, &["not"], 30, Associativity::Right, true),
    op(OperatorId::In, &["in"], 40, Associativity::None, true),
    op(OperatorId::IsDefined, &["is defined"], 50, Associativity::None, true),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Return the canonical (first) spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spellings[0]
}

/// Resolve an operator spelling to its identifier.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&spelling)
        })
        .map(|o| o.id)
}

/// Return `true` for the six symbolic comparison operators.
pub fn is_comparison(id: OperatorId) -> bool {
    matches!(
        id,
        OperatorId::EqEq | OperatorId::NotEq | OperatorId::Lt | OperatorId::LtEq | OperatorId::Gt | OperatorId::GtEq
    )
}

/// Symbolic comparison spellings, longest first.
///
/// The lexer walks this list in order so that `<=` is never split into `<` `=`.
pub fn comparison_spellings() -> impl Iterator<Item = (&'static str, OperatorId)> {
    OPERATORS
        .iter()
        .filter(|o| !o.is_keyword_spelling)
        .flat_map(|o| o.spellings.iter().map(move |s| (*s, o.id)))
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spellings: &'static [&'static str],
    precedence: u8,
    associativity: Associativity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spellings,
        precedence,
        associativity,
        is_keyword_spelling,
    }
}
