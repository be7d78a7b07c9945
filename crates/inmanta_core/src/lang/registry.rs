//! Shareable metadata for `inmanta_core::lang` registries.
//!
//! These types are lightweight and `Copy` so registries can live in `const` tables. Enforcement of
//! syntax rules lives in the lexer/parser.

/// Lifecycle status of a language vocabulary item.
///
/// The parser warns when source uses a deprecated spelling; it never gates parsing by itself.
///
/// ## Examples
/// ```rust
/// use inmanta_core::lang::punctuation::{self, PunctuationId};
/// use inmanta_core::lang::registry::Stability;
///
/// assert_eq!(punctuation::info_for(PunctuationId::Arrow).stability, Stability::Deprecated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Deprecated,
}
