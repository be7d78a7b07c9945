//! Inmanta language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings and
//! metadata via registry tables instead of comparing strings across the front end.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use
//!   (diagnostics, docs, highlighting).
//!
//! ## Examples
//! ```rust
//! use inmanta_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("entity"), Some(KeywordId::Entity));
//! assert_eq!(keywords::as_str(KeywordId::Entity), "entity");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
