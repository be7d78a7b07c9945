//! Canonical language vocabulary for the Inmanta configuration language.
//!
//! This crate is intentionally small and dependency-free. It holds the registries the lexer and
//! parser share with diagnostics and tooling, so spellings live in exactly one place.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no AST types.

pub mod lang;
