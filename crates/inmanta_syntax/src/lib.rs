//! Syntax front end for the Inmanta configuration language: lexer, parser, AST, diagnostics.
//!
//! ## Notes
//! - This crate is "syntax-only": qualified names stay opaque strings; it does no name resolution,
//!   type checking or evaluation.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `inmanta_core::lang` registries.
//! - A source unit either parses completely or fails with a single [`diagnostics::CompileError`].
//!
//! ## Examples
//! ```rust
//! use inmanta_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("entity Test:\nend\n").unwrap();
//! let module = parser::parse(&tokens, &parser::ParseOptions::default()).unwrap();
//! assert_eq!(module.statements.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod interpolation;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
