#![forbid(unsafe_code)]
//! Inmanta configuration language front end
//!
//! Compiles one source unit at a time into an ordered list of AST statements. The heavy lifting
//! lives in the workspace crates: `inmanta_core` holds the language vocabulary and
//! `inmanta_syntax` the lexer, parser and AST. This crate ties them to a [`Namespace`] and a
//! [`FrontendConfig`] and reports failures as a renderable [`CompileUnitError`].
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **Registry lookups**: `inmanta_core` panics with "... info missing" only when a vocabulary
//!   table lacks an entry for one of its own IDs, which is a bug in the table.
//!
//! ## Examples
//! ```rust
//! use inmanta::{Namespace, compile_unit};
//! use inmanta::ast::Statement;
//!
//! let ns = Namespace::from_path("mymodule");
//! let statements = compile_unit(&ns, "main.cf", "entity Host:\n string name\nend\n").unwrap();
//! assert!(matches!(statements[0].node, Statement::Entity(_)));
//! ```

pub mod compile;
pub mod config;
pub mod namespace;

pub use inmanta_core::lang;
pub use inmanta_syntax::{ast, diagnostics, interpolation, lexer, parser};

pub use compile::{CompileUnitError, compile_module, compile_unit, compile_unit_with_config};
pub use config::FrontendConfig;
pub use namespace::Namespace;
