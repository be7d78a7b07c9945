//! Parser for the Inmanta configuration language
//!
//! Converts a token stream into a [`Module`]: an optional doc string plus the unit's statements in
//! source order. Parsing is single-pass and deterministic; the first grammar violation aborts the
//! whole unit with one [`CompileError`].
//!
//! ## Examples
//!
//! ```rust
//! use inmanta_syntax::ast::Statement;
//! use inmanta_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("implement Host using std::none\n").unwrap();
//! let module = parser::parse(&tokens, &parser::ParseOptions::default()).unwrap();
//! assert!(matches!(module.statements[0].node, Statement::Implement(_)));
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::interpolation;
use crate::lexer::{Token, TokenKind};
use inmanta_core::lang::keywords::KeywordId;
use inmanta_core::lang::operators::{self, Associativity, OperatorId};
use inmanta_core::lang::punctuation::{self, PunctuationId};
use inmanta_core::lang::registry::Stability;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
