/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, the [`ParseOptions`] it reads, and its top-level
/// `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Parent given to an entity declared without `extends`.
pub const DEFAULT_BASE_TYPE: &str = "std::Entity";

/// Namespace that defines the base type itself; its `Entity` gets no implicit parent.
pub const BASE_TYPE_NAMESPACE: &str = "std";

/// Knobs that complete declarations the source leaves implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parent assigned to entities without `extends`.
    pub implicit_base_type: QualifiedName,
    /// Full name of the namespace the unit is compiled into (`std`, `mymodule::sub`).
    pub namespace: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            implicit_base_type: DEFAULT_BASE_TYPE.to_string(),
            namespace: String::new(),
        }
    }
}

/// Qualified name as read from the token stream.
struct NameRef {
    text: QualifiedName,
    /// The last segment is a type identifier (`CID`).
    is_type: bool,
    span: Span,
}

/// Returned by `peek()` past the end of a token stream that lacks its `Eof`.
static END_OF_INPUT: Token = Token {
    kind: TokenKind::Eof,
    span: Span {
        start: 0,
        end: 0,
        position: Position { line: 0, column: 0 },
    },
};

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and does not recover: the first error is returned as-is.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `inmanta_syntax::lexer`, ending in `Eof`.
    /// - `options`: How implicit parts of declarations are filled in.
    pub fn new(tokens: &'a [Token], options: &'a ParseOptions) -> Self {
        Self { tokens, pos: 0, options }
    }

    /// Parse the entire token stream into a [`Module`].
    ///
    /// ## Errors
    /// Returns the first [`CompileError`] encountered; no partial module is produced.
    pub fn parse(mut self) -> Result<Module, CompileError> {
        let doc = self.doc_string();
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.top_level_statement()?);
        }

        Ok(Module { doc, statements })
    }
}
