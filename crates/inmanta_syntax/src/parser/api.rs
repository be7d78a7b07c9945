/// Parse a token stream into a [`Module`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `inmanta_syntax::lexer`.
/// - `options`: Implicit base type and namespace of the unit.
///
/// ## Errors
/// Returns the first [`CompileError`] if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token], options: &ParseOptions) -> Result<Module, CompileError> {
    Parser::new(tokens, options).parse()
}
