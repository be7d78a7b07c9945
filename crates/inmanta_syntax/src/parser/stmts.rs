/// Statement parsing methods.
///
/// This chunk dispatches on the first token of a statement and parses the forms that start with
/// a name: assignments, constructor/function-call statements and relations. It also parses
/// `end`-terminated blocks and `for` loops.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn top_level_statement(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.current_span();

        let stmt = match self.peek().kind {
            TokenKind::Keyword(KeywordId::Entity) => self.entity_def()?,
            TokenKind::Keyword(KeywordId::Implementation) => self.implementation_def()?,
            TokenKind::Keyword(KeywordId::Implement) => self.implement_def()?,
            TokenKind::Keyword(KeywordId::Typedef) => self.typedef()?,
            TokenKind::Keyword(KeywordId::Index) => self.index_def()?,
            TokenKind::Keyword(KeywordId::Import) => self.import_def()?,
            TokenKind::Keyword(KeywordId::For) => self.for_loop()?,
            TokenKind::Ident(_) | TokenKind::TypeIdent(_) => self.name_statement(true)?,
            _ => return Err(self.unexpected("expected a statement")),
        };

        Ok(Spanned::new(stmt, self.span_from(start)))
    }

    /// Statement inside an implementation or `for` body.
    fn block_statement(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.current_span();

        let stmt = match self.peek().kind {
            TokenKind::Keyword(KeywordId::For) => self.for_loop()?,
            TokenKind::Ident(_) | TokenKind::TypeIdent(_) => self.name_statement(false)?,
            _ => return Err(self.unexpected("expected a statement or `end`")),
        };

        Ok(Spanned::new(stmt, self.span_from(start)))
    }

    /// Statements up to and including the closing `end`.
    fn block(&mut self, what: &str) -> Result<Vec<Spanned<Statement>>, CompileError> {
        let mut body = Vec::new();
        while !self.check_keyword(KeywordId::End) {
            if self.is_at_end() {
                return Err(self.unexpected(&format!("expected `end` to close {what}")));
            }
            body.push(self.block_statement()?);
        }
        self.advance();
        Ok(body)
    }

    /// `for var in iterable: stmt* end`
    fn for_loop(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::For, "expected `for`")?;
        let variable = self.identifier("expected a loop variable")?;
        self.expect_keyword(KeywordId::In, "expected `in` after the loop variable")?;
        let iterable = self.expression()?;
        self.expect_punct(PunctuationId::Colon, "expected `:` after the loop header")?;
        let body = self.block("the for loop")?;

        Ok(Statement::For(ForLoop {
            variable,
            iterable,
            body,
        }))
    }

    /// Statements that start with a (qualified) name.
    ///
    /// - `x = value`, `x.y.z = value`
    /// - `Type(attr = value)` and `f(arg)` as statements
    /// - `A a [1] -- [0:] B b` and `A.b [0:] -- B.a [1]` (top level only)
    fn name_statement(&mut self, top_level: bool) -> Result<Statement, CompileError> {
        let name = self.qualified_name("expected a name")?;

        if self.check_punct(PunctuationId::LParen) {
            let call = self.call_or_constructor(name)?;
            return Ok(Statement::Expr(call.node));
        }

        if top_level && name.is_type {
            if self.check_punct(PunctuationId::Dot) {
                return self.relation_by_attributes(name);
            }
            if matches!(self.peek().kind, TokenKind::Ident(_)) {
                return self.relation_by_roles(name);
            }
        }

        let target = self.attribute_chain(Spanned::new(Expr::Reference(name.text), name.span))?;
        self.expect_punct(PunctuationId::Eq, "expected `=` in assignment")?;
        let value = self.expression()?;

        Ok(Statement::Assign(Assign { target, value }))
    }
}
