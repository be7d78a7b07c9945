/// Miscellaneous parser utilities.
///
/// This chunk contains small shared parsing helpers that don’t cleanly fit into
/// “decl”, “stmt” or “expr”: identifiers, qualified names and doc strings.
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    /// Lowercase identifier (`ID`).
    fn identifier(&mut self, msg: &str) -> Result<Ident, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name.clone())
            }
            _ => Err(self.unexpected(msg)),
        }
    }

    /// Uppercase identifier (`CID`).
    fn type_identifier(&mut self, msg: &str) -> Result<Ident, CompileError> {
        match &self.peek().kind {
            TokenKind::TypeIdent(name) => {
                self.advance();
                Ok(name.clone())
            }
            _ => Err(self.unexpected(msg)),
        }
    }

    fn any_identifier(&mut self, msg: &str) -> Result<Ident, CompileError> {
        match self.peek().kind.ident_name() {
            Some(name) => {
                self.advance();
                Ok(name.to_string())
            }
            None => Err(self.unexpected(msg)),
        }
    }

    /// `a::b::c` or `a::b::C`.
    ///
    /// Namespace segments are lowercase; a type identifier can only be the last segment.
    fn qualified_name(&mut self, msg: &str) -> Result<NameRef, CompileError> {
        let start = self.current_span();
        let mut text = String::new();

        loop {
            match &self.peek().kind {
                TokenKind::Ident(segment) => {
                    text.push_str(segment);
                    self.advance();
                    if !self.match_punct(PunctuationId::ColonColon) {
                        return Ok(NameRef {
                            text,
                            is_type: false,
                            span: self.span_from(start),
                        });
                    }
                    text.push_str("::");
                }
                TokenKind::TypeIdent(segment) => {
                    text.push_str(segment);
                    self.advance();
                    return Ok(NameRef {
                        text,
                        is_type: true,
                        span: self.span_from(start),
                    });
                }
                _ if text.is_empty() => return Err(self.unexpected(msg)),
                _ => return Err(self.unexpected("expected a name after `::`")),
            }
        }
    }

    /// Qualified name whose last segment is a type identifier.
    fn type_name(&mut self, msg: &str) -> Result<NameRef, CompileError> {
        let name = self.qualified_name(msg)?;
        if name.is_type {
            Ok(name)
        } else {
            Err(CompileError::syntax(
                format!("{msg}, found `{}`; type names start with an uppercase letter", name.text),
                name.span,
            ))
        }
    }

    /// Optional `"""doc"""` at the current position.
    fn doc_string(&mut self) -> Option<String> {
        match &self.peek().kind {
            TokenKind::MultiLineString(doc) => {
                self.advance();
                Some(doc.clone())
            }
            _ => None,
        }
    }
}
