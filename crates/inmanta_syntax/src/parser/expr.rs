/// Expression parsing methods.
///
/// Precedence, lowest to highest:
///
/// | level | forms |
/// |-------|-------|
/// | or | `a or b` |
/// | and | `a and b` |
/// | not | `not a` |
/// | comparison | `a == b`, `a < b`, `a in b` (non-associative) |
/// | defined | `a.b is defined` |
/// | primary | literals, names, attribute access, constructors, lookups, calls, lists, `( )` |
///
/// The binary levels take their precedence and associativity from the operator registry.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.logical_expr(0)
    }

    /// `and`/`or` chains by precedence climbing; operands are `not` expressions.
    fn logical_expr(&mut self, min_precedence: u8) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.not_expr()?;
        while let Some(op) = self.logical_op() {
            let info = operators::info_for(op);
            if info.precedence < min_precedence {
                break;
            }
            self.advance();
            let next_min = match info.associativity {
                Associativity::Right => info.precedence,
                Associativity::Left | Associativity::None => info.precedence + 1,
            };
            let right = self.logical_expr(next_min)?;
            let span = left.span.merge(right.span);
            let node = if op == OperatorId::And {
                Expr::And(Box::new(left), Box::new(right))
            } else {
                Expr::Or(Box::new(left), Box::new(right))
            };
            left = Spanned::new(node, span);
        }
        Ok(left)
    }

    fn logical_op(&self) -> Option<OperatorId> {
        match self.peek().kind.keyword_id()? {
            KeywordId::And => Some(OperatorId::And),
            KeywordId::Or => Some(OperatorId::Or),
            _ => None,
        }
    }

    fn not_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        if self.check_keyword(KeywordId::Not) {
            let start = self.advance().span;
            let operand = self.not_expr()?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(Expr::Not(Box::new(operand)), span));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let left = self.defined_expr()?;
        let Some(op) = self.comparison_op() else {
            return Ok(left);
        };
        self.advance();
        let right = self.defined_expr()?;
        let span = left.span.merge(right.span);

        let chained = self.comparison_op().is_some();
        if chained && operators::info_for(op.id()).associativity == Associativity::None {
            return Err(CompileError::syntax(
                "comparison operators cannot be chained; combine them with `and`",
                self.current_span(),
            ));
        }

        let expr = match op {
            ComparisonOp::Compare(op) => Expr::Compare(Box::new(left), op, Box::new(right)),
            ComparisonOp::In => Expr::In(Box::new(left), Box::new(right)),
        };
        Ok(Spanned::new(expr, span))
    }

    /// Comparison operator at the current token, without consuming it.
    fn comparison_op(&self) -> Option<ComparisonOp> {
        let kind = &self.peek().kind;
        if kind.is_keyword(KeywordId::In) {
            return Some(ComparisonOp::In);
        }
        CompareOp::from_operator(kind.operator_id()?).map(ComparisonOp::Compare)
    }

    /// `holder.attr is defined`; a bare `attr` or `self.attr` checks the implicit `self`.
    ///
    /// A holder chain is always rooted at `self`: `a.x` and `self.a.x` give the same node.
    fn defined_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let operand = self.primary()?;
        if !self.check_keyword(KeywordId::Is) {
            return Ok(operand);
        }
        self.advance();
        self.expect_keyword(KeywordId::Defined, "expected `defined` after `is`")?;
        let span = self.span_from(operand.span);

        let expr = match operand.node {
            Expr::Reference(name) if !name.contains("::") => Expr::IsDefined {
                subject: None,
                attribute: name,
            },
            Expr::AttributeRef { instance, attribute } => {
                let is_self = matches!(&instance.node, Expr::Reference(name) if name == SELF_NAME);
                let subject = if is_self {
                    None
                } else {
                    Some(Box::new(root_at_self(*instance)))
                };
                Expr::IsDefined { subject, attribute }
            }
            _ => {
                return Err(CompileError::syntax(
                    "`is defined` applies to an attribute, like `x is defined` or `a.x is defined`",
                    operand.span,
                ));
            }
        };
        Ok(Spanned::new(expr, span))
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let token = self.peek();
        let span = token.span;

        let expr = match &token.kind {
            TokenKind::Int(n) => Expr::Int(*n),
            TokenKind::Float(x) => Expr::Float(*x),
            TokenKind::Keyword(KeywordId::True) => Expr::Bool(true),
            TokenKind::Keyword(KeywordId::False) => Expr::Bool(false),
            TokenKind::String(s) => interpolation::interpolate(s.clone(), span),
            TokenKind::MultiLineString(s) => Expr::MultiLineString(s.clone()),
            TokenKind::Regex(pattern) => Expr::Regex {
                subject: Box::new(Spanned::new(Expr::self_ref(), span)),
                pattern: pattern.clone(),
            },
            TokenKind::Punctuation(PunctuationId::LBracket) => return self.list(),
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect_punct(PunctuationId::RParen, "expected `)`")?;
                return Ok(Spanned::new(inner.node, self.span_from(span)));
            }
            TokenKind::Ident(_) | TokenKind::TypeIdent(_) => return self.name_expr(),
            _ => return Err(self.unexpected("expected an expression")),
        };

        self.advance();
        Ok(Spanned::new(expr, span))
    }

    /// `[a, b, ...]`, trailing comma allowed.
    fn list(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.expect_punct(PunctuationId::LBracket, "expected `[`")?.span;
        let mut items = Vec::new();
        while !self.check_punct(PunctuationId::RBracket) {
            items.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBracket, "expected `]` to close the list")?;
        Ok(Spanned::new(Expr::List(items), self.span_from(start)))
    }

    /// Name followed by a constructor/call, an index lookup or an attribute chain.
    fn name_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let name = self.qualified_name("expected a name")?;

        if self.check_punct(PunctuationId::LParen) {
            return self.call_or_constructor(name);
        }

        if name.is_type && self.check_punct(PunctuationId::LBracket) {
            let query = self.kwargs(PunctuationId::LBracket, PunctuationId::RBracket, "index lookup")?;
            let span = self.span_from(name.span);
            return Ok(Spanned::new(
                Expr::IndexLookup(IndexLookup {
                    type_name: name.text,
                    query,
                }),
                span,
            ));
        }

        self.attribute_chain(Spanned::new(Expr::Reference(name.text), name.span))
    }

    /// `Type(k = v, ...)` when `name` is a type, `f(arg, ...)` otherwise.
    fn call_or_constructor(&mut self, name: NameRef) -> Result<Spanned<Expr>, CompileError> {
        if name.is_type {
            let attributes = self.kwargs(PunctuationId::LParen, PunctuationId::RParen, "constructor")?;
            let span = self.span_from(name.span);
            return Ok(Spanned::new(
                Expr::Constructor(Constructor {
                    type_name: name.text,
                    attributes,
                }),
                span,
            ));
        }

        self.expect_punct(PunctuationId::LParen, "expected `(`")?;
        let mut args = Vec::new();
        while !self.check_punct(PunctuationId::RParen) {
            args.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected `)` to close the call")?;
        let span = self.span_from(name.span);
        Ok(Spanned::new(
            Expr::Call(FunctionCall {
                name: name.text,
                args,
            }),
            span,
        ))
    }

    /// `(name = value, ...)` or `[name = value, ...]`; names must be unique.
    fn kwargs(&mut self, open: PunctuationId, close: PunctuationId, what: &str) -> Result<Vec<Kwarg>, CompileError> {
        self.expect_punct(open, &format!("expected `{}`", punctuation::as_str(open)))?;
        let mut kwargs: Vec<Kwarg> = Vec::new();
        while !self.check_punct(close) {
            let span = self.current_span();
            let name = self.identifier("expected an attribute name")?;
            if kwargs.iter().any(|kw| kw.name == name) {
                return Err(CompileError::syntax(format!("duplicate attribute `{name}` in {what}"), span));
            }
            self.expect_punct(PunctuationId::Eq, "expected `=` after the attribute name")?;
            let value = self.expression()?;
            kwargs.push(Kwarg { name, value });
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(close, &format!("expected `{}`", punctuation::as_str(close)))?;
        Ok(kwargs)
    }

    /// Wrap `base` in `AttributeRef`s for each `.attr` that follows.
    fn attribute_chain(&mut self, base: Spanned<Expr>) -> Result<Spanned<Expr>, CompileError> {
        let mut expr = base;
        while self.match_punct(PunctuationId::Dot) {
            let attribute = self.identifier("expected an attribute name after `.`")?;
            let span = self.span_from(expr.span);
            expr = Spanned::new(
                Expr::AttributeRef {
                    instance: Box::new(expr),
                    attribute,
                },
                span,
            );
        }
        Ok(expr)
    }
}

/// Re-root an attribute holder on the implicit `self`: `a.b` becomes `self.a.b`.
///
/// Qualified names (`ns::x`) and chains already rooted at `self` are left alone.
fn root_at_self(holder: Spanned<Expr>) -> Spanned<Expr> {
    let span = holder.span;
    match holder.node {
        Expr::Reference(name) if name != SELF_NAME && !name.contains("::") => {
            let instance = Box::new(Spanned::new(Expr::self_ref(), span));
            Spanned::new(Expr::AttributeRef { instance, attribute: name }, span)
        }
        Expr::AttributeRef { instance, attribute } => {
            let instance = Box::new(root_at_self(*instance));
            Spanned::new(Expr::AttributeRef { instance, attribute }, span)
        }
        node => Spanned::new(node, span),
    }
}

/// Operators accepted at comparison level.
#[derive(Clone, Copy)]
enum ComparisonOp {
    Compare(CompareOp),
    In,
}

impl ComparisonOp {
    fn id(self) -> OperatorId {
        match self {
            ComparisonOp::Compare(op) => op.operator_id(),
            ComparisonOp::In => OperatorId::In,
        }
    }
}
