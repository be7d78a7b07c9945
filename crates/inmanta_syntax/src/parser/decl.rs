/// Declaration parsing methods.
///
/// This chunk parses the keyword-led definitions: entities, implementations, implement
/// statements, typedefs, indices and imports, plus both relation syntaxes.
///
/// ## Notes
/// - Each entrypoint assumes the leading keyword (or name, for relations) is the current token.
/// - Checks the grammar can make locally (duplicate index attributes, list defaults, bounds)
///   happen here; everything that needs other statements is left to semantic analysis.
impl<'a> Parser<'a> {
    // ========================================================================
    // Entities
    // ========================================================================

    /// `entity Name [extends A, b::C]: [doc] attribute* end`
    fn entity_def(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Entity, "expected `entity`")?;
        let name = self.type_identifier("expected an entity name")?;

        let mut parents = Vec::new();
        if self.match_keyword(KeywordId::Extends) {
            loop {
                parents.push(self.type_name("expected a parent entity type")?.text);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        } else if !(name == "Entity" && self.options.namespace == BASE_TYPE_NAMESPACE) {
            parents.push(self.options.implicit_base_type.clone());
        }

        self.expect_punct(PunctuationId::Colon, "expected `:` after entity header")?;
        let doc = self.doc_string();

        let mut attributes = Vec::new();
        while !self.check_keyword(KeywordId::End) {
            attributes.push(self.attribute_decl()?);
        }
        self.expect_keyword(KeywordId::End, "expected `end` to close the entity")?;

        Ok(Statement::Entity(EntityDef {
            name,
            parents,
            attributes,
            doc,
        }))
    }

    /// `type[card] name [= default]`
    fn attribute_decl(&mut self) -> Result<Spanned<AttributeDecl>, CompileError> {
        let start = self.current_span();
        let type_name = self.qualified_name("expected an attribute type or `end`")?.text;

        let mut multi = false;
        let mut cardinality = None;
        if self.check_punct(PunctuationId::LBracket) {
            multi = true;
            if self.peek_next().kind.is_punctuation(PunctuationId::RBracket) {
                self.advance();
                self.advance();
            } else {
                cardinality = Some(self.cardinality()?);
            }
        }

        let name = self.identifier("expected an attribute name")?;

        let default = if self.match_punct(PunctuationId::Eq) {
            let value = self.expression()?;
            let is_list = matches!(value.node, Expr::List(_));
            if multi && !is_list {
                return Err(CompileError::syntax(
                    format!("default of list attribute `{name}` must be a list"),
                    value.span,
                ));
            }
            Some(value)
        } else {
            None
        };

        Ok(Spanned::new(
            AttributeDecl {
                name,
                type_name,
                default,
                multi,
                cardinality,
            },
            self.span_from(start),
        ))
    }

    // ========================================================================
    // Implementations
    // ========================================================================

    /// `implementation name for Type: [doc] stmt* end`
    fn implementation_def(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Implementation, "expected `implementation`")?;
        let name = self.identifier("expected an implementation name")?;
        self.expect_keyword(KeywordId::For, "expected `for` after the implementation name")?;
        let entity = self.type_name("expected an entity type")?.text;
        self.expect_punct(PunctuationId::Colon, "expected `:` after implementation header")?;
        let doc = self.doc_string();
        let body = self.block("the implementation")?;

        Ok(Statement::Implementation(ImplementationDef {
            name,
            entity,
            doc,
            body,
        }))
    }

    /// `implement Type using impl, ... [when predicate]`
    fn implement_def(&mut self) -> Result<Statement, CompileError> {
        let keyword = self.expect_keyword(KeywordId::Implement, "expected `implement`")?;
        let entity = self.type_name("expected an entity type")?.text;
        self.expect_keyword(KeywordId::Using, "expected `using`")?;

        let mut implementations = Vec::new();
        loop {
            implementations.push(self.qualified_name("expected an implementation name")?.text);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        let select = if self.match_keyword(KeywordId::When) {
            self.expression()?
        } else {
            Spanned::new(Expr::Bool(true), keyword.span)
        };

        Ok(Statement::Implement(ImplementDef {
            entity,
            implementations,
            select,
        }))
    }

    // ========================================================================
    // Typedefs, indices, imports
    // ========================================================================

    /// `typedef name as base matching expr` or `typedef Name as Type(attr = value, ...)`
    fn typedef(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Typedef, "expected `typedef`")?;
        let name = self.any_identifier("expected a type name")?;
        self.expect_keyword(KeywordId::As, "expected `as` after the type name")?;
        let base = self.qualified_name("expected a base type")?;

        if self.match_keyword(KeywordId::Matching) {
            let constraint = self.typedef_constraint(&name)?;
            return Ok(Statement::TypeConstraint(TypeConstraintDef {
                name,
                base_type: base.text,
                constraint,
            }));
        }

        if base.is_type && self.check_punct(PunctuationId::LParen) {
            let attributes = self.kwargs(PunctuationId::LParen, PunctuationId::RParen, "constructor")?;
            let span = self.span_from(base.span);
            let constructor = Constructor {
                type_name: base.text,
                attributes,
            };
            return Ok(Statement::TypeDefault(TypeDefaultDef {
                name,
                constructor: Spanned::new(constructor, span),
            }));
        }

        Err(self.unexpected("expected `matching` or a constructor after `as`"))
    }

    /// Constraint of a `typedef ... matching`; a bare call `f(self)` means `f(self) == true`.
    fn typedef_constraint(&mut self, name: &str) -> Result<Spanned<Expr>, CompileError> {
        let expr = self.expression()?;
        let expr = if matches!(expr.node, Expr::Call(_)) {
            let span = expr.span;
            let truth = Box::new(Spanned::new(Expr::Bool(true), span));
            Spanned::new(Expr::Compare(Box::new(expr), CompareOp::Eq, truth), span)
        } else {
            expr
        };

        let refs_self = expr.node.requires().iter().any(|r| *r == SELF_NAME || *r == name);
        if !refs_self {
            return Err(CompileError::syntax("typedef expressions should reference the self variable", expr.span)
                .with_hint(format!("write the constraint in terms of `{SELF_NAME}`, e.g. `{SELF_NAME} > 0`")));
        }
        Ok(expr)
    }

    /// `index Type(attr, ...)`
    fn index_def(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Index, "expected `index`")?;
        let entity = self.type_name("expected an entity type")?.text;
        self.expect_punct(PunctuationId::LParen, "expected `(` after the indexed type")?;

        let mut attributes: Vec<Ident> = Vec::new();
        loop {
            let span = self.current_span();
            let attr = self.identifier("expected an attribute name")?;
            if attributes.contains(&attr) {
                return Err(CompileError::syntax(
                    format!("duplicate attribute `{attr}` in index on {entity}"),
                    span,
                ));
            }
            attributes.push(attr);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected `)` to close the index")?;

        Ok(Statement::Index(IndexDef { entity, attributes }))
    }

    /// `import a::b [as c]`
    fn import_def(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::Import, "expected `import`")?;
        let path = self.qualified_name("expected a module name")?;
        if path.is_type {
            return Err(CompileError::syntax(
                format!("cannot import `{}`: module names are lowercase", path.text),
                path.span,
            ));
        }
        let alias = if self.match_keyword(KeywordId::As) {
            Some(self.identifier("expected an alias after `as`")?)
        } else {
            None
        };

        Ok(Statement::Import(ImportDef { path: path.text, alias }))
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// `Left role [c] -- [c] Right role [when expr]`; `left` is the already-parsed `Left`.
    fn relation_by_roles(&mut self, left: NameRef) -> Result<Statement, CompileError> {
        let left_role = self.identifier("expected a role name")?;
        let left_card = self.optional_cardinality()?;
        let arrow = self.relation_arrow()?;
        let right_card = self.optional_cardinality()?;
        let right = self.type_name("expected the related entity type")?.text;
        let right_role = self.identifier("expected a role name")?;
        let requires = self.relation_requires()?;

        Ok(Statement::Relation(RelationDef {
            left: RelationEnd {
                entity: left.text,
                role: Some(left_role),
                cardinality: left_card,
            },
            right: RelationEnd {
                entity: right,
                role: Some(right_role),
                cardinality: right_card,
            },
            arrow,
            annotations: Vec::new(),
            requires,
        }))
    }

    /// `Left.r [c1] (-- | annotation, ...) Right[.l [c2]] [when expr]`
    ///
    /// `Left.r` declares the attribute `r` *on* `Left`, so it describes the `Right` end:
    /// the result is `left = (Left, l, c2)` and `right = (Right, r, c1)`. Without `.l` the
    /// relation is unidirectional and `left` carries neither role nor cardinality.
    fn relation_by_attributes(&mut self, left: NameRef) -> Result<Statement, CompileError> {
        self.expect_punct(PunctuationId::Dot, "expected `.`")?;
        let near_role = self.identifier("expected a relation attribute name")?;
        let near_card = self.optional_cardinality()?;

        let mut annotations = Vec::new();
        let arrow = if self.peek().kind.is_relation_arrow() {
            self.relation_arrow()?
        } else {
            loop {
                annotations.push(self.expression()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            RelationArrow::Bidirectional
        };

        let right = self.type_name("expected the related entity type")?.text;
        let (far_role, far_card) = if self.match_punct(PunctuationId::Dot) {
            let role = self.identifier("expected a relation attribute name")?;
            (Some(role), self.optional_cardinality()?)
        } else {
            (None, None)
        };
        let requires = self.relation_requires()?;

        Ok(Statement::Relation(RelationDef {
            left: RelationEnd {
                entity: left.text,
                role: far_role,
                cardinality: far_card,
            },
            right: RelationEnd {
                entity: right,
                role: Some(near_role),
                cardinality: near_card,
            },
            arrow,
            annotations,
            requires,
        }))
    }

    fn relation_arrow(&mut self) -> Result<RelationArrow, CompileError> {
        let token = self.peek();
        let id = token.punctuation_id();
        let arrow = match id {
            Some(PunctuationId::DashDash) => RelationArrow::Bidirectional,
            Some(PunctuationId::Arrow) => RelationArrow::Requires,
            Some(PunctuationId::LeftArrow) => RelationArrow::Provides,
            _ => return Err(self.unexpected("expected a relation arrow `--`")),
        };
        if id.is_some_and(|id| punctuation::info_for(id).stability == Stability::Deprecated) {
            tracing::warn!(line = token.span.line(), arrow = %token.kind, "deprecated relation arrow, use `--`");
        }
        self.advance();
        Ok(arrow)
    }

    fn relation_requires(&mut self) -> Result<Option<Spanned<Expr>>, CompileError> {
        if self.match_keyword(KeywordId::When) {
            Ok(Some(self.expression()?))
        } else {
            Ok(None)
        }
    }

    // ========================================================================
    // Cardinality
    // ========================================================================

    fn optional_cardinality(&mut self) -> Result<Option<Cardinality>, CompileError> {
        if self.check_punct(PunctuationId::LBracket) {
            self.cardinality().map(Some)
        } else {
            Ok(None)
        }
    }

    /// `[n]`, `[n:]`, `[:m]` or `[n:m]`
    fn cardinality(&mut self) -> Result<Cardinality, CompileError> {
        let open = self.expect_punct(PunctuationId::LBracket, "expected `[`")?.span;
        let lower = self.cardinality_bound()?;

        let cardinality = if self.match_punct(PunctuationId::Colon) {
            let upper = self.cardinality_bound()?;
            if lower.is_none() && upper.is_none() {
                return Err(CompileError::syntax("cardinality needs at least one bound", self.span_from(open)));
            }
            Cardinality::new(lower, upper)
        } else {
            match lower {
                Some(n) => Cardinality::exactly(n),
                None => return Err(self.unexpected("expected a cardinality bound")),
            }
        };
        self.expect_punct(PunctuationId::RBracket, "expected `]` to close the cardinality")?;

        if let (Some(lo), Some(hi)) = (cardinality.lower, cardinality.upper) {
            if lo > hi {
                return Err(CompileError::syntax(
                    format!("cardinality lower bound {lo} exceeds upper bound {hi}"),
                    self.span_from(open),
                ));
            }
        }
        Ok(cardinality)
    }

    fn cardinality_bound(&mut self) -> Result<Option<u64>, CompileError> {
        match self.peek().kind {
            TokenKind::Int(n) => {
                let span = self.current_span();
                let bound = u64::try_from(n)
                    .map_err(|_| CompileError::syntax(format!("cardinality bound {n} is negative"), span))?;
                self.advance();
                Ok(Some(bound))
            }
            _ => Ok(None),
        }
    }
}
