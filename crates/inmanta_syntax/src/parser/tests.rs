#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the shape of the AST for each syntactic form and on the errors the
/// parser reports for malformed input.
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::lexer;

    fn parse_str(source: &str) -> Result<Module, CompileError> {
        let tokens = lexer::lex(source)?;
        parse(&tokens, &ParseOptions::default())
    }

    fn statements(source: &str) -> Vec<Statement> {
        parse_str(source)
            .unwrap_or_else(|e| panic!("parse failed: {e}"))
            .statements
            .into_iter()
            .map(|s| s.node)
            .collect()
    }

    fn single(source: &str) -> Statement {
        let mut stmts = statements(source);
        assert_eq!(stmts.len(), 1, "expected one statement, got {stmts:?}");
        stmts.remove(0)
    }

    fn assigned(source: &str) -> Expr {
        match single(source) {
            Statement::Assign(assign) => assign.value.node,
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    fn relation(source: &str) -> RelationDef {
        match single(source) {
            Statement::Relation(rel) => rel,
            other => panic!("expected relation, got {other:?}"),
        }
    }

    fn end(entity: &str, role: Option<&str>, cardinality: Option<Cardinality>) -> RelationEnd {
        RelationEnd {
            entity: entity.to_string(),
            role: role.map(str::to_string),
            cardinality,
        }
    }

    // ------------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------------

    #[test]
    fn test_empty_source() {
        let module = parse_str("").unwrap();
        assert!(module.statements.is_empty());
        assert_eq!(module.doc, None);
    }

    #[test]
    fn test_entity_defaults_to_base_type() {
        let Statement::Entity(entity) = single("entity Test:\nend") else {
            panic!("expected entity");
        };
        assert_eq!(entity.name, "Test");
        assert_eq!(entity.parents, vec![DEFAULT_BASE_TYPE.to_string()]);
        assert!(entity.attributes.is_empty());
        assert_eq!(entity.doc, None);
    }

    #[test]
    fn test_base_entity_in_std_has_no_parent() {
        let options = ParseOptions {
            namespace: BASE_TYPE_NAMESPACE.to_string(),
            ..ParseOptions::default()
        };
        let tokens = lexer::lex("entity Entity:\nend").unwrap();
        let module = parse(&tokens, &options).unwrap();
        let Statement::Entity(entity) = &module.statements[0].node else {
            panic!("expected entity");
        };
        assert!(entity.parents.is_empty());

        // Same name elsewhere still extends the base type.
        let Statement::Entity(entity) = single("entity Entity:\nend") else {
            panic!("expected entity");
        };
        assert_eq!(entity.parents.len(), 1);
    }

    #[test]
    fn test_entity_extends_doc_and_attributes() {
        let source = r#"
entity Test extends Foo, foo::sub::Bar:
    """ XX
    """
    bool bar = true
    number ten=5
    string[] names = ["a", "b"]
    ip::ip[1:3] ips
end
"#;
        let Statement::Entity(entity) = single(source) else {
            panic!("expected entity");
        };
        assert_eq!(entity.parents, vec!["Foo".to_string(), "foo::sub::Bar".to_string()]);
        assert_eq!(entity.doc.as_deref(), Some(" XX\n    "));
        assert_eq!(entity.attributes.len(), 4);

        let bar = entity.attribute("bar").unwrap();
        assert_eq!(bar.type_name, "bool");
        assert_eq!(bar.default.as_ref().map(|d| &d.node), Some(&Expr::Bool(true)));
        assert!(!bar.multi);

        let ten = entity.attribute("ten").unwrap();
        assert_eq!(ten.default.as_ref().map(|d| &d.node), Some(&Expr::Int(5)));

        let names = entity.attribute("names").unwrap();
        assert!(names.multi);
        assert_eq!(names.cardinality, None);

        let ips = entity.attribute("ips").unwrap();
        assert_eq!(ips.type_name, "ip::ip");
        assert!(ips.multi);
        assert_eq!(ips.cardinality, Some(Cardinality::new(Some(1), Some(3))));
        assert!(ips.default.is_none());
    }

    #[test]
    fn test_list_attribute_requires_list_default() {
        let err = parse_str("entity A:\n string[] x = \"a\"\nend").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("must be a list"), "{}", err.message);

        // The empty list is a list.
        assert!(parse_str("entity A:\n string[] x = []\nend").is_ok());
    }

    #[test]
    fn test_single_valued_attribute_accepts_list_default() {
        let module = parse_str("entity A:\n list names = [\"a\"]\nend").unwrap();
        let Statement::Entity(entity) = &module.statements[0].node else {
            panic!("expected entity");
        };
        let names = entity.attribute("names").unwrap();
        assert_eq!(names.type_name, "list");
        assert!(!names.multi);
        let Some(Expr::List(items)) = names.default.as_ref().map(|d| &d.node) else {
            panic!("expected list default");
        };
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_entity_name_must_be_type_identifier() {
        let err = parse_str("entity test:\nend").unwrap_err();
        assert_eq!(err.message, "expected an entity name, found identifier `test`");
        assert_eq!(err.position(), Position::new(1, 7));
    }

    #[test]
    fn test_unclosed_entity() {
        let err = parse_str("entity A:\n string x\n").unwrap_err();
        assert_eq!(err.message, "expected an attribute type or `end`, found end of input");
    }

    // ------------------------------------------------------------------------
    // Relations
    // ------------------------------------------------------------------------

    #[test]
    fn test_relation_by_roles() {
        let rel = relation("Test tests [0:] -- [5:10] Foo bars");
        assert_eq!(rel.left, end("Test", Some("tests"), Some(Cardinality::new(Some(0), None))));
        assert_eq!(rel.right, end("Foo", Some("bars"), Some(Cardinality::new(Some(5), Some(10)))));
        assert_eq!(rel.arrow, RelationArrow::Bidirectional);
        assert!(rel.annotations.is_empty());
        assert!(rel.requires.is_none());

        let rel = relation("Test tests [3] -- [:10] Foo bars");
        assert_eq!(rel.left.cardinality, Some(Cardinality::exactly(3)));
        assert_eq!(rel.right.cardinality, Some(Cardinality::new(None, Some(10))));
    }

    #[test]
    fn test_relation_by_attributes_swaps_ends() {
        let rel = relation("Test.bar [1] -- Foo.tests [5:10]");
        assert_eq!(rel.left, end("Test", Some("tests"), Some(Cardinality::new(Some(5), Some(10)))));
        assert_eq!(rel.right, end("Foo", Some("bar"), Some(Cardinality::exactly(1))));
    }

    #[test]
    fn test_unidirectional_relation() {
        let rel = relation("Test.bar [1:5] -- Foo");
        assert_eq!(rel.left, end("Test", None, None));
        assert_eq!(rel.right, end("Foo", Some("bar"), Some(Cardinality::new(Some(1), Some(5)))));
    }

    #[test]
    fn test_annotated_relation() {
        let rel = relation("Test.bar [1] foo, bar Foo.tests [5:10]");
        let annotations: Vec<String> = rel.annotations.iter().map(|a| a.node.to_string()).collect();
        assert_eq!(annotations, vec!["foo", "bar"]);
        assert_eq!(rel.left.role.as_deref(), Some("tests"));
        assert_eq!(rel.right.role.as_deref(), Some("bar"));
    }

    #[test]
    fn test_legacy_arrows_and_requires_predicate() {
        let rel = relation("Host.files [0:] -> File.host [1]");
        assert_eq!(rel.arrow, RelationArrow::Requires);
        let rel = relation("Host hosts [1] <- [0:] File files when self.managed");
        assert_eq!(rel.arrow, RelationArrow::Provides);
        assert_eq!(rel.requires.map(|r| r.node.to_string()).as_deref(), Some("self.managed"));
    }

    #[test]
    fn test_cardinality_validation() {
        let err = parse_str("Test tests [5:1] -- [1] Foo bars").unwrap_err();
        assert_eq!(err.message, "cardinality lower bound 5 exceeds upper bound 1");
        assert_eq!(err.column(), 11);

        let err = parse_str("Test tests [-1] -- [1] Foo bars").unwrap_err();
        assert_eq!(err.message, "cardinality bound -1 is negative");

        let err = parse_str("Test tests [:] -- [1] Foo bars").unwrap_err();
        assert_eq!(err.message, "cardinality needs at least one bound");
    }

    // ------------------------------------------------------------------------
    // Implementations and implement
    // ------------------------------------------------------------------------

    #[test]
    fn test_empty_implementation() {
        let Statement::Implementation(imp) = single("implementation test for Test:\nend") else {
            panic!("expected implementation");
        };
        assert_eq!(imp.name, "test");
        assert_eq!(imp.entity, "Test");
        assert!(imp.body.is_empty());
    }

    #[test]
    fn test_implementation_body() {
        let source = r#"
implementation test for Test:
    """ doc """
    std::File(attr="a")
    var = hello::func("world")
    for x in [1, 2]:
        t = x
    end
end
"#;
        let Statement::Implementation(imp) = single(source) else {
            panic!("expected implementation");
        };
        assert_eq!(imp.doc.as_deref(), Some(" doc "));
        assert_eq!(imp.body.len(), 3);

        let Statement::Expr(Expr::Constructor(ctor)) = &imp.body[0].node else {
            panic!("expected constructor statement");
        };
        assert_eq!(ctor.type_name, "std::File");
        assert_eq!(ctor.get("attr").map(|v| &v.node), Some(&Expr::String("a".into())));

        let Statement::Assign(assign) = &imp.body[1].node else {
            panic!("expected assignment");
        };
        assert_eq!(assign.target.node, Expr::Reference("var".into()));
        let Expr::Call(call) = &assign.value.node else {
            panic!("expected call");
        };
        assert_eq!(call.name, "hello::func");
        assert_eq!(call.args.len(), 1);

        let Statement::For(for_loop) = &imp.body[2].node else {
            panic!("expected for loop");
        };
        assert_eq!(for_loop.variable, "x");
        assert_eq!(for_loop.body.len(), 1);
    }

    #[test]
    fn test_relation_not_allowed_in_block() {
        let err = parse_str("implementation t for T:\n A a [1] -- [1] B b\nend").unwrap_err();
        assert_eq!(err.message, "expected `=` in assignment, found identifier `a`");
        assert_eq!(err.position(), Position::new(2, 3));
    }

    #[test]
    fn test_implement_selectors() {
        let Statement::Implement(imp) = single("implement Test using test, std::none") else {
            panic!("expected implement");
        };
        assert_eq!(imp.entity, "Test");
        assert_eq!(imp.implementations, vec!["test".to_string(), "std::none".to_string()]);
        assert_eq!(imp.select.node, Expr::Bool(true));

        let Statement::Implement(imp) = single("implement Test using test when (self > 5)") else {
            panic!("expected implement");
        };
        insta::assert_snapshot!(imp.select.node.to_string(), @"self > 5");

        let Statement::Implement(imp) = single("implement Test using test when not (fg(self) and false)") else {
            panic!("expected implement");
        };
        insta::assert_snapshot!(imp.select.node.to_string(), @"not (fg(self) and false)");
    }

    #[test]
    fn test_is_defined_shapes() {
        let select = |source: &str| match single(source) {
            Statement::Implement(imp) => imp.select.node,
            other => panic!("expected implement, got {other:?}"),
        };
        let implicit = Expr::IsDefined {
            subject: None,
            attribute: "other".into(),
        };
        assert_eq!(select("implement Test1 using tt when self.other is defined"), implicit);
        assert_eq!(select("implement Test1 using tt when other is defined"), implicit);

        // A dotted holder is an attribute of the implicit `self`.
        for source in [
            "implement Test1 using tt when a.other is defined",
            "implement Test1 using tt when self.a.other is defined",
        ] {
            let Expr::IsDefined { subject, attribute } = select(source) else {
                panic!("expected is defined");
            };
            assert_eq!(attribute, "other");
            let Some(Expr::AttributeRef { instance, attribute }) = subject.map(|s| s.node) else {
                panic!("expected attribute holder in {source}");
            };
            assert_eq!(attribute, "a");
            assert_eq!(instance.node, Expr::self_ref());
        }

        let Expr::IsDefined { subject, .. } = select("implement Test1 using tt when a.b.other is defined") else {
            panic!("expected is defined");
        };
        insta::assert_snapshot!(subject.unwrap().node.to_string(), @"self.a.b");
    }

    // ------------------------------------------------------------------------
    // Typedef, index, import
    // ------------------------------------------------------------------------

    #[test]
    fn test_typedef_regex() {
        let source = r"typedef uuid as string matching /[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}/";
        let Statement::TypeConstraint(def) = single(source) else {
            panic!("expected typedef");
        };
        assert_eq!(def.name, "uuid");
        assert_eq!(def.base_type, "string");
        let Expr::Regex { subject, pattern } = &def.constraint.node else {
            panic!("expected regex");
        };
        assert_eq!(subject.node, Expr::self_ref());
        assert_eq!(
            pattern.as_str(),
            "[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}"
        );
        assert!(pattern.regex().is_match("12345678-abcd-ef01-2345-6789abcdef01"));
    }

    #[test]
    fn test_typedef_comparison_and_call() {
        let Statement::TypeConstraint(def) = single("typedef port as number matching self > 0 and self < 65536") else {
            panic!("expected typedef");
        };
        insta::assert_snapshot!(def.constraint.node.to_string(), @"self > 0 and self < 65536");

        let Statement::TypeConstraint(def) = single("typedef ip as string matching std::is_ip(self)") else {
            panic!("expected typedef");
        };
        insta::assert_snapshot!(def.constraint.node.to_string(), @"std::is_ip(self) == true");
    }

    #[test]
    fn test_typedef_must_reference_self() {
        let err = parse_str("typedef x as number matching 5 > 3").unwrap_err();
        assert_eq!(err.message, "typedef expressions should reference the self variable");
        assert_eq!(err.column(), 29);
        assert_eq!(err.hints.len(), 1);

        // The type's own name counts as a self reference.
        assert!(parse_str("typedef x as number matching x > 3").is_ok());
    }

    #[test]
    fn test_typedef_default_constructor() {
        let source = r#"typedef ConfigFile as File(mode = 644, owner = "root", group = "root")"#;
        let Statement::TypeDefault(def) = single(source) else {
            panic!("expected typedef default");
        };
        assert_eq!(def.name, "ConfigFile");
        assert_eq!(def.constructor.node.type_name, "File");
        let names: Vec<&str> = def.constructor.node.attributes.iter().map(|kw| kw.name.as_str()).collect();
        assert_eq!(names, vec!["mode", "owner", "group"]);
        assert_eq!(def.constructor.node.get("mode").map(|v| &v.node), Some(&Expr::Int(644)));
    }

    #[test]
    fn test_index() {
        let Statement::Index(index) = single("index File(host, path)") else {
            panic!("expected index");
        };
        assert_eq!(index.entity, "File");
        assert_eq!(index.attributes, vec!["host".to_string(), "path".to_string()]);

        let err = parse_str("index File(host, host)").unwrap_err();
        assert_eq!(err.message, "duplicate attribute `host` in index on File");
        assert_eq!(err.column(), 17);
    }

    #[test]
    fn test_import() {
        let stmts = statements("import std\nimport ip::services as svc");
        assert_eq!(
            stmts,
            vec![
                Statement::Import(ImportDef {
                    path: "std".into(),
                    alias: None,
                }),
                Statement::Import(ImportDef {
                    path: "ip::services".into(),
                    alias: Some("svc".into()),
                }),
            ]
        );
    }

    #[test]
    fn test_module_doc() {
        let module = parse_str("\"\"\"\n    Module docs\n\"\"\"\nimport std\n").unwrap();
        assert_eq!(module.doc.as_deref(), Some("\n    Module docs\n"));
        assert_eq!(module.statements.len(), 1);
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    #[test]
    fn test_constructor_and_call_by_case() {
        let Expr::Constructor(ctor) = assigned("a = File( )") else {
            panic!("expected constructor");
        };
        assert_eq!(ctor.type_name, "File");
        assert!(ctor.attributes.is_empty());

        let Expr::Call(call) = assigned("a = file( )") else {
            panic!("expected call");
        };
        assert_eq!(call.name, "file");
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_duplicate_constructor_attribute() {
        let err = parse_str("a = File(host = 1, host = 2)").unwrap_err();
        assert_eq!(err.message, "duplicate attribute `host` in constructor");
        assert_eq!(err.column(), 19);
    }

    #[test]
    fn test_index_lookup() {
        let Expr::IndexLookup(lookup) = assigned(r#"a=File[host = 5, path = "Jos"]"#) else {
            panic!("expected index lookup");
        };
        assert_eq!(lookup.type_name, "File");
        assert_eq!(lookup.query.len(), 2);
        assert_eq!(lookup.query[1].value.node, Expr::String("Jos".into()));
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            assigned(r#"a=["a]","b"]"#),
            Expr::List(vec![
                Spanned::new(Expr::String("a]".into()), Span::new(3, 7, Position::new(1, 3))),
                Spanned::new(Expr::String("b".into()), Span::new(8, 11, Position::new(1, 8))),
            ])
        );
        assert_eq!(assigned("a = -0.256"), Expr::Float(-0.256));
        assert_eq!(assigned("a = \"\""), Expr::String(String::new()));

        let values: Vec<Expr> = statements("a=true b=false c=1 d=2.0 e=-5")
            .into_iter()
            .map(|s| match s {
                Statement::Assign(a) => a.value.node,
                other => panic!("expected assignment, got {other:?}"),
            })
            .collect();
        assert_eq!(
            values,
            vec![Expr::Bool(true), Expr::Bool(false), Expr::Int(1), Expr::Float(2.0), Expr::Int(-5)]
        );
    }

    #[test]
    fn test_string_format() {
        let Expr::StringFormat(format) = assigned(r#"a="j{{o}}s""#) else {
            panic!("expected string format");
        };
        assert_eq!(format.template, "j{{o}}s");
        assert_eq!(format.placeholders[0].reference.node, Expr::Reference("o".into()));
        assert_eq!(format.placeholders[0].raw, "{{o}}");
    }

    #[test]
    fn test_qualified_attribute_reference() {
        let expr = assigned("a=a::b::c.d");
        let Expr::AttributeRef { instance, attribute } = &expr else {
            panic!("expected attribute reference");
        };
        assert_eq!(instance.node, Expr::Reference("a::b::c".into()));
        assert_eq!(attribute, "d");
    }

    #[test]
    fn test_attribute_assignment_target() {
        let Statement::Assign(assign) = single("a.b.c = 1") else {
            panic!("expected assignment");
        };
        assert_eq!(assign.target.node.to_string(), "a.b.c");
    }

    #[test]
    fn test_operator_precedence() {
        let expr = assigned("x = a or b and not c == d");
        insta::assert_snapshot!(expr.to_string(), @"a or b and not c == d");
        let Expr::Or(_, right) = expr else {
            panic!("expected or at the root");
        };
        let Expr::And(_, right) = right.node else {
            panic!("expected and");
        };
        assert!(matches!(right.node, Expr::Not(_)));

        insta::assert_snapshot!(assigned("x = a in [1, 2]").to_string(), @"a in [1, 2]");
    }

    #[test]
    fn test_logical_operators_associate_left() {
        let expr = assigned("x = a or b or c");
        let Expr::Or(left, right) = expr else {
            panic!("expected or at the root");
        };
        assert!(matches!(left.node, Expr::Or(..)));
        assert_eq!(right.node, Expr::Reference("c".into()));

        let expr = assigned("x = a and b or c and d");
        let Expr::Or(left, right) = &expr else {
            panic!("expected or at the root");
        };
        assert!(matches!(left.node, Expr::And(..)));
        assert!(matches!(right.node, Expr::And(..)));
        insta::assert_snapshot!(expr.to_string(), @"a and b or c and d");

        insta::assert_snapshot!(assigned("x = (a or b) and (c or d)").to_string(), @"(a or b) and (c or d)");
        insta::assert_snapshot!(assigned("x = a or (b or c)").to_string(), @"a or (b or c)");
    }

    #[test]
    fn test_comparisons_do_not_chain() {
        let err = parse_str("x = a < b < c").unwrap_err();
        assert!(err.message.starts_with("comparison operators cannot be chained"));
        assert_eq!(err.column(), 10);
    }

    #[test]
    fn test_trailing_dot_is_error() {
        let err = parse_str("a = b.c\na=a::b::c.").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.message, "expected an attribute name after `.`, found end of input");
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_type_segment_ends_qualified_name() {
        let err = parse_str("a = std::File::x").unwrap_err();
        assert_eq!(err.message, "expected a statement, found `::`");
    }
}
