//! Abstract Syntax Tree definitions for the Inmanta configuration language
//!
//! This module defines every node the parser produces. Nodes are plain data: they are built once
//! per source unit and never mutated afterwards. Qualified names (`std::File`, `a::b::c`) are kept
//! as opaque strings; resolving them against a namespace tree belongs to the semantic phase.

use std::fmt;

use inmanta_core::lang::operators::{self, Associativity, OperatorId};

/// Name of the implicit subject that regex literals and `is defined` checks refer to.
pub const SELF_NAME: &str = "self";

/// Line/column of a source location. `line` is 1-based, `column` is a 0-based offset in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source location span (byte offsets), tagged with the line/column of its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub position: Position,
}

impl Span {
    pub fn new(start: usize, end: usize, position: Position) -> Self {
        Self { start, end, position }
    }

    pub fn merge(self, other: Span) -> Span {
        let position = if other.start < self.start {
            other.position
        } else {
            self.position
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            position,
        }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Unqualified identifier.
pub type Ident = String;

/// `::`-separated name, unresolved at this layer.
pub type QualifiedName = String;

/// A parsed source unit: an optional leading doc string plus its statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub doc: Option<String>,
    pub statements: Vec<Spanned<Statement>>,
}

// ============================================================================
// Statements
// ============================================================================

/// Top-level and block-level statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Entity(EntityDef),
    TypeConstraint(TypeConstraintDef),
    TypeDefault(TypeDefaultDef),
    Index(IndexDef),
    Implementation(ImplementationDef),
    Implement(ImplementDef),
    Relation(RelationDef),
    Assign(Assign),
    /// A constructor or function call used for its effect.
    Expr(Expr),
    For(ForLoop),
    Import(ImportDef),
}

impl Statement {
    /// Short, stable name of the statement kind, for logs and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Entity(_) => "entity",
            Statement::TypeConstraint(_) => "typedef",
            Statement::TypeDefault(_) => "typedef-default",
            Statement::Index(_) => "index",
            Statement::Implementation(_) => "implementation",
            Statement::Implement(_) => "implement",
            Statement::Relation(_) => "relation",
            Statement::Assign(_) => "assign",
            Statement::Expr(Expr::Constructor(_)) => "constructor",
            Statement::Expr(_) => "call",
            Statement::For(_) => "for",
            Statement::Import(_) => "import",
        }
    }
}

/// `entity Name extends A, b::C: [doc] attr* end`
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDef {
    pub name: Ident,
    /// Never empty after parsing: an entity without `extends` gets the implicit base type.
    pub parents: Vec<QualifiedName>,
    pub attributes: Vec<Spanned<AttributeDecl>>,
    pub doc: Option<String>,
}

impl EntityDef {
    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        self.attributes.iter().map(|a| &a.node).find(|a| a.name == name)
    }
}

/// `type name [= default]` inside an entity body
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDecl {
    pub name: Ident,
    pub type_name: QualifiedName,
    pub default: Option<Spanned<Expr>>,
    /// `true` for `type[] name`: the attribute holds an ordered list of values.
    pub multi: bool,
    /// Optional bounds written as `type[lo:hi] name`; implies `multi`.
    pub cardinality: Option<Cardinality>,
}

/// `typedef name as base matching <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeConstraintDef {
    pub name: Ident,
    pub base_type: QualifiedName,
    pub constraint: Spanned<Expr>,
}

/// `typedef Name as Type(attr = value, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefaultDef {
    pub name: Ident,
    pub constructor: Spanned<Constructor>,
}

/// `index Type(attr, attr, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDef {
    pub entity: QualifiedName,
    pub attributes: Vec<Ident>,
}

/// `implementation name for Type: [doc] stmt* end`
#[derive(Debug, Clone, PartialEq)]
pub struct ImplementationDef {
    pub name: Ident,
    pub entity: QualifiedName,
    pub doc: Option<String>,
    pub body: Vec<Spanned<Statement>>,
}

/// `implement Type using impl, ... [when predicate]`
#[derive(Debug, Clone, PartialEq)]
pub struct ImplementDef {
    pub entity: QualifiedName,
    pub implementations: Vec<QualifiedName>,
    /// Literal `true` when no `when` clause is written.
    pub select: Spanned<Expr>,
}

/// A relation between two entity types.
///
/// Each end names the entity type and the role under which the *opposite* type sees it. For
/// `A a [1] -- [0:] B b`, `left` is `(A, a, [1])`: `B` gets an attribute `a` holding one `A`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDef {
    pub left: RelationEnd,
    pub right: RelationEnd,
    pub arrow: RelationArrow,
    pub annotations: Vec<Spanned<Expr>>,
    pub requires: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationEnd {
    pub entity: QualifiedName,
    /// `None` on the far side of a unidirectional relation.
    pub role: Option<Ident>,
    pub cardinality: Option<Cardinality>,
}

/// Relation arrow as written. `->` and `<-` are the legacy directed spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationArrow {
    #[default]
    Bidirectional,
    Requires,
    Provides,
}

/// Inclusive cardinality bounds; `None` means the bound was left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cardinality {
    pub lower: Option<u64>,
    pub upper: Option<u64>,
}

impl Cardinality {
    pub fn new(lower: Option<u64>, upper: Option<u64>) -> Self {
        Self { lower, upper }
    }

    /// `[n]`: exactly `n`.
    pub fn exactly(n: u64) -> Self {
        Self::new(Some(n), Some(n))
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper.is_none()
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (Some(lo), Some(hi)) if lo == hi => write!(f, "[{lo}]"),
            (lo, hi) => {
                write!(f, "[")?;
                if let Some(lo) = lo {
                    write!(f, "{lo}")?;
                }
                write!(f, ":")?;
                if let Some(hi) = hi {
                    write!(f, "{hi}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// `target = value`; `target` is a `Reference` or an `AttributeRef`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: Spanned<Expr>,
    pub value: Spanned<Expr>,
}

/// `for var in iterable: stmt* end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub variable: Ident,
    pub iterable: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

/// `import a::b [as c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDef {
    pub path: QualifiedName,
    pub alias: Option<Ident>,
}

impl ImportDef {
    /// Name the import is bound to in the importing namespace.
    pub fn bound_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => &self.path,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Escape-decoded single-line string without placeholders.
    String(String),
    MultiLineString(String),
    List(Vec<Spanned<Expr>>),
    Reference(QualifiedName),
    AttributeRef {
        instance: Box<Spanned<Expr>>,
        attribute: Ident,
    },
    /// `/pattern/` matched against an implicit subject (a synthetic `self` reference).
    Regex {
        subject: Box<Spanned<Expr>>,
        pattern: RegexPattern,
    },
    Compare(Box<Spanned<Expr>>, CompareOp, Box<Spanned<Expr>>),
    In(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    And(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Or(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Not(Box<Spanned<Expr>>),
    /// `holder.attribute is defined`; `subject: None` is the implicit `self`.
    IsDefined {
        subject: Option<Box<Spanned<Expr>>>,
        attribute: Ident,
    },
    Constructor(Constructor),
    IndexLookup(IndexLookup),
    Call(FunctionCall),
    StringFormat(StringFormat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    pub fn operator_id(self) -> OperatorId {
        match self {
            CompareOp::Eq => OperatorId::EqEq,
            CompareOp::NotEq => OperatorId::NotEq,
            CompareOp::Lt => OperatorId::Lt,
            CompareOp::LtEq => OperatorId::LtEq,
            CompareOp::Gt => OperatorId::Gt,
            CompareOp::GtEq => OperatorId::GtEq,
        }
    }

    /// Comparison for a registry operator; `None` for non-comparison operators.
    pub fn from_operator(id: OperatorId) -> Option<Self> {
        match id {
            OperatorId::EqEq => Some(CompareOp::Eq),
            OperatorId::NotEq => Some(CompareOp::NotEq),
            OperatorId::Lt => Some(CompareOp::Lt),
            OperatorId::LtEq => Some(CompareOp::LtEq),
            OperatorId::Gt => Some(CompareOp::Gt),
            OperatorId::GtEq => Some(CompareOp::GtEq),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        operators::as_str(self.operator_id())
    }
}

/// `name = value` argument of a constructor or index lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Kwarg {
    pub name: Ident,
    pub value: Spanned<Expr>,
}

/// `Type(attr = value, ...)`; attribute names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub type_name: QualifiedName,
    pub attributes: Vec<Kwarg>,
}

impl Constructor {
    pub fn get(&self, name: &str) -> Option<&Spanned<Expr>> {
        self.attributes.iter().find(|kw| kw.name == name).map(|kw| &kw.value)
    }
}

/// `Type[attr = value, ...]`: query an index of `Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexLookup {
    pub type_name: QualifiedName,
    pub query: Vec<Kwarg>,
}

/// `name(arg, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub args: Vec<Spanned<Expr>>,
}

/// String literal with `{{ ref }}` placeholders.
///
/// `template` is the decoded string with placeholders left in place; each placeholder pairs the
/// parsed reference with its raw text (e.g. `{{ c.d }}`) so the evaluator can substitute it.
#[derive(Debug, Clone, PartialEq)]
pub struct StringFormat {
    pub template: String,
    pub placeholders: Vec<Placeholder>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub reference: Spanned<Expr>,
    pub raw: String,
}

/// A compiled regular expression. Equality compares the pattern text.
#[derive(Clone)]
pub struct RegexPattern(regex::Regex);

impl RegexPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        regex::Regex::new(pattern).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn regex(&self) -> &regex::Regex {
        &self.0
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for RegexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl Expr {
    /// Synthetic `self` reference used for implicit subjects.
    pub fn self_ref() -> Expr {
        Expr::Reference(SELF_NAME.to_string())
    }

    /// Names this expression reads, in source order (duplicates kept).
    ///
    /// Only the root of an attribute chain is reported: `a.b.c` requires `a`.
    pub fn requires(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_requires(&mut out);
        out
    }

    fn collect_requires<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Int(_)
            | Expr::Float(_)
            | Expr::Bool(_)
            | Expr::String(_)
            | Expr::MultiLineString(_) => {}
            Expr::Reference(name) => out.push(name),
            Expr::AttributeRef { instance, .. } => instance.node.collect_requires(out),
            Expr::Regex { subject, .. } => subject.node.collect_requires(out),
            Expr::IsDefined { subject, .. } => match subject {
                Some(subject) => subject.node.collect_requires(out),
                None => out.push(SELF_NAME),
            },
            Expr::List(items) => items.iter().for_each(|i| i.node.collect_requires(out)),
            Expr::Compare(l, _, r) | Expr::In(l, r) | Expr::And(l, r) | Expr::Or(l, r) => {
                l.node.collect_requires(out);
                r.node.collect_requires(out);
            }
            Expr::Not(e) => e.node.collect_requires(out),
            Expr::Constructor(c) => c.attributes.iter().for_each(|kw| kw.value.node.collect_requires(out)),
            Expr::IndexLookup(l) => l.query.iter().for_each(|kw| kw.value.node.collect_requires(out)),
            Expr::Call(call) => call.args.iter().for_each(|a| a.node.collect_requires(out)),
            Expr::StringFormat(fmt) => fmt
                .placeholders
                .iter()
                .for_each(|p| p.reference.node.collect_requires(out)),
        }
    }

    /// Operator at the root of this expression, if any.
    fn operator(&self) -> Option<OperatorId> {
        match self {
            Expr::Or(..) => Some(OperatorId::Or),
            Expr::And(..) => Some(OperatorId::And),
            Expr::Not(_) => Some(OperatorId::Not),
            Expr::Compare(_, op, _) => Some(op.operator_id()),
            Expr::In(..) => Some(OperatorId::In),
            Expr::IsDefined { .. } => Some(OperatorId::IsDefined),
            _ => None,
        }
    }

    /// Binding strength used to decide where `Display` needs parentheses; atoms bind tightest.
    fn precedence(&self) -> u8 {
        self.operator().map_or(u8::MAX, |op| operators::info_for(op).precedence)
    }
}

fn write_child(f: &mut fmt::Formatter<'_>, child: &Expr, min: u8) -> fmt::Result {
    if child.precedence() < min {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

/// `l op r`, parenthesizing children as the operator's associativity requires.
fn write_infix(f: &mut fmt::Formatter<'_>, l: &Expr, op: OperatorId, r: &Expr) -> fmt::Result {
    let info = operators::info_for(op);
    let left_min = match info.associativity {
        Associativity::Left => info.precedence,
        Associativity::Right | Associativity::None => info.precedence + 1,
    };
    let right_min = match info.associativity {
        Associativity::Right => info.precedence,
        Associativity::Left | Associativity::None => info.precedence + 1,
    };
    write_child(f, l, left_min)?;
    write!(f, " {} ", operators::as_str(op))?;
    write_child(f, r, right_min)
}

fn write_list<T>(f: &mut fmt::Formatter<'_>, items: &[T], mut each: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        each(f, item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(n) => write!(f, "{n}"),
            Expr::Float(x) => write!(f, "{x:?}"),
            Expr::Bool(b) => write!(f, "{b}"),
            Expr::String(s) => write!(f, "{s:?}"),
            Expr::MultiLineString(s) => write!(f, "\"\"\"{s}\"\"\""),
            Expr::List(items) => {
                write!(f, "[")?;
                write_list(f, items, |f, item| write!(f, "{}", item.node))?;
                write!(f, "]")
            }
            Expr::Reference(name) => write!(f, "{name}"),
            Expr::AttributeRef { instance, attribute } => write!(f, "{}.{attribute}", instance.node),
            Expr::Regex { pattern, .. } => write!(f, "/{}/", pattern.as_str()),
            Expr::Compare(l, op, r) => write_infix(f, &l.node, op.operator_id(), &r.node),
            Expr::In(l, r) => write_infix(f, &l.node, OperatorId::In, &r.node),
            Expr::And(l, r) => write_infix(f, &l.node, OperatorId::And, &r.node),
            Expr::Or(l, r) => write_infix(f, &l.node, OperatorId::Or, &r.node),
            Expr::Not(e) => {
                write!(f, "{} ", operators::as_str(OperatorId::Not))?;
                write_child(f, &e.node, operators::info_for(OperatorId::Not).precedence)
            }
            Expr::IsDefined { subject, attribute } => match subject {
                Some(subject) => write!(f, "{}.{attribute} is defined", subject.node),
                None => write!(f, "{SELF_NAME}.{attribute} is defined"),
            },
            Expr::Constructor(c) => {
                write!(f, "{}(", c.type_name)?;
                write_list(f, &c.attributes, |f, kw| write!(f, "{}={}", kw.name, kw.value.node))?;
                write!(f, ")")
            }
            Expr::IndexLookup(l) => {
                write!(f, "{}[", l.type_name)?;
                write_list(f, &l.query, |f, kw| write!(f, "{}={}", kw.name, kw.value.node))?;
                write!(f, "]")
            }
            Expr::Call(call) => {
                write!(f, "{}(", call.name)?;
                write_list(f, &call.args, |f, arg| write!(f, "{}", arg.node))?;
                write!(f, ")")
            }
            Expr::StringFormat(fmt) => write!(f, "{:?}", fmt.template),
        }
    }
}
