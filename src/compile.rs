//! Compile entry point.
//!
//! [`compile_unit`] turns one source unit into its statements, or into a [`CompileUnitError`]
//! that names the unit and can render a labelled excerpt of it. Every call is independent: there
//! is no state shared between units, so units may be compiled from parallel threads.

use miette::{Diagnostic, LabeledSpan, NamedSource, Severity, SourceCode};
use thiserror::Error;

use inmanta_syntax::ast::{Module, Spanned, Statement};
use inmanta_syntax::diagnostics::{CompileError, ErrorKind};
use inmanta_syntax::lexer::Lexer;
use inmanta_syntax::parser;

use crate::config::FrontendConfig;
use crate::namespace::Namespace;

/// A lexical or syntax error in a named source unit.
#[derive(Debug, Error)]
#[error("{source_id}:{pos}: {kind}: {message}", pos = .error.span.position, kind = .error.kind, message = .error.message)]
pub struct CompileUnitError {
    /// Identifier the unit was compiled under (usually its path).
    pub source_id: String,
    pub error: CompileError,
    src: NamedSource<String>,
    text_len: usize,
}

impl CompileUnitError {
    pub fn new(source_id: &str, text: &str, error: CompileError) -> Self {
        Self {
            source_id: source_id.to_string(),
            error,
            src: NamedSource::new(source_id, text.to_string()),
            text_len: text.len(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind
    }

    /// 1-based line of the error.
    pub fn line(&self) -> usize {
        self.error.line()
    }

    /// 0-based column of the error within its line.
    pub fn column(&self) -> usize {
        self.error.column()
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }

    /// Unmatched input (lexical errors only).
    pub fn fragment(&self) -> Option<&str> {
        self.error.fragment.as_deref()
    }
}

impl Diagnostic for CompileUnitError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.error.code()
    }

    fn severity(&self) -> Option<Severity> {
        self.error.severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.error.help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        // Clamp to the unit so an error at end of input still renders.
        let text_len = self.text_len;
        let labels = self.error.labels()?.map(move |label| {
            let offset = label.offset().min(text_len);
            let len = label.len().min(text_len - offset);
            LabeledSpan::new(label.label().map(str::to_string), offset, len)
        });
        Some(Box::new(labels))
    }
}

/// Compile one source unit with the default [`FrontendConfig`].
///
/// ## Parameters
/// - `namespace`: Namespace the unit's definitions belong to.
/// - `source_id`: Name reported in errors, usually the file path.
/// - `text`: Source text of the unit.
///
/// ## Errors
/// Returns the first lexical or syntax error; no partial result is produced.
pub fn compile_unit(
    namespace: &Namespace,
    source_id: &str,
    text: &str,
) -> Result<Vec<Spanned<Statement>>, CompileUnitError> {
    compile_unit_with_config(namespace, source_id, text, &FrontendConfig::default())
}

/// [`compile_unit`] with an explicit configuration.
pub fn compile_unit_with_config(
    namespace: &Namespace,
    source_id: &str,
    text: &str,
    config: &FrontendConfig,
) -> Result<Vec<Spanned<Statement>>, CompileUnitError> {
    compile_module(namespace, source_id, text, config).map(|module| module.statements)
}

/// Compile one source unit, keeping its leading doc string.
#[tracing::instrument(skip_all, fields(source_id = %source_id, namespace = %namespace, statement_count = tracing::field::Empty))]
pub fn compile_module(
    namespace: &Namespace,
    source_id: &str,
    text: &str,
    config: &FrontendConfig,
) -> Result<Module, CompileUnitError> {
    let options = config.parse_options(namespace);
    let result = Lexer::new(text)
        .with_fragment_limit(config.fragment_limit)
        .tokenize()
        .and_then(|tokens| parser::parse(&tokens, &options));

    match result {
        Ok(module) => {
            tracing::Span::current().record("statement_count", module.statements.len());
            tracing::debug!(has_doc = module.doc.is_some(), "compiled unit");
            Ok(module)
        }
        Err(error) => {
            tracing::debug!(%error, "compile failed");
            Err(CompileUnitError::new(source_id, text, error))
        }
    }
}
