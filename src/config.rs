//! Front-end configuration.

use inmanta_syntax::diagnostics::DEFAULT_FRAGMENT_LIMIT;
use inmanta_syntax::parser::{DEFAULT_BASE_TYPE, ParseOptions};

use crate::namespace::Namespace;

/// Settings for compiling source units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Parent of entities declared without `extends`
    pub implicit_base_type: String,
    /// Characters of unmatched input kept in lexical errors
    pub fragment_limit: usize,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            implicit_base_type: DEFAULT_BASE_TYPE.to_string(),
            fragment_limit: DEFAULT_FRAGMENT_LIMIT,
        }
    }
}

impl FrontendConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the implicit parent type
    pub fn with_implicit_base_type(mut self, base: impl Into<String>) -> Self {
        self.implicit_base_type = base.into();
        self
    }

    /// Set how much unmatched input a lexical error keeps
    pub fn with_fragment_limit(mut self, limit: usize) -> Self {
        self.fragment_limit = limit;
        self
    }

    /// Parser options for a unit compiled into `namespace`.
    pub fn parse_options(&self, namespace: &Namespace) -> ParseOptions {
        ParseOptions {
            implicit_base_type: self.implicit_base_type.clone(),
            namespace: namespace.full_name(),
        }
    }
}
