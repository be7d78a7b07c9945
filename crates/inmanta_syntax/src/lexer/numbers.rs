//! Number scanning for the Inmanta lexer
//!
//! Handles `-?[0-9]+` integers and `-?[0-9]*\.[0-9]+` floats. There are no exponents, digit
//! separators or radix prefixes.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Position;
use crate::diagnostics::CompileError;

impl Lexer<'_> {
    /// Scan the rest of a number whose first character (`-`, a digit, or `.`) is consumed.
    ///
    /// `after_dot` is set when that first character was the decimal point.
    pub(super) fn scan_number(
        &mut self,
        start: usize,
        position: Position,
        after_dot: bool,
    ) -> Result<TokenKind, CompileError> {
        self.eat_digits();

        let mut is_float = after_dot;
        if !is_float && self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance(); // consume .
            self.eat_digits();
        }

        let text = &self.source[start..self.current_pos];
        if is_float {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| self.error(format!("invalid float literal {text}"), start, position))
        } else {
            text.parse::<i64>()
                .map(TokenKind::Int)
                .map_err(|_| self.error(format!("integer literal {text} is out of range"), start, position))
        }
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }
}
