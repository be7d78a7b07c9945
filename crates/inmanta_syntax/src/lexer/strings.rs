//! String scanning for the Inmanta lexer
//!
//! Double-quoted strings are single-line. The raw body is extracted first and escape-decoded
//! afterwards; `{{ ... }}` placeholders are left untouched for the parser.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Position;
use crate::diagnostics::CompileError;

impl Lexer<'_> {
    /// Scan a string body; the opening quote is already consumed.
    pub(super) fn scan_string(&mut self, start: usize, position: Position) -> Result<TokenKind, CompileError> {
        let body_start = self.current_pos;
        loop {
            match self.peek() {
                None | Some('\n') => return Err(self.error("unterminated string literal", start, position)),
                Some('"') => break,
                Some('\\') => {
                    self.advance();
                    // An escaped newline still ends the line, and with it the string.
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        let raw = &self.source[body_start..self.current_pos];
        self.advance(); // closing quote

        unescape(raw)
            .map(TokenKind::String)
            .map_err(|msg| self.error(msg, start, position))
    }
}

/// Decode backslash escapes.
///
/// Supports `\\ \' \" \a \b \f \n \r \t \v`, octal `\o`..`\ooo`, `\xHH`, `\uHHHH` and
/// `\UHHHHHHHH`. Unknown escapes are kept verbatim (backslash included).
pub(crate) fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(code_point(value, esc)?);
            }
            'x' => out.push(hex_escape(&mut chars, 2, 'x')?),
            'u' => out.push(hex_escape(&mut chars, 4, 'u')?),
            'U' => out.push(hex_escape(&mut chars, 8, 'U')?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn hex_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, digits: usize, kind: char) -> Result<char, String> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| format!("truncated \\{kind} escape: expected {digits} hex digits"))?;
        value = value * 16 + digit;
    }
    code_point(value, kind)
}

fn code_point(value: u32, kind: char) -> Result<char, String> {
    char::from_u32(value).ok_or_else(|| format!("\\{kind} escape {value:#x} is not a valid character"))
}
