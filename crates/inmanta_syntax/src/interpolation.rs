//! `{{ ref }}` placeholders in string literals.
//!
//! A placeholder holds a dotted identifier chain (`{{ name }}`, `{{ host.ip }}`), optionally padded
//! with whitespace inside the braces. Anything else between `{{` and `}}` is plain text.

use crate::ast::{Expr, Placeholder, Span, Spanned, StringFormat};

/// A placeholder found in a string, before it is turned into an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPlaceholder<'a> {
    /// Full placeholder text, braces included.
    pub raw: &'a str,
    /// Chain segments: `{{ a.b }}` -> `["a", "b"]`.
    pub path: Vec<&'a str>,
}

/// Find every placeholder in `text`, left to right.
pub fn find_placeholders(text: &str) -> Vec<RawPlaceholder<'_>> {
    let mut found = Vec::new();
    let mut from = 0;

    while let Some(open) = text[from..].find("{{").map(|i| from + i) {
        let Some(close) = text[open + 2..].find("}}").map(|i| open + 2 + i) else {
            break;
        };
        let inner = text[open + 2..close].trim();
        match chain(inner) {
            Some(path) => {
                found.push(RawPlaceholder {
                    raw: &text[open..close + 2],
                    path,
                });
                from = close + 2;
            }
            None => from = open + 2,
        }
    }

    found
}

fn chain(inner: &str) -> Option<Vec<&str>> {
    let valid = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    let path: Vec<&str> = inner.split('.').collect();
    path.iter()
        .all(|seg| !seg.is_empty() && seg.chars().all(valid))
        .then_some(path)
}

/// Build `Reference(a)` / `AttributeRef(...)` for a placeholder path.
pub fn chain_to_expr(path: &[&str], span: Span) -> Spanned<Expr> {
    let (first, rest) = match path.split_first() {
        Some(split) => split,
        None => (&"", &[][..]),
    };
    rest.iter().fold(Spanned::new(Expr::Reference(first.to_string()), span), |instance, attr| {
        Spanned::new(
            Expr::AttributeRef {
                instance: Box::new(instance),
                attribute: attr.to_string(),
            },
            span,
        )
    })
}

/// Turn a decoded string literal into `Expr::String`, or `Expr::StringFormat` when it holds
/// placeholders. All placeholder references share the literal's span.
pub fn interpolate(text: String, span: Span) -> Expr {
    let placeholders: Vec<Placeholder> = find_placeholders(&text)
        .into_iter()
        .map(|p| Placeholder {
            reference: chain_to_expr(&p.path, span),
            raw: p.raw.to_string(),
        })
        .collect();

    if placeholders.is_empty() {
        Expr::String(text)
    } else {
        Expr::StringFormat(StringFormat {
            template: text,
            placeholders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_simple_and_dotted() {
        let found = find_placeholders("j{{o}}s {{ c.d }}");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].raw, "{{o}}");
        assert_eq!(found[0].path, vec!["o"]);
        assert_eq!(found[1].raw, "{{ c.d }}");
        assert_eq!(found[1].path, vec!["c", "d"]);
    }

    #[test]
    fn test_non_chain_is_text() {
        assert!(find_placeholders("{{ a + b }} {{}} {{a..b}} {{ .a }}").is_empty());
        assert!(find_placeholders("{{ unterminated").is_empty());
        // A rejected opening does not hide a later placeholder.
        let found = find_placeholders("{{ x {{y}}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw, "{{y}}");
    }

    #[test]
    fn test_interpolate_builds_attribute_chain() {
        let expr = interpolate("j{{c.d}}s".to_string(), Span::default());
        let Expr::StringFormat(format) = expr else {
            panic!("expected string format");
        };
        assert_eq!(format.template, "j{{c.d}}s");
        assert_eq!(format.placeholders.len(), 1);
        assert_eq!(format.placeholders[0].raw, "{{c.d}}");
        assert_eq!(format.placeholders[0].reference.node.to_string(), "c.d");
    }

    #[test]
    fn test_interpolate_plain_string() {
        assert_eq!(interpolate("plain".into(), Span::default()), Expr::String("plain".into()));
    }
}
