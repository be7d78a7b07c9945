//! Namespace stub.
//!
//! A namespace anchors the qualified names of a source unit (`mymodule::sub`) to the root of the
//! module tree. At this layer it is inert: names are printed against it in logs and diagnostics,
//! and the `std` namespace decides whether `entity Entity` gets an implicit parent. Resolving
//! names against the tree is left to the semantic phase.

use std::fmt;
use std::sync::Arc;

/// Separator between namespace segments.
pub const SEPARATOR: &str = "::";

/// A node in the namespace tree. Cheap to clone; parents are shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    name: String,
    parent: Option<Arc<Namespace>>,
}

impl Namespace {
    /// The unnamed root every module hangs off.
    pub fn root() -> Self {
        Self {
            name: String::new(),
            parent: None,
        }
    }

    /// `child` nested directly under `self`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Build `a::b::c` from the root down. Empty segments are skipped.
    pub fn from_path(path: &str) -> Self {
        path.split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .fold(Self::root(), |ns, segment| ns.child(segment))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Namespace> {
        self.parent.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Segments from the top-level module down to `self`; empty for the root.
    pub fn path(&self) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(ns) = current {
            if !ns.is_root() {
                segments.push(ns.name.as_str());
            }
            current = ns.parent();
        }
        segments.reverse();
        segments
    }

    /// `a::b::c`; the root's full name is empty.
    pub fn full_name(&self) -> String {
        self.path().join(SEPARATOR)
    }

    /// Prefix `name` with this namespace: `a::b` + `File` -> `a::b::File`.
    pub fn qualify(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{}{SEPARATOR}{name}", self.full_name())
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.full_name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_skips_root() {
        let ns = Namespace::root().child("ip").child("services");
        assert_eq!(ns.full_name(), "ip::services");
        assert_eq!(ns.name(), "services");
        assert_eq!(ns.parent().map(Namespace::full_name).as_deref(), Some("ip"));
        assert_eq!(Namespace::root().full_name(), "");
    }

    #[test]
    fn test_from_path_matches_children() {
        assert_eq!(Namespace::from_path("a::b::c"), Namespace::root().child("a").child("b").child("c"));
        assert_eq!(Namespace::from_path(""), Namespace::root());
        assert!(Namespace::from_path("").is_root());
    }

    #[test]
    fn test_qualify_and_display() {
        let ns = Namespace::from_path("std");
        assert_eq!(ns.qualify("Entity"), "std::Entity");
        assert_eq!(Namespace::root().qualify("Entity"), "Entity");
        assert_eq!(ns.to_string(), "std");
        assert_eq!(Namespace::root().to_string(), "<root>");
    }
}
