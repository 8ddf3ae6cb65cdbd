#![forbid(unsafe_code)]

//! Structural element-path identifiers.
//!
//! An [`ElementPath`] names a node in the element tree as the ordered list
//! of instance identifiers from the root down to the node. Equality and
//! ancestor/descendant relations are structural comparisons over that list.
//! Paths are immutable and never recycled; a speculative reparent produces a
//! *new* path, recorded in the session's remap table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One opaque instance identifier within an [`ElementPath`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A hierarchical identifier for a node in the element tree.
///
/// Displayed as `root/child/grandchild`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementPath {
    parts: Vec<ElementId>,
}

impl ElementPath {
    /// Build a path from its parts, root first.
    #[must_use]
    pub fn new(parts: Vec<ElementId>) -> Self {
        Self { parts }
    }

    /// Parse a `a/b/c` string. Convenience for tests and fixtures.
    #[must_use]
    pub fn from_slash_str(s: &str) -> Self {
        Self {
            parts: s.split('/').filter(|p| !p.is_empty()).map(ElementId::from).collect(),
        }
    }

    /// The path parts, root first.
    #[must_use]
    pub fn parts(&self) -> &[ElementId] {
        &self.parts
    }

    /// Number of path segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parts.len()
    }

    /// True for the empty (root container) path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    /// The last instance identifier, if any.
    #[must_use]
    pub fn last(&self) -> Option<&ElementId> {
        self.parts.last()
    }

    /// The parent path, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<ElementPath> {
        if self.parts.is_empty() {
            None
        } else {
            Some(Self {
                parts: self.parts[..self.parts.len() - 1].to_vec(),
            })
        }
    }

    /// Extend this path with one child identifier.
    #[must_use]
    pub fn append(&self, child: ElementId) -> ElementPath {
        let mut parts = self.parts.clone();
        parts.push(child);
        Self { parts }
    }

    /// Structural strict-descendant check.
    #[must_use]
    pub fn is_descendant_of(&self, other: &ElementPath) -> bool {
        self.parts.len() > other.parts.len() && self.parts[..other.parts.len()] == other.parts[..]
    }

    /// Descendant-or-equal check.
    #[must_use]
    pub fn is_descendant_of_or_equal(&self, other: &ElementPath) -> bool {
        self == other || self.is_descendant_of(other)
    }

    /// True when `other` is this path's immediate parent.
    #[must_use]
    pub fn is_child_of(&self, other: &ElementPath) -> bool {
        self.parts.len() == other.parts.len() + 1 && self.is_descendant_of(other)
    }

    /// Rebase this path under a new parent, keeping the last identifier.
    ///
    /// Returns `None` for the root path, which has no identifier to carry.
    #[must_use]
    pub fn reparented_under(&self, new_parent: &ElementPath) -> Option<ElementPath> {
        self.last().map(|id| new_parent.append(id.clone()))
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(part.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_round_trip() {
        let path = ElementPath::from_slash_str("scene/app/card");
        assert_eq!(path.depth(), 3);
        assert_eq!(path.to_string(), "scene/app/card");
    }

    #[test]
    fn parent_and_append() {
        let path = ElementPath::from_slash_str("a/b/c");
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "a/b");
        assert_eq!(parent.append(ElementId::from("c")), path);
        assert!(ElementPath::from_slash_str("").parent().is_none());
    }

    #[test]
    fn descendant_relations_are_structural() {
        let ancestor = ElementPath::from_slash_str("a/b");
        let child = ElementPath::from_slash_str("a/b/c");
        let grandchild = ElementPath::from_slash_str("a/b/c/d");
        let sibling = ElementPath::from_slash_str("a/x/c");

        assert!(child.is_descendant_of(&ancestor));
        assert!(grandchild.is_descendant_of(&ancestor));
        assert!(!ancestor.is_descendant_of(&child));
        assert!(!sibling.is_descendant_of(&ancestor));
        assert!(!child.is_descendant_of(&child));
        assert!(child.is_descendant_of_or_equal(&child));
        assert!(child.is_child_of(&ancestor));
        assert!(!grandchild.is_child_of(&ancestor));
    }

    #[test]
    fn reparented_under_keeps_last_id() {
        let path = ElementPath::from_slash_str("a/b/c");
        let new_parent = ElementPath::from_slash_str("a/x");
        assert_eq!(
            path.reparented_under(&new_parent).unwrap().to_string(),
            "a/x/c"
        );
    }

    #[test]
    fn serde_is_transparent() {
        let path = ElementPath::from_slash_str("a/b");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        let back: ElementPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
