#![forbid(unsafe_code)]

//! The engine's read view of the element tree.
//!
//! The persistent tree representation lives in an external collaborator;
//! the engine only needs to resolve a path to a *literal* node (one with a
//! unique source location whose props can be rewritten) or learn that the
//! node is *generated* (produced by a list-rendering callback or otherwise
//! unknown to static analysis). Generated nodes cannot be safely
//! manipulated: there is no unique source location to rewrite.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::length::CssLength;
use crate::metadata::Position;
use crate::pins::Pin;
use maquette_core::path::ElementPath;

/// Positional style props of a literal node.
///
/// Stored in a `BTreeMap` so command emission iterates pins in a stable
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleProps {
    pins: BTreeMap<Pin, CssLength>,
}

impl StyleProps {
    /// Look up a pin value.
    #[must_use]
    pub fn get(&self, pin: Pin) -> Option<CssLength> {
        self.pins.get(&pin).copied()
    }

    /// Set a pin value.
    pub fn set(&mut self, pin: Pin, value: CssLength) {
        self.pins.insert(pin, value);
    }

    /// Remove a pin, returning its previous value.
    pub fn remove(&mut self, pin: Pin) -> Option<CssLength> {
        self.pins.remove(&pin)
    }

    /// Iterate pins in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Pin, CssLength)> + '_ {
        self.pins.iter().map(|(pin, len)| (*pin, *len))
    }

    /// Builder-style pin setter for fixtures.
    #[must_use]
    pub fn with(mut self, pin: Pin, value: CssLength) -> Self {
        self.set(pin, value);
        self
    }
}

/// A literal element node with directly-editable props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralNode {
    /// Positional style props.
    pub style: StyleProps,
    /// Explicit `position` prop, if set.
    #[serde(default)]
    pub position: Option<Position>,
    /// Explicit `gap` on a flex container, if set.
    #[serde(default)]
    pub flex_gap: Option<f64>,
    /// Positioning is driven by literal props rather than computed or
    /// passed-through values.
    #[serde(default = "default_true")]
    pub honours_props_position: bool,
    /// References state/props defined in an enclosing scope it would be
    /// moved out of by a reparent.
    #[serde(default)]
    pub references_elsewhere: bool,
}

fn default_true() -> bool {
    true
}

// Must agree with the serde field defaults: a plain literal node honours
// its props-driven position until something says otherwise.
impl Default for LiteralNode {
    fn default() -> Self {
        Self {
            style: StyleProps::default(),
            position: None,
            flex_gap: None,
            honours_props_position: true,
            references_elsewhere: false,
        }
    }
}

impl LiteralNode {
    /// A plain literal node with the given style.
    #[must_use]
    pub fn with_style(style: StyleProps) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }
}

/// One entry in the element tree view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementNode {
    /// A literal node with a unique source location.
    Literal(LiteralNode),
    /// Produced by a generative construct; no rewritable source location.
    Generated,
}

impl ElementNode {
    /// The literal node, if this entry is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&LiteralNode> {
        match self {
            Self::Literal(node) => Some(node),
            Self::Generated => None,
        }
    }
}

/// Read view of the element tree, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct ProjectContents {
    nodes: FxHashMap<ElementPath, ElementNode>,
}

impl ProjectContents {
    /// Empty contents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, path: ElementPath, node: ElementNode) {
        self.nodes.insert(path, node);
    }

    /// Remove an entry, returning it.
    pub fn remove(&mut self, path: &ElementPath) -> Option<ElementNode> {
        self.nodes.remove(path)
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, path: &ElementPath) -> Option<&ElementNode> {
        self.nodes.get(path)
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, path: &ElementPath) -> Option<&mut ElementNode> {
        self.nodes.get_mut(path)
    }

    /// Resolve a path to its literal node, or `None` when the entry is
    /// missing or generated.
    #[must_use]
    pub fn literal(&self, path: &ElementPath) -> Option<&LiteralNode> {
        self.get(path).and_then(ElementNode::as_literal)
    }

    /// True when the entry is unknown to static analysis or generated.
    #[must_use]
    pub fn is_generated(&self, path: &ElementPath) -> bool {
        !matches!(self.get(path), Some(ElementNode::Literal(_)))
    }

    /// All known paths (unordered).
    pub fn paths(&self) -> impl Iterator<Item = &ElementPath> {
        self.nodes.keys()
    }

    /// Move a node (and its descendants' keys) under a new parent.
    ///
    /// Returns the target's new path. The caller is responsible for
    /// checking eligibility first.
    pub fn reparent(
        &mut self,
        target: &ElementPath,
        new_parent: &ElementPath,
    ) -> Option<ElementPath> {
        let new_path = target.reparented_under(new_parent)?;
        if new_path == *target {
            return Some(new_path);
        }
        let moved: Vec<(ElementPath, ElementNode)> = {
            let keys: Vec<ElementPath> = self
                .nodes
                .keys()
                .filter(|path| path.is_descendant_of_or_equal(target))
                .cloned()
                .collect();
            keys.into_iter()
                .filter_map(|old| {
                    let node = self.nodes.remove(&old)?;
                    let suffix = &old.parts()[target.depth()..];
                    let mut rebased = new_path.clone();
                    for part in suffix {
                        rebased = rebased.append(part.clone());
                    }
                    Some((rebased, node))
                })
                .collect()
        };
        for (path, node) in moved {
            self.nodes.insert(path, node);
        }
        Some(new_path)
    }
}
