#![forbid(unsafe_code)]

//! Measured element metadata, captured once per committed command batch.
//!
//! A [`MetadataSnapshot`] is produced by the external layout collaborator
//! and held immutable for the duration of an interaction session, so
//! strategies reason against stable inputs even while commands are
//! speculatively applied. Document order is preserved: sibling queries and
//! guideline registration follow the order elements were recorded in.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use maquette_core::geometry::{CanvasRect, LocalRect, bounding_rect_array};
use maquette_core::path::ElementPath;

/// The layout system a container imposes on its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutSystem {
    /// Normal document flow.
    #[default]
    Flow,
    /// Flexbox container.
    Flex,
}

/// Flex main-axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    /// True for row / row-reverse.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// True for the reversed variants.
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// How an element is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

/// Special measurements beyond the plain frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialSizeMeasurements {
    /// How this element itself is positioned.
    #[serde(default)]
    pub position: Position,
    /// Layout system of the element's parent.
    #[serde(default)]
    pub parent_layout_system: LayoutSystem,
    /// Flex direction of the parent, when the parent is a flex container.
    #[serde(default)]
    pub parent_flex_direction: Option<FlexDirection>,
    /// Gap of the parent flex container, in pixels.
    #[serde(default)]
    pub parent_flex_gap: f64,
    /// Layout system this element imposes on its own children.
    #[serde(default)]
    pub layout_system_for_children: LayoutSystem,
    /// Own flex direction, when this element is a flex container.
    #[serde(default)]
    pub flex_direction: Option<FlexDirection>,
    /// Own flex gap, in pixels.
    #[serde(default)]
    pub flex_gap: f64,
    /// Canvas bounds of the nearest positioned ancestor; the coordinate
    /// system pins resolve against.
    #[serde(default)]
    pub coordinate_system_bounds: Option<CanvasRect>,
}

/// One element's measured snapshot entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementMetadata {
    /// Measured frame in canvas space; `None` when unmeasured.
    pub global_frame: Option<CanvasRect>,
    /// Measured frame relative to the parent's coordinate system.
    pub local_frame: Option<LocalRect>,
    /// Special measurements.
    #[serde(default)]
    pub special: SpecialSizeMeasurements,
}

/// Read-only measured-metadata snapshot keyed by element path.
#[derive(Debug, Clone, Default)]
pub struct MetadataSnapshot {
    entries: FxHashMap<ElementPath, ElementMetadata>,
    /// Document order of recorded paths.
    order: Vec<ElementPath>,
}

impl MetadataSnapshot {
    /// Empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an element's measurements. Re-recording a path replaces the
    /// entry but keeps its original document-order slot.
    pub fn record(&mut self, path: ElementPath, metadata: ElementMetadata) {
        if self.entries.insert(path.clone(), metadata).is_none() {
            self.order.push(path);
        }
    }

    /// Builder-style record for fixtures.
    #[must_use]
    pub fn with(mut self, path: ElementPath, metadata: ElementMetadata) -> Self {
        self.record(path, metadata);
        self
    }

    /// Find an element's entry.
    #[must_use]
    pub fn find(&self, path: &ElementPath) -> Option<&ElementMetadata> {
        self.entries.get(path)
    }

    /// Measured canvas frame, `None` when missing or unmeasured.
    #[must_use]
    pub fn global_frame(&self, path: &ElementPath) -> Option<CanvasRect> {
        self.find(path).and_then(|m| m.global_frame)
    }

    /// Measured local frame.
    #[must_use]
    pub fn local_frame(&self, path: &ElementPath) -> Option<LocalRect> {
        self.find(path).and_then(|m| m.local_frame)
    }

    /// All recorded paths in document order.
    #[must_use]
    pub fn paths_in_order(&self) -> &[ElementPath] {
        &self.order
    }

    /// Immediate children of `parent`, in document order.
    #[must_use]
    pub fn children_paths(&self, parent: &ElementPath) -> Vec<ElementPath> {
        self.order
            .iter()
            .filter(|path| path.is_child_of(parent))
            .cloned()
            .collect()
    }

    /// Siblings of `target` (sharing its parent, excluding itself), in
    /// document order. Empty for root paths.
    #[must_use]
    pub fn sibling_paths(&self, target: &ElementPath) -> Vec<ElementPath> {
        match target.parent() {
            Some(parent) => self
                .children_paths(&parent)
                .into_iter()
                .filter(|path| path != target)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether the element is absolutely positioned.
    #[must_use]
    pub fn is_position_absolute(&self, path: &ElementPath) -> bool {
        self.find(path)
            .is_some_and(|m| m.special.position == Position::Absolute)
    }

    /// Whether the element lays out its children with flexbox.
    #[must_use]
    pub fn is_flex_container(&self, path: &ElementPath) -> bool {
        self.find(path)
            .is_some_and(|m| m.special.layout_system_for_children == LayoutSystem::Flex)
    }

    /// Whether the element participates in a parent flex container.
    #[must_use]
    pub fn is_flex_child(&self, path: &ElementPath) -> bool {
        self.find(path)
            .is_some_and(|m| m.special.parent_layout_system == LayoutSystem::Flex)
    }

    /// Bounding union of the selection's measured frames, ignoring
    /// unmeasured entries.
    #[must_use]
    pub fn multiselect_bounds(&self, selected: &[ElementPath]) -> Option<CanvasRect> {
        bounding_rect_array(selected.iter().map(|path| self.global_frame(path)))
    }

    /// True when every element in a non-empty selection is not absolutely
    /// positioned (i.e. flex/static participants).
    #[must_use]
    pub fn all_selected_non_absolute(&self, selected: &[ElementPath]) -> bool {
        !selected.is_empty() && selected.iter().all(|path| !self.is_position_absolute(path))
    }

    /// True when every element in a non-empty selection is absolutely
    /// positioned.
    #[must_use]
    pub fn all_selected_absolute(&self, selected: &[ElementPath]) -> bool {
        !selected.is_empty() && selected.iter().all(|path| self.is_position_absolute(path))
    }
}
