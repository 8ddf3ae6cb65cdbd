#![forbid(unsafe_code)]

//! Edge-handle resize math.
//!
//! A resize handle sits at one of nine positions on the selection frame
//! (corners, edge midpoints, center). Dragging a handle on the start edge
//! of an axis shrinks the element as the drag grows; the end edge grows
//! with the drag; a midpoint handle leaves the cross axis untouched.

use maquette_core::geometry::{Axis, CanvasRect, CanvasVector, LocalRect};
use maquette_core::path::ElementPath;
use maquette_model::command::{
    AdjustLengthProperties, Command, CursorKind, FrameAndTarget, LengthPropertyToAdjust,
};
use maquette_model::length::CreatePolicy;
use maquette_model::metadata::FlexDirection;
use maquette_model::pins::Pin;
use maquette_model::tree::LiteralNode;

use crate::move_helpers::MoveCommandsResult;

/// Where an edge handle sits along one axis of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeFraction {
    /// The start edge (left or top).
    Start,
    /// The midpoint; no resize on this axis.
    Mid,
    /// The end edge (right or bottom).
    End,
}

impl EdgeFraction {
    /// Sign applied to the drag component on this axis: the start edge
    /// shrinks on a positive drag, the end edge grows, midpoints ignore it.
    #[must_use]
    pub const fn size_sign(self) -> f64 {
        match self {
            Self::Start => -1.0,
            Self::Mid => 0.0,
            Self::End => 1.0,
        }
    }
}

/// A resize handle position on the selection frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgePosition {
    pub x: EdgeFraction,
    pub y: EdgeFraction,
}

impl EdgePosition {
    pub const TOP_LEFT: Self = Self::new(EdgeFraction::Start, EdgeFraction::Start);
    pub const TOP_RIGHT: Self = Self::new(EdgeFraction::End, EdgeFraction::Start);
    pub const BOTTOM_LEFT: Self = Self::new(EdgeFraction::Start, EdgeFraction::End);
    pub const BOTTOM_RIGHT: Self = Self::new(EdgeFraction::End, EdgeFraction::End);
    pub const LEFT: Self = Self::new(EdgeFraction::Start, EdgeFraction::Mid);
    pub const RIGHT: Self = Self::new(EdgeFraction::End, EdgeFraction::Mid);
    pub const TOP: Self = Self::new(EdgeFraction::Mid, EdgeFraction::Start);
    pub const BOTTOM: Self = Self::new(EdgeFraction::Mid, EdgeFraction::End);

    /// Construct a handle position.
    #[must_use]
    pub const fn new(x: EdgeFraction, y: EdgeFraction) -> Self {
        Self { x, y }
    }

    /// Signed size delta induced by a drag vector on the given axis.
    #[must_use]
    pub fn size_delta(&self, drag: CanvasVector, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x.size_sign() * drag.x,
            Axis::Vertical => self.y.size_sign() * drag.y,
        }
    }
}

/// Cursor hint for a handle position.
#[must_use]
pub fn cursor_for_edge(edge: EdgePosition) -> CursorKind {
    match (edge.x, edge.y) {
        (EdgeFraction::Mid, EdgeFraction::Mid) => CursorKind::Move,
        (EdgeFraction::Mid, _) => CursorKind::ResizeNs,
        (_, EdgeFraction::Mid) => CursorKind::ResizeEw,
        (EdgeFraction::Start, EdgeFraction::Start) | (EdgeFraction::End, EdgeFraction::End) => {
            CursorKind::ResizeNwse
        }
        (EdgeFraction::Start, EdgeFraction::End) | (EdgeFraction::End, EdgeFraction::Start) => {
            CursorKind::ResizeNesw
        }
    }
}

/// Build the resize command batch for one element.
///
/// Size pins are adjusted by the signed drag component; a missing size pin
/// is created from the measured frame plus the delta. When the element is
/// absolutely positioned and a start edge is grabbed, the matching anchor
/// pin shifts with the drag so the opposite edge stays put.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn create_resize_commands_for_element(
    node: &LiteralNode,
    target: &ElementPath,
    mapped_path: &ElementPath,
    drag: CanvasVector,
    edge: EdgePosition,
    is_absolute: bool,
    local_frame: Option<LocalRect>,
    global_frame: Option<CanvasRect>,
    parent_bounds: Option<CanvasRect>,
    parent_flex_direction: Option<FlexDirection>,
) -> MoveCommandsResult {
    let width_delta = edge.size_delta(drag, Axis::Horizontal);
    let height_delta = edge.size_delta(drag, Axis::Vertical);

    let mut properties = Vec::new();

    // Missing size pins are created from the measured size so the created
    // value lands on measured + delta, not on the bare delta.
    let width_offset = match node.style.get(Pin::Width) {
        Some(_) => 0.0,
        None => global_frame.map_or(0.0, |f| f.width),
    };
    let height_offset = match node.style.get(Pin::Height) {
        Some(_) => 0.0,
        None => global_frame.map_or(0.0, |f| f.height),
    };

    if edge.x != EdgeFraction::Mid {
        properties.push(LengthPropertyToAdjust::new(
            Pin::Width,
            width_offset + width_delta,
            parent_bounds.map(|b| b.width),
            CreatePolicy::IfMissing,
        ));
    }
    if edge.y != EdgeFraction::Mid {
        properties.push(LengthPropertyToAdjust::new(
            Pin::Height,
            height_offset + height_delta,
            parent_bounds.map(|b| b.height),
            CreatePolicy::IfMissing,
        ));
    }

    // Absolutely positioned elements keep their opposite edge fixed by
    // shifting the start anchor with the drag.
    if is_absolute {
        if edge.x == EdgeFraction::Start {
            let offset = match node.style.get(Pin::Left) {
                Some(_) => 0.0,
                None => local_frame.map_or(0.0, |f| f.x),
            };
            properties.push(LengthPropertyToAdjust::new(
                Pin::Left,
                offset + drag.x,
                parent_bounds.map(|b| b.width),
                CreatePolicy::IfMissing,
            ));
        }
        if edge.y == EdgeFraction::Start {
            let offset = match node.style.get(Pin::Top) {
                Some(_) => 0.0,
                None => local_frame.map_or(0.0, |f| f.y),
            };
            properties.push(LengthPropertyToAdjust::new(
                Pin::Top,
                offset + drag.y,
                parent_bounds.map(|b| b.height),
                CreatePolicy::IfMissing,
            ));
        }
    }

    if properties.is_empty() {
        return MoveCommandsResult::empty();
    }

    let commands = vec![Command::AdjustLengthProperties(AdjustLengthProperties {
        target: target.clone(),
        parent_flex_direction,
        properties,
    })];

    let intended_bounds = global_frame
        .map(|frame| {
            let x = if edge.x == EdgeFraction::Start {
                frame.x + drag.x
            } else {
                frame.x
            };
            let y = if edge.y == EdgeFraction::Start {
                frame.y + drag.y
            } else {
                frame.y
            };
            let intended = CanvasRect::new(
                x,
                y,
                (frame.width + width_delta).max(0.0),
                (frame.height + height_delta).max(0.0),
            )
            .round_to_nearest_whole();
            vec![FrameAndTarget {
                target: mapped_path.clone(),
                frame: intended,
            }]
        })
        .unwrap_or_default();

    MoveCommandsResult {
        commands,
        intended_bounds,
    }
}
