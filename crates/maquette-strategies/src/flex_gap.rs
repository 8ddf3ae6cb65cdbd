#![forbid(unsafe_code)]

//! Flex-gap control geometry and drag mapping.
//!
//! The gap control is the strip between two consecutive flex children.
//! Dragging it adjusts the container's `gap` by the drag component along
//! the container's main axis, clamped at zero.

use maquette_core::geometry::{CanvasRect, CanvasVector};
use maquette_core::path::ElementPath;
use maquette_model::command::CursorKind;
use maquette_model::metadata::{FlexDirection, MetadataSnapshot};

/// The drag component that adjusts the gap for a given flex direction.
/// Reversed directions flip the sign so dragging "outward" always grows
/// the gap.
#[must_use]
pub fn drag_delta_for_orientation(drag: CanvasVector, direction: FlexDirection) -> f64 {
    let component = if direction.is_horizontal() {
        drag.x
    } else {
        drag.y
    };
    if direction.is_reversed() {
        -component
    } else {
        component
    }
}

/// Cursor hint while adjusting a gap: resizing the space between columns
/// or rows.
#[must_use]
pub fn cursor_for_flex_direction(direction: FlexDirection) -> CursorKind {
    if direction.is_horizontal() {
        CursorKind::ColResize
    } else {
        CursorKind::RowResize
    }
}

/// The strips between consecutive children, in document order, spanning
/// the container's cross extent.
#[must_use]
pub fn gap_control_bounds(
    container_frame: CanvasRect,
    children_frames: &[CanvasRect],
    direction: FlexDirection,
) -> Vec<CanvasRect> {
    children_frames
        .windows(2)
        .filter_map(|pair| {
            let (before, after) = (pair[0], pair[1]);
            if direction.is_horizontal() {
                let start = before.right();
                let end = after.left();
                (end > start).then(|| {
                    CanvasRect::new(
                        start,
                        container_frame.top(),
                        end - start,
                        container_frame.height,
                    )
                })
            } else {
                let start = before.bottom();
                let end = after.top();
                (end > start).then(|| {
                    CanvasRect::new(
                        container_frame.left(),
                        start,
                        container_frame.width,
                        end - start,
                    )
                })
            }
        })
        .collect()
}

/// [`gap_control_bounds`] resolved from the metadata snapshot. Unmeasured
/// containers or children yield no controls.
#[must_use]
pub fn gap_control_bounds_from_metadata(
    metadata: &MetadataSnapshot,
    container: &ElementPath,
) -> Vec<CanvasRect> {
    let Some(container_frame) = metadata.global_frame(container) else {
        return Vec::new();
    };
    let direction = metadata
        .find(container)
        .and_then(|m| m.special.flex_direction)
        .unwrap_or(FlexDirection::Row);
    let children_frames: Vec<CanvasRect> = metadata
        .children_paths(container)
        .iter()
        .filter_map(|child| metadata.global_frame(child))
        .collect();
    gap_control_bounds(container_frame, &children_frames, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_model::metadata::ElementMetadata;

    fn path(s: &str) -> ElementPath {
        ElementPath::from_slash_str(s)
    }

    #[test]
    fn delta_follows_main_axis_and_flips_when_reversed() {
        let drag = CanvasVector::new(8.0, -3.0);
        assert_eq!(drag_delta_for_orientation(drag, FlexDirection::Row), 8.0);
        assert_eq!(drag_delta_for_orientation(drag, FlexDirection::RowReverse), -8.0);
        assert_eq!(drag_delta_for_orientation(drag, FlexDirection::Column), -3.0);
        assert_eq!(drag_delta_for_orientation(drag, FlexDirection::ColumnReverse), 3.0);
    }

    #[test]
    fn cursor_matches_orientation() {
        assert_eq!(cursor_for_flex_direction(FlexDirection::Row), CursorKind::ColResize);
        assert_eq!(cursor_for_flex_direction(FlexDirection::Column), CursorKind::RowResize);
    }

    #[test]
    fn row_gap_strips_sit_between_children() {
        let container = CanvasRect::new(0.0, 0.0, 300.0, 100.0);
        let children = vec![
            CanvasRect::new(0.0, 0.0, 90.0, 100.0),
            CanvasRect::new(100.0, 0.0, 90.0, 100.0),
            CanvasRect::new(200.0, 0.0, 90.0, 100.0),
        ];
        let strips = gap_control_bounds(container, &children, FlexDirection::Row);
        assert_eq!(
            strips,
            vec![
                CanvasRect::new(90.0, 0.0, 10.0, 100.0),
                CanvasRect::new(190.0, 0.0, 10.0, 100.0),
            ]
        );
    }

    #[test]
    fn touching_children_produce_no_strip() {
        let container = CanvasRect::new(0.0, 0.0, 200.0, 100.0);
        let children = vec![
            CanvasRect::new(0.0, 0.0, 100.0, 100.0),
            CanvasRect::new(100.0, 0.0, 100.0, 100.0),
        ];
        assert!(gap_control_bounds(container, &children, FlexDirection::Row).is_empty());
    }

    #[test]
    fn metadata_resolution_uses_measured_children() {
        let mut container_meta = ElementMetadata {
            global_frame: Some(CanvasRect::new(0.0, 0.0, 100.0, 300.0)),
            ..ElementMetadata::default()
        };
        container_meta.special.flex_direction = Some(FlexDirection::Column);
        let metadata = MetadataSnapshot::new()
            .with(path("col"), container_meta)
            .with(
                path("col/a"),
                ElementMetadata {
                    global_frame: Some(CanvasRect::new(0.0, 0.0, 100.0, 120.0)),
                    ..ElementMetadata::default()
                },
            )
            .with(
                path("col/b"),
                ElementMetadata {
                    global_frame: Some(CanvasRect::new(0.0, 140.0, 100.0, 120.0)),
                    ..ElementMetadata::default()
                },
            );

        let strips = gap_control_bounds_from_metadata(&metadata, &path("col"));
        assert_eq!(strips, vec![CanvasRect::new(0.0, 120.0, 100.0, 20.0)]);
    }
}
