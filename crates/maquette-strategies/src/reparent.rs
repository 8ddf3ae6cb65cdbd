#![forbid(unsafe_code)]

//! Reparent eligibility and drop-target finding.
//!
//! An element may only be reparented when it resolves to a literal node
//! whose positioning is driven by its own props and which does not
//! reference anything from a scope it would be moved out of. Eligibility
//! failure is not an error: the interaction stays live and the frame
//! degrades to a "not permitted" cursor.

use tracing::debug;

use maquette_core::geometry::CanvasPoint;
use maquette_core::path::ElementPath;
use maquette_model::command::{Command, CursorKind};
use maquette_model::metadata::MetadataSnapshot;
use maquette_model::tree::ProjectContents;

use crate::strategy::StrategyApplicationResult;

/// True when the entry is unknown to static analysis or produced by a
/// generative construct; such elements have no unique source location to
/// rewrite.
#[must_use]
pub fn is_generated_element(contents: &ProjectContents, target: &ElementPath) -> bool {
    contents.is_generated(target)
}

/// Whether one element may be reparented.
///
/// Generated elements never qualify, regardless of the other conditions.
#[must_use]
pub fn is_allowed_to_reparent(
    contents: &ProjectContents,
    metadata: &MetadataSnapshot,
    target: &ElementPath,
) -> bool {
    if is_generated_element(contents, target) {
        return false;
    }
    if metadata.find(target).is_none() {
        return false;
    }
    match contents.literal(target) {
        Some(node) => !node.references_elsewhere && node.honours_props_position,
        None => false,
    }
}

/// Gate a reparent-producing continuation on the whole multiselection.
///
/// When any target is ineligible the continuation is skipped and the frame
/// carries only the rejection cursor; no layout mutation.
pub fn if_allowed_to_reparent(
    contents: &ProjectContents,
    metadata: &MetadataSnapshot,
    targets: &[ElementPath],
    on_allowed: impl FnOnce() -> StrategyApplicationResult,
) -> StrategyApplicationResult {
    let all_allowed = targets
        .iter()
        .all(|target| is_allowed_to_reparent(contents, metadata, target));
    if all_allowed {
        on_allowed()
    } else {
        debug!("reparent rejected for current selection");
        StrategyApplicationResult::from_commands(vec![Command::SetCursor(
            CursorKind::ReparentNotPermitted,
        )])
    }
}

/// The candidate container under the pointer: the deepest measured literal
/// element containing the point, excluding the dragged subtrees. Later
/// document order wins among equally deep candidates, matching paint
/// order.
#[must_use]
pub fn reparent_target_under_point(
    metadata: &MetadataSnapshot,
    contents: &ProjectContents,
    point: CanvasPoint,
    dragged: &[ElementPath],
) -> Option<ElementPath> {
    let mut best: Option<(usize, ElementPath)> = None;
    for path in metadata.paths_in_order() {
        if dragged
            .iter()
            .any(|d| path.is_descendant_of_or_equal(d))
        {
            continue;
        }
        if is_generated_element(contents, path) {
            continue;
        }
        let Some(frame) = metadata.global_frame(path) else {
            continue;
        };
        if !frame.contains(point) {
            continue;
        }
        let depth = path.depth();
        if best.as_ref().is_none_or(|(d, _)| depth >= *d) {
            best = Some((depth, path.clone()));
        }
    }
    best.map(|(_, path)| path)
}

/// Sibling insertion index from the pointer's position relative to child
/// midpoints along the container's flex direction. Reversed directions
/// count from the other end.
#[must_use]
pub fn flex_insertion_index(
    metadata: &MetadataSnapshot,
    container: &ElementPath,
    point: CanvasPoint,
    dragged: &[ElementPath],
) -> usize {
    let direction = metadata
        .find(container)
        .and_then(|m| m.special.flex_direction)
        .unwrap_or(maquette_model::metadata::FlexDirection::Row);

    let mut index = 0;
    for child in metadata.children_paths(container) {
        if dragged.iter().any(|d| child.is_descendant_of_or_equal(d)) {
            continue;
        }
        let Some(frame) = metadata.global_frame(&child) else {
            continue;
        };
        let (pointer, midpoint) = if direction.is_horizontal() {
            (point.x, frame.center_x())
        } else {
            (point.y, frame.center_y())
        };
        let past = if direction.is_reversed() {
            pointer < midpoint
        } else {
            pointer > midpoint
        };
        if past {
            index += 1;
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_core::geometry::CanvasRect;
    use maquette_model::metadata::{ElementMetadata, FlexDirection};
    use maquette_model::tree::{ElementNode, LiteralNode};

    fn path(s: &str) -> ElementPath {
        ElementPath::from_slash_str(s)
    }

    fn measured(x: f64, y: f64, w: f64, h: f64) -> ElementMetadata {
        ElementMetadata {
            global_frame: Some(CanvasRect::new(x, y, w, h)),
            ..ElementMetadata::default()
        }
    }

    fn literal_contents(paths: &[&str]) -> ProjectContents {
        let mut contents = ProjectContents::new();
        for p in paths {
            contents.insert(path(p), ElementNode::Literal(LiteralNode::default()));
        }
        contents
    }

    #[test]
    fn generated_elements_are_never_allowed() {
        let mut contents = ProjectContents::new();
        contents.insert(path("a/gen"), ElementNode::Generated);
        let metadata = MetadataSnapshot::new().with(path("a/gen"), measured(0.0, 0.0, 10.0, 10.0));
        assert!(!is_allowed_to_reparent(&contents, &metadata, &path("a/gen")));
    }

    #[test]
    fn eligibility_requires_metadata_and_literal_conditions() {
        let mut contents = literal_contents(&["a/ok", "a/pinned", "a/refs"]);
        if let Some(ElementNode::Literal(node)) = contents.get_mut(&path("a/pinned")) {
            node.honours_props_position = false;
        }
        if let Some(ElementNode::Literal(node)) = contents.get_mut(&path("a/refs")) {
            node.references_elsewhere = true;
        }
        let metadata = MetadataSnapshot::new()
            .with(path("a/ok"), measured(0.0, 0.0, 10.0, 10.0))
            .with(path("a/pinned"), measured(0.0, 0.0, 10.0, 10.0))
            .with(path("a/refs"), measured(0.0, 0.0, 10.0, 10.0));

        assert!(is_allowed_to_reparent(&contents, &metadata, &path("a/ok")));
        assert!(!is_allowed_to_reparent(&contents, &metadata, &path("a/pinned")));
        assert!(!is_allowed_to_reparent(&contents, &metadata, &path("a/refs")));
        // Measured nowhere: not allowed.
        assert!(!is_allowed_to_reparent(
            &contents,
            &MetadataSnapshot::new(),
            &path("a/ok")
        ));
    }

    #[test]
    fn ineligible_selection_short_circuits_to_cursor() {
        let mut contents = literal_contents(&["a/ok"]);
        contents.insert(path("a/gen"), ElementNode::Generated);
        let metadata = MetadataSnapshot::new()
            .with(path("a/ok"), measured(0.0, 0.0, 10.0, 10.0))
            .with(path("a/gen"), measured(0.0, 0.0, 10.0, 10.0));

        let result = if_allowed_to_reparent(
            &contents,
            &metadata,
            &[path("a/ok"), path("a/gen")],
            || panic!("continuation must not run"),
        );
        assert_eq!(
            result.commands,
            vec![Command::SetCursor(CursorKind::ReparentNotPermitted)]
        );
    }

    #[test]
    fn target_finding_prefers_deepest_and_skips_dragged() {
        let contents = literal_contents(&["root", "root/panel", "root/panel/inner", "root/card"]);
        let metadata = MetadataSnapshot::new()
            .with(path("root"), measured(0.0, 0.0, 400.0, 400.0))
            .with(path("root/panel"), measured(50.0, 50.0, 200.0, 200.0))
            .with(path("root/panel/inner"), measured(60.0, 60.0, 100.0, 100.0))
            .with(path("root/card"), measured(80.0, 80.0, 40.0, 40.0));

        let hit = reparent_target_under_point(
            &metadata,
            &contents,
            CanvasPoint::new(90.0, 90.0),
            &[path("root/card")],
        );
        assert_eq!(hit, Some(path("root/panel/inner")));

        let outside = reparent_target_under_point(
            &metadata,
            &contents,
            CanvasPoint::new(390.0, 390.0),
            &[path("root/card")],
        );
        assert_eq!(outside, Some(path("root")));
    }

    #[test]
    fn insertion_index_counts_midpoints_along_direction() {
        let mut container_meta = measured(0.0, 0.0, 300.0, 100.0);
        container_meta.special.flex_direction = Some(FlexDirection::Row);
        let metadata = MetadataSnapshot::new()
            .with(path("row"), container_meta)
            .with(path("row/a"), measured(0.0, 0.0, 90.0, 100.0))
            .with(path("row/b"), measured(100.0, 0.0, 90.0, 100.0))
            .with(path("row/c"), measured(200.0, 0.0, 90.0, 100.0));

        let index_at = |x: f64| {
            flex_insertion_index(&metadata, &path("row"), CanvasPoint::new(x, 50.0), &[])
        };
        assert_eq!(index_at(10.0), 0);
        assert_eq!(index_at(60.0), 1);
        assert_eq!(index_at(160.0), 2);
        assert_eq!(index_at(260.0), 3);
    }

    #[test]
    fn reversed_direction_counts_from_the_other_end() {
        let mut container_meta = measured(0.0, 0.0, 300.0, 100.0);
        container_meta.special.flex_direction = Some(FlexDirection::RowReverse);
        let metadata = MetadataSnapshot::new()
            .with(path("row"), container_meta)
            .with(path("row/a"), measured(200.0, 0.0, 90.0, 100.0))
            .with(path("row/b"), measured(100.0, 0.0, 90.0, 100.0));

        let index = flex_insertion_index(
            &metadata,
            &path("row"),
            CanvasPoint::new(260.0, 50.0),
            &[],
        );
        assert_eq!(index, 0);
        let index = flex_insertion_index(
            &metadata,
            &path("row"),
            CanvasPoint::new(170.0, 50.0),
            &[],
        );
        assert_eq!(index, 1);
    }
}
