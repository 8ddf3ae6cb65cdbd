#![forbid(unsafe_code)]

//! Drag snapping against parent and sibling guidelines.
//!
//! The dragged multiselection bounds are compared edge-and-center against
//! every candidate guideline; within the zoom-normalized threshold the
//! nearest guideline per axis overrides the raw drag component. Ties go to
//! the earlier-registered guideline.

use tracing::trace;

use maquette_core::geometry::{Axis, CanvasRect, CanvasVector};
use maquette_core::path::ElementPath;
use maquette_model::guideline::{
    Guideline, GuidelineWithRelevantPoints, GuidelineWithSnappingVector,
};
use maquette_model::metadata::MetadataSnapshot;

/// Snap distance in pixels at 100% zoom; divided by the live scale so the
/// feel is constant on screen. Tunable; pinned by scenario tests.
pub const SNAP_THRESHOLD_PX: f64 = 5.0;

/// The snapping engine's per-frame output.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// The drag with snap deltas applied per axis.
    pub snapped_drag_vector: CanvasVector,
    /// The guidelines that won their axis, with the deltas they induced.
    pub guidelines_with_snapping_vector: Vec<GuidelineWithSnappingVector>,
}

impl SnapResult {
    fn unsnapped(drag: CanvasVector) -> Self {
        Self {
            snapped_drag_vector: drag,
            guidelines_with_snapping_vector: Vec::new(),
        }
    }
}

/// Parent plus siblings of every target, deduplicated in first-seen order,
/// excluding the targets themselves.
#[must_use]
pub fn gather_parent_and_sibling_targets(
    metadata: &MetadataSnapshot,
    targets: &[ElementPath],
) -> Vec<ElementPath> {
    let mut gathered: Vec<ElementPath> = Vec::new();
    let mut push = |path: ElementPath| {
        if !targets.contains(&path) && !gathered.contains(&path) {
            gathered.push(path);
        }
    };
    for target in targets {
        if let Some(parent) = target.parent() {
            push(parent);
        }
        for sibling in metadata.sibling_paths(target) {
            push(sibling);
        }
    }
    gathered
}

/// Edge/center guidelines of every measured snap target, in target order.
#[must_use]
pub fn collect_parent_and_sibling_guidelines(
    metadata: &MetadataSnapshot,
    snap_targets: &[ElementPath],
) -> Vec<GuidelineWithRelevantPoints> {
    snap_targets
        .iter()
        .filter_map(|path| metadata.global_frame(path))
        .flat_map(|frame| Guideline::from_frame(&frame))
        .collect()
}

/// The dragged bounds' snap-relevant coordinates along one axis: start
/// edge, center, end edge.
fn snap_points(bounds: &CanvasRect, axis: Axis) -> [f64; 3] {
    match axis {
        Axis::Horizontal => [bounds.left(), bounds.center_x(), bounds.right()],
        Axis::Vertical => [bounds.top(), bounds.center_y(), bounds.bottom()],
    }
}

/// Snap a drag vector against candidate guidelines.
///
/// A null drag (below the activation threshold) yields the zero vector and
/// no guidelines. An unmeasured selection snaps nothing. Per axis the
/// nearest in-threshold guideline wins; strict-less comparison keeps ties
/// on the earlier-registered guideline. A constrained axis zeroes the
/// other drag component before snapping is attempted.
#[must_use]
pub fn snap_drag(
    drag: Option<CanvasVector>,
    constrained_axis: Option<Axis>,
    metadata: &MetadataSnapshot,
    selected: &[ElementPath],
    guidelines: &[GuidelineWithRelevantPoints],
    scale: f64,
) -> SnapResult {
    let Some(raw) = drag else {
        return SnapResult::unsnapped(CanvasVector::ZERO);
    };
    let drag = match constrained_axis {
        Some(axis) => raw.constrained_to(axis),
        None => raw,
    };

    let Some(bounds) = metadata.multiselect_bounds(selected) else {
        return SnapResult::unsnapped(drag);
    };
    let dragged_bounds = bounds.offset(drag);
    let threshold = SNAP_THRESHOLD_PX / scale;

    let mut snapped = drag;
    let mut winners: Vec<GuidelineWithSnappingVector> = Vec::new();

    for axis in [Axis::Horizontal, Axis::Vertical] {
        let points = snap_points(&dragged_bounds, axis);
        let mut best: Option<(f64, f64, &GuidelineWithRelevantPoints)> = None;

        for candidate in guidelines {
            if candidate.guideline.snap_axis() != axis {
                continue;
            }
            let line = candidate.guideline.position();
            for point in points {
                let distance = (line - point).abs();
                if distance > threshold {
                    continue;
                }
                // Strict less-than keeps the earlier-registered guideline
                // on equal distance.
                if best.is_none_or(|(d, _, _)| distance < d) {
                    best = Some((distance, line - point, candidate));
                }
            }
        }

        if let Some((distance, delta, candidate)) = best {
            trace!(?axis, distance, delta, "drag snapped to guideline");
            let snapping_vector = match axis {
                Axis::Horizontal => CanvasVector::new(delta, 0.0),
                Axis::Vertical => CanvasVector::new(0.0, delta),
            };
            snapped = snapped.plus(snapping_vector);
            winners.push(GuidelineWithSnappingVector {
                guideline: candidate.guideline,
                snapping_vector,
                points_of_relevance: candidate.points.clone(),
            });
        }
    }

    SnapResult {
        snapped_drag_vector: snapped,
        guidelines_with_snapping_vector: winners,
    }
}
