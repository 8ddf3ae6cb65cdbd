#![forbid(unsafe_code)]

//! Snapping guidelines derived from parent and sibling bounds.
//!
//! A guideline is an axis-aligned line in canvas space with a finite span,
//! carrying the points the UI should emphasize when it becomes active. The
//! snapping engine attaches the snap delta it would induce.

use serde::{Deserialize, Serialize};

use maquette_core::geometry::{Axis, CanvasPoint, CanvasRect, CanvasVector};

/// A candidate alignment line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guideline {
    /// A vertical line at constant `x`, snapping horizontal movement.
    XAxis { x: f64, y_top: f64, y_bottom: f64 },
    /// A horizontal line at constant `y`, snapping vertical movement.
    YAxis { y: f64, x_left: f64, x_right: f64 },
}

impl Guideline {
    /// The drag axis this guideline constrains.
    #[must_use]
    pub const fn snap_axis(&self) -> Axis {
        match self {
            Self::XAxis { .. } => Axis::Horizontal,
            Self::YAxis { .. } => Axis::Vertical,
        }
    }

    /// The constant coordinate of the line.
    #[must_use]
    pub const fn position(&self) -> f64 {
        match self {
            Self::XAxis { x, .. } => *x,
            Self::YAxis { y, .. } => *y,
        }
    }

    /// The six edge/center guidelines of a frame, with their relevant
    /// display points, in registration order: left, center-x, right, top,
    /// center-y, bottom.
    #[must_use]
    pub fn from_frame(frame: &CanvasRect) -> Vec<GuidelineWithRelevantPoints> {
        let vertical = |x: f64| Guideline::XAxis {
            x,
            y_top: frame.top(),
            y_bottom: frame.bottom(),
        };
        let horizontal = |y: f64| Guideline::YAxis {
            y,
            x_left: frame.left(),
            x_right: frame.right(),
        };
        vec![
            GuidelineWithRelevantPoints {
                guideline: vertical(frame.left()),
                points: vec![frame.origin(), CanvasPoint::new(frame.left(), frame.bottom())],
            },
            GuidelineWithRelevantPoints {
                guideline: vertical(frame.center_x()),
                points: vec![frame.center()],
            },
            GuidelineWithRelevantPoints {
                guideline: vertical(frame.right()),
                points: vec![
                    CanvasPoint::new(frame.right(), frame.top()),
                    CanvasPoint::new(frame.right(), frame.bottom()),
                ],
            },
            GuidelineWithRelevantPoints {
                guideline: horizontal(frame.top()),
                points: vec![frame.origin(), CanvasPoint::new(frame.right(), frame.top())],
            },
            GuidelineWithRelevantPoints {
                guideline: horizontal(frame.center_y()),
                points: vec![frame.center()],
            },
            GuidelineWithRelevantPoints {
                guideline: horizontal(frame.bottom()),
                points: vec![
                    CanvasPoint::new(frame.left(), frame.bottom()),
                    CanvasPoint::new(frame.right(), frame.bottom()),
                ],
            },
        ]
    }
}

/// A guideline plus the points the UI highlights when it is shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidelineWithRelevantPoints {
    pub guideline: Guideline,
    pub points: Vec<CanvasPoint>,
}

/// An active guideline with the snap delta it induced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidelineWithSnappingVector {
    pub guideline: Guideline,
    /// The delta added to the raw drag on this guideline's axis.
    pub snapping_vector: CanvasVector,
    pub points_of_relevance: Vec<CanvasPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_guidelines_cover_edges_and_centers() {
        let frame = CanvasRect::new(10.0, 20.0, 100.0, 50.0);
        let guidelines = Guideline::from_frame(&frame);
        assert_eq!(guidelines.len(), 6);

        let positions: Vec<(Axis, f64)> = guidelines
            .iter()
            .map(|g| (g.guideline.snap_axis(), g.guideline.position()))
            .collect();
        assert_eq!(
            positions,
            vec![
                (Axis::Horizontal, 10.0),
                (Axis::Horizontal, 60.0),
                (Axis::Horizontal, 110.0),
                (Axis::Vertical, 20.0),
                (Axis::Vertical, 45.0),
                (Axis::Vertical, 70.0),
            ]
        );
    }
}
