#![forbid(unsafe_code)]

//! CSS length values and pixel-delta adjustment.
//!
//! A pin's value is either absolute pixels or a percentage of the parent's
//! dimension on the pin's axis. Adjusting a percentage by a pixel delta
//! needs the parent dimension as the denominator; when the parent is
//! unmeasured the percentage is left untouched rather than corrupted.

use serde::{Deserialize, Serialize};

/// A CSS length value for a positional property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CssLength {
    /// Absolute pixels.
    Px(f64),
    /// Percentage of the parent dimension (0..=100 nominally, not clamped).
    Percent(f64),
}

impl CssLength {
    /// Resolve to pixels against a parent dimension.
    ///
    /// Percentages with no measured parent dimension resolve to `None`.
    #[must_use]
    pub fn resolve(self, parent_dimension: Option<f64>) -> Option<f64> {
        match self {
            Self::Px(v) => Some(v),
            Self::Percent(p) => parent_dimension.map(|basis| basis * p / 100.0),
        }
    }

    /// Apply a pixel delta, converting through the percentage basis when
    /// needed.
    ///
    /// A percentage with no parent basis (or a zero-size parent) cannot
    /// express the delta and is returned unchanged.
    #[must_use]
    pub fn adjusted_by(self, delta_px: f64, parent_dimension: Option<f64>) -> CssLength {
        match self {
            Self::Px(v) => Self::Px(v + delta_px),
            Self::Percent(p) => match parent_dimension {
                Some(basis) if basis != 0.0 => Self::Percent(p + delta_px / basis * 100.0),
                _ => Self::Percent(p),
            },
        }
    }
}

/// Creation policy when adjusting a property that may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatePolicy {
    /// Create the property (in pixels) if it does not exist.
    IfMissing,
    /// Only adjust an already-present property.
    ExistingOnly,
}
