#![forbid(unsafe_code)]

//! Geometric primitives in canvas and window space.
//!
//! Canvas space is the zoom/pan-independent coordinate system the element
//! tree is measured in. Window space is raw pointer coordinates from the
//! host. The two are distinct types so a window-space point can never be
//! fed to a canvas-space computation without going through
//! [`CanvasTransform`].
//!
//! Unmeasured geometry (zero-size or not-yet-rendered elements) is
//! represented as `Option<CanvasRect>` = `None` at call sites; nothing in
//! this module produces NaN or infinite coordinates.

use serde::{Deserialize, Serialize};

/// The two drag/layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    /// Create a new canvas point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Offset by a vector.
    #[must_use]
    pub fn offset(self, v: CanvasVector) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }

    /// Vector from `other` to `self`.
    #[must_use]
    pub fn vector_from(self, other: CanvasPoint) -> CanvasVector {
        CanvasVector::new(self.x - other.x, self.y - other.y)
    }
}

/// A displacement in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasVector {
    pub x: f64,
    pub y: f64,
}

impl CanvasVector {
    /// Create a new canvas vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// True if both components are exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Manhattan length, used for drag-activation thresholds.
    #[must_use]
    pub fn manhattan_length(self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    /// Component along an axis.
    #[must_use]
    pub const fn component(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Keep only the component along `axis`, zeroing the other.
    #[must_use]
    pub const fn constrained_to(self, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::new(self.x, 0.0),
            Axis::Vertical => Self::new(0.0, self.y),
        }
    }

    /// Component-wise addition.
    #[must_use]
    pub fn plus(self, other: CanvasVector) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// A rectangle in canvas space.
///
/// Always finite; callers represent unmeasured frames as `Option::None`
/// rather than infinite extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center x coordinate.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> CanvasPoint {
        CanvasPoint::new(self.center_x(), self.center_y())
    }

    /// Origin (top-left corner).
    #[must_use]
    pub const fn origin(&self) -> CanvasPoint {
        CanvasPoint::new(self.x, self.y)
    }

    /// Check whether a point lies inside (edges inclusive on left/top,
    /// exclusive on right/bottom, matching hit testing).
    #[must_use]
    pub fn contains(&self, p: CanvasPoint) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Translate by a vector.
    #[must_use]
    pub fn offset(&self, v: CanvasVector) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.width, self.height)
    }

    /// The smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &CanvasRect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Round position and size to whole pixels.
    ///
    /// Used for intended bounds so downstream consumers see the same
    /// integral frame the layout engine will eventually report.
    #[must_use]
    pub fn round_to_nearest_whole(&self) -> Self {
        Self::new(
            self.x.round(),
            self.y.round(),
            self.width.round(),
            self.height.round(),
        )
    }

    /// Size along an axis.
    #[must_use]
    pub const fn dimension(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Bounding union of measured frames, skipping unmeasured entries.
///
/// Returns `None` when no frame contributes bounds.
#[must_use]
pub fn bounding_rect_array<I>(frames: I) -> Option<CanvasRect>
where
    I: IntoIterator<Item = Option<CanvasRect>>,
{
    frames
        .into_iter()
        .flatten()
        .reduce(|acc, frame| acc.union(&frame))
}

/// A point relative to the parent's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
}

impl LocalPoint {
    /// Create a new local point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle relative to the parent's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LocalRect {
    /// Create a new local rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Origin relative to the parent.
    #[must_use]
    pub const fn origin(&self) -> LocalPoint {
        LocalPoint::new(self.x, self.y)
    }
}

/// A point in window/screen space, before pan and zoom are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowPoint {
    pub x: f64,
    pub y: f64,
}

impl WindowPoint {
    /// Create a new window point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan offset and zoom scale converting window space to canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    /// Canvas-space offset of the window origin.
    pub pan: CanvasVector,
    /// Zoom scale; window pixels per canvas pixel. Always positive.
    pub scale: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            pan: CanvasVector::ZERO,
            scale: 1.0,
        }
    }
}

impl CanvasTransform {
    /// Create a transform from pan offset and zoom scale.
    #[must_use]
    pub const fn new(pan: CanvasVector, scale: f64) -> Self {
        Self { pan, scale }
    }

    /// Convert a window-space point to canvas space.
    #[must_use]
    pub fn window_to_canvas(&self, p: WindowPoint) -> CanvasPoint {
        CanvasPoint::new(p.x / self.scale + self.pan.x, p.y / self.scale + self.pan.y)
    }

    /// Convert a canvas-space point back to window space.
    #[must_use]
    pub fn canvas_to_window(&self, p: CanvasPoint) -> WindowPoint {
        WindowPoint::new((p.x - self.pan.x) * self.scale, (p.y - self.pan.y) * self.scale)
    }
}
