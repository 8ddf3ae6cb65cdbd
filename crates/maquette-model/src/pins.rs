#![forbid(unsafe_code)]

//! Positional style properties ("pins") and the per-axis completeness rule.
//!
//! # Invariants
//!
//! 1. After any move/resize command batch, each axis of a manipulated
//!    element carries at least one anchor pin plus a size pin.
//! 2. A dimension with zero anchor pins synthesizes its default anchor:
//!    `left` horizontally, `top` vertically. `center_x`/`center_y` are
//!    modeled but never synthesized.
//! 3. `right` and `bottom` grow opposite to the drag direction; their
//!    deltas are negated.

use serde::{Deserialize, Serialize};

use crate::tree::StyleProps;
use maquette_core::geometry::Axis;

/// A named positional/size style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pin {
    Left,
    Top,
    Right,
    Bottom,
    Width,
    Height,
    CenterX,
    CenterY,
}

/// Anchor pins on the horizontal axis, in synthesis priority order.
pub const HORIZONTAL_ANCHOR_PINS: [Pin; 2] = [Pin::Left, Pin::Right];

/// Anchor pins on the vertical axis, in synthesis priority order.
pub const VERTICAL_ANCHOR_PINS: [Pin; 2] = [Pin::Top, Pin::Bottom];

impl Pin {
    /// The axis this pin constrains.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right | Self::Width | Self::CenterX => Axis::Horizontal,
            Self::Top | Self::Bottom | Self::Height | Self::CenterY => Axis::Vertical,
        }
    }

    /// True for pins that anchor a position (as opposed to sizing).
    #[must_use]
    pub const fn is_anchor(self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::Top | Self::Bottom | Self::CenterX | Self::CenterY
        )
    }

    /// True for size pins.
    #[must_use]
    pub const fn is_size(self) -> bool {
        matches!(self, Self::Width | Self::Height)
    }

    /// Whether a positive drag delta decreases this pin's value.
    ///
    /// Dragging right by `d` increases `left` by `d` but decreases `right`
    /// by `d`; symmetric for `top`/`bottom`.
    #[must_use]
    pub const fn negates_delta(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }

    /// The CSS property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Width => "width",
            Self::Height => "height",
            Self::CenterX => "center-x",
            Self::CenterY => "center-y",
        }
    }
}

/// Result of the per-axis pin completeness pass.
///
/// `existing` holds the pins already present in the element's props;
/// `extended` is the full working set (existing plus any synthesized
/// defaults). Callers use the distinction to decide whether the incoming
/// delta must be offset by the element's measured position (pre-existing
/// pin) or is absolute from zero (new pin).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinExtension {
    pub existing: Vec<Pin>,
    pub extended: Vec<Pin>,
}

impl PinExtension {
    /// True when `pin` was synthesized rather than already present.
    #[must_use]
    pub fn is_new_pin(&self, pin: Pin) -> bool {
        !self.existing.contains(&pin)
    }
}

/// Inspect an element's style props per axis and synthesize the default
/// anchor (`left` / `top`) for any axis with no anchor pin set.
#[must_use]
pub fn ensure_pins_for_dimension(props: &StyleProps) -> PinExtension {
    let existing_horizontal: Vec<Pin> = HORIZONTAL_ANCHOR_PINS
        .into_iter()
        .filter(|pin| props.get(*pin).is_some())
        .collect();
    let existing_vertical: Vec<Pin> = VERTICAL_ANCHOR_PINS
        .into_iter()
        .filter(|pin| props.get(*pin).is_some())
        .collect();

    let mut extended_horizontal = existing_horizontal.clone();
    if extended_horizontal.is_empty() {
        extended_horizontal.push(Pin::Left);
    }
    let mut extended_vertical = existing_vertical.clone();
    if extended_vertical.is_empty() {
        extended_vertical.push(Pin::Top);
    }

    let mut existing = existing_horizontal;
    existing.extend(existing_vertical);
    let mut extended = extended_horizontal;
    extended.extend(extended_vertical);

    PinExtension { existing, extended }
}
