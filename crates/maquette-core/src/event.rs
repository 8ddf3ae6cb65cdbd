#![forbid(unsafe_code)]

//! Canonical pointer input for the interaction engine.
//!
//! The host delivers pointer events in window space together with the
//! modifier keys held at the time of the event. Modifier semantics used by
//! the strategies:
//!
//! - `SHIFT` constrains a drag to its dominant axis.
//! - `CMD` signals reparent intent during a drag, and bypasses snapping
//!   ("force absolute" direct move).
//! - `ALT` combined with `CMD` forces absolute insertion even over flex
//!   containers.

use bitflags::bitflags;

use crate::geometry::WindowPoint;

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Command/Super key.
        const CMD   = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    /// Shift held.
    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Alt held.
    #[must_use]
    pub const fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    /// Command held.
    #[must_use]
    pub const fn cmd(self) -> bool {
        self.contains(Self::CMD)
    }
}

/// The phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Button pressed; a gesture begins.
    Down,
    /// Pointer moved while the gesture is live.
    Move,
    /// Button released; the gesture commits.
    Up,
    /// Gesture aborted (escape, focus loss); nothing commits.
    Cancel,
}

/// A pointer event in window space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Gesture phase.
    pub phase: PointerPhase,
    /// Pointer position in window space.
    pub position: WindowPoint,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event with no modifiers.
    #[must_use]
    pub const fn new(phase: PointerPhase, position: WindowPoint) -> Self {
        Self {
            phase,
            position,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
