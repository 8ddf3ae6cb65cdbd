#![forbid(unsafe_code)]

//! Interaction session state spanning one pointer gesture.
//!
//! An [`InteractionSession`] is created on pointer-down, mutated in place
//! across pointer-move frames, and discarded on pointer-up/cancel. The
//! measured-metadata snapshot it reasons against is captured once at
//! interaction start and held immutable, so strategies see stable inputs
//! even as commands are speculatively applied.
//!
//! # Invariants
//!
//! 1. `DragInput::drag` stays `None` until the accumulated movement
//!    exceeds the activation threshold; a below-threshold gesture is a
//!    true no-op.
//! 2. `updated_target_paths` is rebuilt each frame from the previous
//!    frame's commands, never mutated in place, keeping frames replayable.
//! 3. Strategy scratch state is a tagged union keyed by strategy family;
//!    one strategy cannot observe another's scratch.

use rustc_hash::FxHashMap;

use crate::resize_helpers::EdgePosition;
use maquette_core::event::Modifiers;
use maquette_core::geometry::{CanvasPoint, CanvasVector};
use maquette_core::path::ElementPath;
use maquette_model::metadata::MetadataSnapshot;
use maquette_model::tree::ProjectContents;

/// Identifier of a registered strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrategyId(pub &'static str);

impl StrategyId {
    /// Forced variants are never the default choice; they are picked via
    /// the strategy selector or a modifier that signals explicit intent.
    #[must_use]
    pub fn is_forced(self) -> bool {
        self.0.starts_with("FORCED_")
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Which control the pointer grabbed at gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveControl {
    /// The element body / bounding area; moves and reparents.
    BoundingArea,
    /// An edge or corner resize handle.
    ResizeHandle(EdgePosition),
    /// The gap strip between two flex children.
    FlexGapHandle,
}

/// Drag interaction data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInput {
    /// Pointer-down position in canvas space.
    pub start: CanvasPoint,
    /// Accumulated movement, including below-threshold movement.
    pub raw_movement: CanvasVector,
    /// The active drag vector; `None` until movement exceeds the
    /// activation threshold.
    pub drag: Option<CanvasVector>,
    /// Modifiers held during the latest event.
    pub modifiers: Modifiers,
}

impl DragInput {
    /// A fresh drag at the given canvas point.
    #[must_use]
    pub fn starting_at(start: CanvasPoint) -> Self {
        Self {
            start,
            raw_movement: CanvasVector::ZERO,
            drag: None,
            modifiers: Modifiers::NONE,
        }
    }

    /// Current pointer position (start plus raw movement).
    #[must_use]
    pub fn current_point(&self) -> CanvasPoint {
        self.start.offset(self.raw_movement)
    }
}

/// The discriminated interaction kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionInput {
    /// Pointer drag.
    Drag(DragInput),
    /// Keyboard nudge (arrow keys); carries only modifiers.
    Keyboard { modifiers: Modifiers },
    /// Hover without a pressed button.
    Hover {
        point: CanvasPoint,
        modifiers: Modifiers,
    },
}

/// Per-strategy scratch state carried across frames.
///
/// Tagged by strategy family so scratch is strongly typed and private.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CustomStrategyState {
    /// No scratch.
    #[default]
    None,
    /// Reparent family scratch.
    Reparent {
        /// The container last targeted, for hover-stability and highlight
        /// continuity.
        last_reparent_target: Option<ElementPath>,
    },
}

/// Mutable state for one pointer-down-to-up gesture.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    /// The discriminated interaction data.
    pub input: InteractionInput,
    /// Which control was grabbed.
    pub active_control: ActiveControl,
    /// Original path -> current path, for elements already speculatively
    /// reparented this session. Rebuilt each frame from the previous
    /// frame's commands.
    pub updated_target_paths: FxHashMap<ElementPath, ElementPath>,
    /// Explicit numeric-key strategy lock, if any.
    pub locked_strategy: Option<StrategyId>,
    /// Strategy-private scratch state.
    pub custom_state: CustomStrategyState,
}

impl InteractionSession {
    /// Begin a drag session at a canvas point on the given control.
    #[must_use]
    pub fn begin_drag(start: CanvasPoint, active_control: ActiveControl) -> Self {
        Self {
            input: InteractionInput::Drag(DragInput::starting_at(start)),
            active_control,
            updated_target_paths: FxHashMap::default(),
            locked_strategy: None,
            custom_state: CustomStrategyState::None,
        }
    }

    /// Begin a hover session (no pressed button) at a canvas point.
    ///
    /// Hover sessions are constructed by the host directly; the engine's
    /// pointer loop only drives drags.
    #[must_use]
    pub fn begin_hover(point: CanvasPoint, modifiers: Modifiers) -> Self {
        Self {
            input: InteractionInput::Hover { point, modifiers },
            active_control: ActiveControl::BoundingArea,
            updated_target_paths: FxHashMap::default(),
            locked_strategy: None,
            custom_state: CustomStrategyState::None,
        }
    }

    /// Begin a keyboard-nudge session.
    #[must_use]
    pub fn begin_keyboard(modifiers: Modifiers) -> Self {
        Self {
            input: InteractionInput::Keyboard { modifiers },
            active_control: ActiveControl::BoundingArea,
            updated_target_paths: FxHashMap::default(),
            locked_strategy: None,
            custom_state: CustomStrategyState::None,
        }
    }

    /// The active drag vector, if the session is a drag past threshold.
    #[must_use]
    pub fn drag(&self) -> Option<CanvasVector> {
        match &self.input {
            InteractionInput::Drag(data) => data.drag,
            InteractionInput::Keyboard { .. } | InteractionInput::Hover { .. } => None,
        }
    }

    /// Modifiers held during the latest event.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        match &self.input {
            InteractionInput::Drag(data) => data.modifiers,
            InteractionInput::Keyboard { modifiers } | InteractionInput::Hover { modifiers, .. } => {
                *modifiers
            }
        }
    }

    /// Current pointer position in canvas space, when the interaction has
    /// one.
    #[must_use]
    pub fn pointer_position(&self) -> Option<CanvasPoint> {
        match &self.input {
            InteractionInput::Drag(data) => Some(data.current_point()),
            InteractionInput::Hover { point, .. } => Some(*point),
            InteractionInput::Keyboard { .. } => None,
        }
    }

    /// Resolve a path through the session remap table; identity when the
    /// element has not been speculatively reparented.
    #[must_use]
    pub fn mapped_path(&self, path: &ElementPath) -> ElementPath {
        self.updated_target_paths
            .get(path)
            .cloned()
            .unwrap_or_else(|| path.clone())
    }
}

/// The immutable per-frame view the strategies evaluate against.
#[derive(Debug)]
pub struct InteractionCanvasState<'a> {
    /// Metadata snapshot captured at interaction start.
    pub starting_metadata: &'a MetadataSnapshot,
    /// Read view of the element tree.
    pub project_contents: &'a ProjectContents,
    /// The current multiselection, in selection order.
    pub selected_elements: Vec<ElementPath>,
    /// Current canvas zoom scale.
    pub scale: f64,
}
