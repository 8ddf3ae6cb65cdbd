#![forbid(unsafe_code)]

//! Maquette public facade crate.
//!
//! Re-exports the common surface from the internal crates: geometry and
//! events, the metadata/tree/command model, and the interaction engine
//! with its strategy set. Hosts embedding the engine normally only need
//! this crate.

// --- Core re-exports -------------------------------------------------------

pub use maquette_core::event::{Modifiers, PointerEvent, PointerPhase};
pub use maquette_core::geometry::{
    Axis, CanvasPoint, CanvasRect, CanvasTransform, CanvasVector, LocalPoint, LocalRect,
    WindowPoint, bounding_rect_array,
};
pub use maquette_core::path::{ElementId, ElementPath};

// --- Model re-exports ------------------------------------------------------

pub use maquette_model::command::{
    AdjustLengthProperties, Command, CommandError, CursorKind, FrameAndTarget,
    LengthPropertyToAdjust, apply_commands,
};
pub use maquette_model::guideline::{
    Guideline, GuidelineWithRelevantPoints, GuidelineWithSnappingVector,
};
pub use maquette_model::length::{CreatePolicy, CssLength};
pub use maquette_model::metadata::{
    ElementMetadata, FlexDirection, LayoutSystem, MetadataSnapshot, Position,
    SpecialSizeMeasurements,
};
pub use maquette_model::pins::{Pin, PinExtension, ensure_pins_for_dimension};
pub use maquette_model::tree::{ElementNode, LiteralNode, ProjectContents, StyleProps};

// --- Engine re-exports -----------------------------------------------------

pub use maquette_strategies::engine::{FrameOutcome, InteractionConfig, InteractionEngine};
pub use maquette_strategies::resize_helpers::{EdgeFraction, EdgePosition};
pub use maquette_strategies::selector::{RankedStrategy, StrategySelection, select_strategy};
pub use maquette_strategies::session::{
    ActiveControl, CustomStrategyState, DragInput, InteractionCanvasState, InteractionInput,
    InteractionSession, StrategyId,
};
pub use maquette_strategies::snapping::{SNAP_THRESHOLD_PX, SnapResult, snap_drag};
pub use maquette_strategies::strategy::{
    CanvasStrategy, StrategyApplicationResult, StrategyContext, registered_strategies,
};

/// Commonly used types for embedding the engine.
pub mod prelude {
    pub use crate::{
        ActiveControl, CanvasPoint, CanvasRect, CanvasTransform, CanvasVector, Command,
        ElementMetadata, ElementPath, FrameOutcome, InteractionCanvasState, InteractionConfig,
        InteractionEngine, MetadataSnapshot, Modifiers, Pin, PointerEvent, PointerPhase,
        ProjectContents, StrategyId, WindowPoint,
    };
}
