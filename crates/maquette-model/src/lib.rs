#![forbid(unsafe_code)]

//! Model: measured metadata snapshots, pins, and the command vocabulary.
//!
//! # Role in Maquette
//! `maquette-model` sits between the external layout collaborator (which
//! produces per-element measurements once per committed command batch) and
//! the strategy layer (which consumes those measurements and emits
//! declarative mutation commands).
//!
//! # Primary responsibilities
//! - **Pins & lengths**: positional style properties and px/percent algebra.
//! - **Metadata**: the immutable per-session [`metadata::MetadataSnapshot`].
//! - **Tree view**: [`tree::ProjectContents`], the engine's read view of the
//!   element tree (literal vs. generated nodes, style props).
//! - **Commands**: the idempotent [`command::Command`] vocabulary plus
//!   [`command::apply_commands`] used by tests to round-trip effects.

pub mod command;
pub mod guideline;
pub mod length;
pub mod metadata;
pub mod pins;
pub mod tree;

pub use command::{
    AdjustLengthProperties, Command, CommandError, CursorKind, FrameAndTarget, LengthPropertyToAdjust,
    apply_commands,
};
pub use guideline::{Guideline, GuidelineWithRelevantPoints, GuidelineWithSnappingVector};
pub use length::{CreatePolicy, CssLength};
pub use metadata::{
    ElementMetadata, FlexDirection, LayoutSystem, MetadataSnapshot, Position,
    SpecialSizeMeasurements,
};
pub use pins::{Pin, PinExtension, ensure_pins_for_dimension};
pub use tree::{ElementNode, LiteralNode, ProjectContents, StyleProps};
