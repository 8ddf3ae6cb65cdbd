#![forbid(unsafe_code)]

//! Core: geometry, element paths, and canonical input events.
//!
//! # Role in Maquette
//! `maquette-core` is the foundation layer. It owns the coordinate-space
//! types that every other crate reasons in, the structural element-path
//! identifiers, and the normalized pointer/modifier events that the
//! interaction engine consumes.
//!
//! # Primary responsibilities
//! - **Geometry**: points, vectors, and rectangles in canvas and window
//!   space, with explicit conversion through [`geometry::CanvasTransform`].
//! - **ElementPath**: opaque hierarchical identifiers with structural
//!   ancestor/descendant relations.
//! - **Events**: pointer events and modifier flags.
//!
//! # How it fits in the system
//! The model layer (`maquette-model`) keys measured metadata by
//! [`path::ElementPath`] and measures in [`geometry::CanvasRect`]. The
//! strategy layer (`maquette-strategies`) consumes both plus
//! [`event::Modifiers`] to drive manipulation decisions.

pub mod event;
pub mod geometry;
pub mod path;

pub use event::{Modifiers, PointerEvent, PointerPhase};
pub use geometry::{
    Axis, CanvasPoint, CanvasRect, CanvasTransform, CanvasVector, LocalPoint, LocalRect,
    WindowPoint,
};
pub use path::{ElementId, ElementPath};
