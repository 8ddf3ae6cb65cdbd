#![forbid(unsafe_code)]

//! Strategies: the multi-candidate manipulation state machine.
//!
//! # Role in Maquette
//! `maquette-strategies` decides which manipulation semantics apply to a
//! live pointer gesture and emits the per-frame command batch. It is
//! single-threaded and frame-driven: every pointer-move re-evaluates all
//! registered strategy candidates against the immutable starting metadata
//! snapshot plus the cumulative session drag vector.
//!
//! # Primary responsibilities
//! - **Session state**: [`session::InteractionSession`] spanning one
//!   pointer-down-to-up gesture.
//! - **Snapping**: guideline collection and drag snapping.
//! - **Eligibility**: reparent permission checks.
//! - **Strategy candidates**: the closed [`strategy::CanvasStrategy`] set.
//! - **Metastrategy selection**: fitness ranking plus explicit lock.
//! - **Engine loop**: [`engine::InteractionEngine`] owning the lifecycle.

pub mod engine;
pub mod flex_gap;
pub mod move_helpers;
pub mod reparent;
pub mod resize_helpers;
pub mod selector;
pub mod session;
pub mod snapping;
pub mod strategies;
pub mod strategy;

pub use engine::{FrameOutcome, InteractionConfig, InteractionEngine};
pub use selector::{RankedStrategy, StrategySelection, select_strategy};
pub use session::{
    ActiveControl, CustomStrategyState, DragInput, InteractionCanvasState, InteractionInput,
    InteractionSession, StrategyId,
};
pub use strategy::{CanvasStrategy, StrategyApplicationResult, StrategyContext, registered_strategies};
