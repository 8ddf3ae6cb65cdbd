#![forbid(unsafe_code)]

//! The canvas-strategy capability set.
//!
//! Strategies are a closed polymorphic set: each candidate declares its
//! fitness for the live interaction and, when chosen, produces the frame's
//! command batch. Registration order is fixed and doubles as the
//! tie-break order in the selector.

use maquette_model::command::Command;

use crate::session::{CustomStrategyState, InteractionCanvasState, InteractionSession, StrategyId};
use crate::strategies::absolute_move::AbsoluteMoveStrategy;
use crate::strategies::absolute_reparent::{AbsoluteReparentStrategy, ForcedAbsoluteReparentStrategy};
use crate::strategies::basic_resize::BasicResizeStrategy;
use crate::strategies::direct_move::DirectMoveStrategy;
use crate::strategies::flex_reparent::FlexReparentStrategy;
use crate::strategies::set_flex_gap::SetFlexGapStrategy;

/// Everything a strategy may read for one frame.
#[derive(Debug)]
pub struct StrategyContext<'a> {
    /// The immutable per-frame canvas view.
    pub state: &'a InteractionCanvasState<'a>,
    /// The live session.
    pub session: &'a InteractionSession,
}

/// The output of running a chosen strategy for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyApplicationResult {
    /// Ordered command batch for this frame.
    pub commands: Vec<Command>,
    /// Scratch state carried into the next frame, when the strategy has
    /// any.
    pub custom_state: Option<CustomStrategyState>,
}

impl StrategyApplicationResult {
    /// A no-op frame.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
            custom_state: None,
        }
    }

    /// Commands only, no scratch state.
    #[must_use]
    pub fn from_commands(commands: Vec<Command>) -> Self {
        Self {
            commands,
            custom_state: None,
        }
    }

    /// Attach scratch state for the next frame.
    #[must_use]
    pub fn with_custom_state(mut self, state: CustomStrategyState) -> Self {
        self.custom_state = Some(state);
        self
    }

    /// True when the frame produced nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.custom_state.is_none()
    }
}

/// A self-contained manipulation behavior.
///
/// Fitness doubles as the applicability predicate: a score of zero or
/// below means "not applicable this frame". Higher scores are more
/// specific matches and outrank generic fallbacks.
pub trait CanvasStrategy {
    /// Stable identifier; `FORCED_`-prefixed variants are never the
    /// default choice.
    fn id(&self) -> StrategyId;

    /// Human-readable name for the strategy picker.
    fn name(&self) -> &'static str;

    /// Fitness score for the current frame; `<= 0.0` is inapplicable.
    fn fitness(&self, ctx: &StrategyContext<'_>) -> f64;

    /// Produce this frame's command batch.
    fn apply(&self, ctx: &StrategyContext<'_>) -> StrategyApplicationResult;
}

/// The closed strategy set, in registration order.
///
/// Registration order is the selector's tie-break order, so it is part of
/// the observable contract and must stay stable.
#[must_use]
pub fn registered_strategies() -> Vec<Box<dyn CanvasStrategy>> {
    vec![
        Box::new(AbsoluteMoveStrategy),
        Box::new(DirectMoveStrategy),
        Box::new(BasicResizeStrategy),
        Box::new(FlexReparentStrategy),
        Box::new(AbsoluteReparentStrategy),
        Box::new(ForcedAbsoluteReparentStrategy),
        Box::new(SetFlexGapStrategy),
    ]
}
