#![forbid(unsafe_code)]

//! Snap-assisted move of absolutely positioned selections.

use crate::move_helpers::{apply_move_common, get_adjust_move_commands};
use crate::session::{ActiveControl, StrategyId};
use crate::strategies::drag_input;
use crate::strategy::{CanvasStrategy, StrategyApplicationResult, StrategyContext};

pub struct AbsoluteMoveStrategy;

impl CanvasStrategy for AbsoluteMoveStrategy {
    fn id(&self) -> StrategyId {
        StrategyId("ABSOLUTE_MOVE")
    }

    fn name(&self) -> &'static str {
        "Move (absolute)"
    }

    fn fitness(&self, ctx: &StrategyContext<'_>) -> f64 {
        if drag_input(ctx).is_none() {
            return 0.0;
        }
        if ctx.session.active_control != ActiveControl::BoundingArea {
            return 0.0;
        }
        if !ctx
            .state
            .starting_metadata
            .all_selected_absolute(&ctx.state.selected_elements)
        {
            return 0.0;
        }
        2.0
    }

    fn apply(&self, ctx: &StrategyContext<'_>) -> StrategyApplicationResult {
        let selected = ctx.state.selected_elements.clone();
        let targets: Vec<_> = selected
            .iter()
            .map(|path| ctx.session.mapped_path(path))
            .collect();
        apply_move_common(&selected, &targets, ctx.state, ctx.session, |drag| {
            get_adjust_move_commands(&selected, ctx.state, ctx.session, drag)
        })
    }
}
