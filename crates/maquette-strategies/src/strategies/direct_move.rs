#![forbid(unsafe_code)]

//! Raw, unsnapped move while the force-absolute modifier is held.
//!
//! This is the escape hatch that pulls a flex child out of its container
//! via direct pixel positioning: the raw drag applies with no snapping and
//! no sibling constraints.

use crate::move_helpers::{apply_move_common, get_adjust_move_commands};
use crate::session::{ActiveControl, StrategyId};
use crate::strategies::drag_input;
use crate::strategy::{CanvasStrategy, StrategyApplicationResult, StrategyContext};

pub struct DirectMoveStrategy;

impl CanvasStrategy for DirectMoveStrategy {
    fn id(&self) -> StrategyId {
        StrategyId("DIRECT_MOVE")
    }

    fn name(&self) -> &'static str {
        "Move (direct)"
    }

    fn fitness(&self, ctx: &StrategyContext<'_>) -> f64 {
        let Some(drag_data) = drag_input(ctx) else {
            return 0.0;
        };
        if ctx.session.active_control != ActiveControl::BoundingArea {
            return 0.0;
        }
        if ctx.state.selected_elements.is_empty() {
            return 0.0;
        }
        if drag_data.modifiers.cmd() {
            2.5
        } else {
            0.0
        }
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
