#![forbid(unsafe_code)]

//! Adjust a flex container's gap by dragging the strip between children.

use maquette_model::command::Command;
use maquette_model::metadata::FlexDirection;

use crate::flex_gap::{cursor_for_flex_direction, drag_delta_for_orientation};
use crate::session::{ActiveControl, StrategyId};
use crate::strategies::drag_input;
use crate::strategy::{CanvasStrategy, StrategyApplicationResult, StrategyContext};

pub struct SetFlexGapStrategy;

impl CanvasStrategy for SetFlexGapStrategy {
    fn id(&self) -> StrategyId {
        StrategyId("SET_FLEX_GAP")
    }

    fn name(&self) -> &'static str {
        "Flex gap"
    }

    fn fitness(&self, ctx: &StrategyContext<'_>) -> f64 {
        if drag_input(ctx).is_none() {
            return 0.0;
        }
        if ctx.session.active_control != ActiveControl::FlexGapHandle {
            return 0.0;
        }
        let [target] = ctx.state.selected_elements.as_slice() else {
            return 0.0;
        };
        if !ctx.state.starting_metadata.is_flex_container(target) {
            return 0.0;
        }
        2.0
    }

    fn apply(&self, ctx: &StrategyContext<'_>) -> StrategyApplicationResult {
        let Some(drag) = ctx.session.drag() else {
            return StrategyApplicationResult::empty();
        };
        let [target] = ctx.state.selected_elements.as_slice() else {
            return StrategyApplicationResult::empty();
        };
        let special = ctx
            .state
            .starting_metadata
            .find(target)
            .map(|m| &m.special);
        let direction = special
            .and_then(|s| s.flex_direction)
            .unwrap_or(FlexDirection::Row);
        let starting_gap = special.map_or(0.0, |s| s.flex_gap);

        let delta = drag_delta_for_orientation(drag, direction);
        let gap = (starting_gap + delta).max(0.0);

        StrategyApplicationResult::from_commands(vec![
            Command::SetFlexGap {
                target: target.clone(),
                gap,
            },
            Command::SetElementsToRerender(vec![target.clone()]),
            Command::SetCursor(cursor_for_flex_direction(direction)),
        ])
    }
}
