#![forbid(unsafe_code)]

//! Resize by edge handle, pinning width/height.

use maquette_model::command::Command;

use crate::move_helpers::{MoveCommandsResult, flatten_selection};
use crate::resize_helpers::{create_resize_commands_for_element, cursor_for_edge};
use crate::session::{ActiveControl, StrategyId};
use crate::strategies::drag_input;
use crate::strategy::{CanvasStrategy, StrategyApplicationResult, StrategyContext};

pub struct BasicResizeStrategy;

impl CanvasStrategy for BasicResizeStrategy {
    fn id(&self) -> StrategyId {
        StrategyId("BASIC_RESIZE")
    }

    fn name(&self) -> &'static str {
        "Resize"
    }

    fn fitness(&self, ctx: &StrategyContext<'_>) -> f64 {
        if drag_input(ctx).is_none() {
            return 0.0;
        }
        if !matches!(ctx.session.active_control, ActiveControl::ResizeHandle(_)) {
            return 0.0;
        }
        if ctx.state.selected_elements.is_empty() {
            return 0.0;
        }
        2.0
    }

    fn apply(&self, ctx: &StrategyContext<'_>) -> StrategyApplicationResult {
        let ActiveControl::ResizeHandle(edge) = ctx.session.active_control else {
            return StrategyApplicationResult::empty();
        };
        let Some(drag) = ctx.session.drag() else {
            return StrategyApplicationResult::empty();
        };

        let targets = flatten_selection(&ctx.state.selected_elements);
        let mut result = MoveCommandsResult::empty();
        for target in &targets {
            let Some(node) = ctx.state.project_contents.literal(target) else {
                continue;
            };
            let metadata = ctx.state.starting_metadata.find(target);
            let parent_bounds = metadata.and_then(|m| m.special.coordinate_system_bounds);
            let parent_flex_direction = metadata.and_then(|m| m.special.parent_flex_direction);
            let is_absolute = ctx.state.starting_metadata.is_position_absolute(target);
            result.extend(create_resize_commands_for_element(
                node,
                target,
                &ctx.session.mapped_path(target),
                drag,
                edge,
                is_absolute,
                ctx.state.starting_metadata.local_frame(target),
                ctx.state.starting_metadata.global_frame(target),
                parent_bounds,
                parent_flex_direction,
            ));
        }

        if result.commands.is_empty() {
            return StrategyApplicationResult::empty();
        }

        let mut commands = result.commands;
        commands.push(Command::PushIntendedBounds(result.intended_bounds));
        commands.push(Command::SetElementsToRerender(targets));
        commands.push(Command::SetCursor(cursor_for_edge(edge)));
        StrategyApplicationResult::from_commands(commands)
    }
}
