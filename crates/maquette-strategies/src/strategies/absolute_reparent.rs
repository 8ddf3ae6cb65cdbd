#![forbid(unsafe_code)]

//! Reparent onto a container as an absolutely positioned child.
//!
//! Pins are re-based against the new parent's bounds so the rendered
//! global position is conserved across the reparent:
//! `new_left = dragged_frame.x - new_parent_bounds.x`, symmetric for top.
//!
//! The forced variant runs the identical computation but stays applicable
//! over flex containers, where the ordinary flex-reparent strategy would
//! otherwise win. It is never the default choice: its base fitness sits
//! below every ordinary candidate, and it only ranks first when the
//! modifier combination signals explicit intent (or it is locked via the
//! strategy picker).

use tracing::debug;

use maquette_core::path::ElementPath;
use maquette_model::command::{Command, CursorKind};
use maquette_model::length::CssLength;
use maquette_model::metadata::Position;
use maquette_model::pins::Pin;

use crate::move_helpers::flatten_selection;
use crate::reparent::if_allowed_to_reparent;
use crate::session::{ActiveControl, CustomStrategyState, StrategyId};
use crate::strategies::{drag_input, hovered_reparent_container};
use crate::strategy::{CanvasStrategy, StrategyApplicationResult, StrategyContext};

fn apply_absolute_reparent(
    ctx: &StrategyContext<'_>,
    container: &ElementPath,
) -> StrategyApplicationResult {
    let Some(drag) = ctx.session.drag() else {
        return StrategyApplicationResult::empty();
    };
    let selected = &ctx.state.selected_elements;

    if_allowed_to_reparent(
        ctx.state.project_contents,
        ctx.state.starting_metadata,
        selected,
        || {
            let Some(parent_bounds) = ctx.state.starting_metadata.global_frame(container) else {
                return StrategyApplicationResult::empty();
            };
            debug!(%container, "absolute reparent");

            let targets = flatten_selection(selected);
            let mut commands = Vec::new();
            let mut rerender = vec![container.clone()];
            for target in &targets {
                let Some(frame) = ctx.state.starting_metadata.global_frame(target) else {
                    continue;
                };
                let mapped = ctx.session.mapped_path(target);
                let Some(new_path) = mapped.reparented_under(container) else {
                    continue;
                };
                let dragged = frame.offset(drag);

                commands.push(Command::ReparentElement {
                    target: mapped,
                    new_parent: container.clone(),
                    index: None,
                });
                commands.push(Command::SetPosition {
                    target: new_path.clone(),
                    position: Position::Absolute,
                });
                // Right/bottom pins are re-based as left/top; keeping them
                // would double-anchor against the old parent's extent.
                commands.push(Command::DeleteProperties {
                    target: new_path.clone(),
                    pins: vec![Pin::Right, Pin::Bottom, Pin::CenterX, Pin::CenterY],
                });
                commands.push(Command::SetLengthProperty {
                    target: new_path.clone(),
                    pin: Pin::Left,
                    value: CssLength::Px(dragged.x - parent_bounds.x),
                });
                commands.push(Command::SetLengthProperty {
                    target: new_path.clone(),
                    pin: Pin::Top,
                    value: CssLength::Px(dragged.y - parent_bounds.y),
                });
                let style = ctx
                    .state
                    .project_contents
                    .literal(target)
                    .map(|node| &node.style);
                if style.is_none_or(|s| s.get(Pin::Width).is_none()) {
                    commands.push(Command::SetLengthProperty {
                        target: new_path.clone(),
                        pin: Pin::Width,
                        value: CssLength::Px(frame.width),
                    });
                }
                if style.is_none_or(|s| s.get(Pin::Height).is_none()) {
                    commands.push(Command::SetLengthProperty {
                        target: new_path.clone(),
                        pin: Pin::Height,
                        value: CssLength::Px(frame.height),
                    });
                }
                rerender.push(new_path);
            }
            commands.push(Command::UpdateHighlightedViews(vec![container.clone()]));
            commands.push(Command::SetElementsToRerender(rerender));
            commands.push(Command::SetCursor(CursorKind::Move));

            StrategyApplicationResult::from_commands(commands).with_custom_state(
                CustomStrategyState::Reparent {
                    last_reparent_target: Some(container.clone()),
                },
            )
        },
    )
}

pub struct AbsoluteReparentStrategy;

impl CanvasStrategy for AbsoluteReparentStrategy {
    fn id(&self) -> StrategyId {
        StrategyId("ABSOLUTE_REPARENT")
    }

    fn name(&self) -> &'static str {
        "Reparent (absolute)"
    }

    fn fitness(&self, ctx: &StrategyContext<'_>) -> f64 {
        let Some(drag_data) = drag_input(ctx) else {
            return 0.0;
        };
        if ctx.session.active_control != ActiveControl::BoundingArea {
            return 0.0;
        }
        if !drag_data.modifiers.cmd() {
            return 0.0;
        }
        let Some(container) = hovered_reparent_container(ctx) else {
            return 0.0;
        };
        if ctx.state.starting_metadata.is_flex_container(&container) {
            return 0.0;
        }
        3.0
    }

    fn apply(&self, ctx: &StrategyContext<'_>) -> StrategyApplicationResult {
        match hovered_reparent_container(ctx) {
            Some(container) => apply_absolute_reparent(ctx, &container),
            None => StrategyApplicationResult::empty(),
        }
    }
}

pub struct ForcedAbsoluteReparentStrategy;

impl CanvasStrategy for ForcedAbsoluteReparentStrategy {
    fn id(&self) -> StrategyId {
        StrategyId("FORCED_ABSOLUTE_REPARENT")
    }

    fn name(&self) -> &'static str {
        "Reparent (forced absolute)"
    }

    fn fitness(&self, ctx: &StrategyContext<'_>) -> f64 {
        let Some(drag_data) = drag_input(ctx) else {
            return 0.0;
        };
        if ctx.session.active_control != ActiveControl::BoundingArea {
            return 0.0;
        }
        if !drag_data.modifiers.cmd() {
            return 0.0;
        }
        if hovered_reparent_container(ctx).is_none() {
            return 0.0;
        }
        if drag_data.modifiers.alt() { 4.0 } else { 1.0 }
    }

    fn apply(&self, ctx: &StrategyContext<'_>) -> StrategyApplicationResult {
        match hovered_reparent_container(ctx) {
            Some(container) => apply_absolute_reparent(ctx, &container),
            None => StrategyApplicationResult::empty(),
        }
    }
}
