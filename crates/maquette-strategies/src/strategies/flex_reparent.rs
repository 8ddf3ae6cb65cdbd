#![forbid(unsafe_code)]

//! Reparent into a flex container at a pointer-derived insertion index.
//!
//! The element moves in tree order to the index given by the pointer's
//! position relative to sibling midpoints along the container's flex
//! direction, and its sizing converts from absolute pins to flex-friendly
//! ones (anchor pins dropped, size pins kept).

use tracing::debug;

use maquette_model::command::{Command, CursorKind};
use maquette_model::metadata::Position;
use maquette_model::pins::Pin;

use crate::move_helpers::flatten_selection;
use crate::reparent::{flex_insertion_index, if_allowed_to_reparent};
use crate::session::{ActiveControl, CustomStrategyState, StrategyId};
use crate::strategies::{drag_input, hovered_reparent_container};
use crate::strategy::{CanvasStrategy, StrategyApplicationResult, StrategyContext};

/// Anchor pins dropped when sizing converts to flex participation.
const ANCHOR_PINS: [Pin; 6] = [
    Pin::Left,
    Pin::Top,
    Pin::Right,
    Pin::Bottom,
    Pin::CenterX,
    Pin::CenterY,
];

pub struct FlexReparentStrategy;

impl CanvasStrategy for FlexReparentStrategy {
    fn id(&self) -> StrategyId {
        StrategyId("FLEX_REPARENT")
    }

    fn name(&self) -> &'static str {
        "Reparent (flex)"
    }

    fn fitness(&self, ctx: &StrategyContext<'_>) -> f64 {
        let Some(drag_data) = drag_input(ctx) else {
            return 0.0;
        };
        if ctx.session.active_control != ActiveControl::BoundingArea {
            return 0.0;
        }
        if !drag_data.modifiers.cmd() || drag_data.modifiers.alt() {
            return 0.0;
        }
        let Some(container) = hovered_reparent_container(ctx) else {
            return 0.0;
        };
        if !ctx.state.starting_metadata.is_flex_container(&container) {
            return 0.0;
        }
        3.0
    }

    fn apply(&self, ctx: &StrategyContext<'_>) -> StrategyApplicationResult {
        let Some(point) = ctx.session.pointer_position() else {
            return StrategyApplicationResult::empty();
        };
        let Some(container) = hovered_reparent_container(ctx) else {
            return StrategyApplicationResult::empty();
        };
        let selected = &ctx.state.selected_elements;

        if_allowed_to_reparent(
            ctx.state.project_contents,
            ctx.state.starting_metadata,
            selected,
            || {
                let index = flex_insertion_index(
                    ctx.state.starting_metadata,
                    &container,
                    point,
                    selected,
                );
                debug!(%container, index, "flex reparent");

                let targets = flatten_selection(selected);
                let mut commands = Vec::new();
                let mut rerender = vec![container.clone()];
                for target in &targets {
                    let mapped = ctx.session.mapped_path(target);
                    let Some(new_path) = mapped.reparented_under(&container) else {
                        continue;
                    };
                    commands.push(Command::ReparentElement {
                        target: mapped,
                        new_parent: container.clone(),
                        index: Some(index),
                    });
                    commands.push(Command::SetPosition {
                        target: new_path.clone(),
                        position: Position::Static,
                    });
                    commands.push(Command::DeleteProperties {
                        target: new_path.clone(),
                        pins: ANCHOR_PINS.to_vec(),
                    });
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
}
