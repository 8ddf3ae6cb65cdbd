#![forbid(unsafe_code)]

//! The closed strategy set.
//!
//! Each submodule holds one self-contained manipulation behavior; the
//! registration order lives in [`crate::strategy::registered_strategies`].

pub mod absolute_move;
pub mod absolute_reparent;
pub mod basic_resize;
pub mod direct_move;
pub mod flex_reparent;
pub mod set_flex_gap;

use maquette_core::path::ElementPath;

use crate::reparent::reparent_target_under_point;
use crate::session::{DragInput, InteractionInput};
use crate::strategy::StrategyContext;

/// The session's drag data, when the interaction is a drag.
pub(crate) fn drag_input<'a>(ctx: &'a StrategyContext<'_>) -> Option<&'a DragInput> {
    match &ctx.session.input {
        InteractionInput::Drag(data) => Some(data),
        InteractionInput::Keyboard { .. } | InteractionInput::Hover { .. } => None,
    }
}

/// The candidate drop container under the pointer, excluding the dragged
/// selection, and only when it differs from every dragged element's
/// current parent.
pub(crate) fn hovered_reparent_container(ctx: &StrategyContext<'_>) -> Option<ElementPath> {
    let point = ctx.session.pointer_position()?;
    let selected = &ctx.state.selected_elements;
    let container = reparent_target_under_point(
        ctx.state.starting_metadata,
        ctx.state.project_contents,
        point,
        selected,
    )?;
    let differs = selected.iter().all(|target| {
        ctx.session.mapped_path(target).parent().as_ref() != Some(&container)
    });
    differs.then_some(container)
}
