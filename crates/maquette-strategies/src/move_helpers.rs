#![forbid(unsafe_code)]

//! Shared move-command builders and the common move-application policy.
//!
//! Every move-flavored strategy funnels through [`apply_move_common`]: it
//! branches on the force-absolute modifier (raw drag, no snapping) versus
//! the snap-assisted path (gather parent/sibling guidelines, snap, then
//! emit), and always emits the intended-bounds push, the rerender hint,
//! and a cursor command alongside the length adjustments.

use tracing::trace;

use maquette_core::geometry::{Axis, CanvasRect, CanvasVector, LocalRect};
use maquette_core::path::ElementPath;
use maquette_model::command::{
    AdjustLengthProperties, Command, CursorKind, FrameAndTarget, LengthPropertyToAdjust,
};
use maquette_model::length::CreatePolicy;
use maquette_model::metadata::FlexDirection;
use maquette_model::pins::{Pin, ensure_pins_for_dimension};
use maquette_model::tree::LiteralNode;

use crate::session::{InteractionCanvasState, InteractionInput, InteractionSession};
use crate::snapping::{collect_parent_and_sibling_guidelines, gather_parent_and_sibling_targets, snap_drag};
use crate::strategy::StrategyApplicationResult;

/// Length-adjustment commands plus the provisional post-move frames.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveCommandsResult {
    pub commands: Vec<Command>,
    pub intended_bounds: Vec<FrameAndTarget>,
}

impl MoveCommandsResult {
    /// No commands, no bounds.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
            intended_bounds: Vec::new(),
        }
    }

    /// Merge another result into this one.
    pub fn extend(&mut self, other: MoveCommandsResult) {
        self.commands.extend(other.commands);
        self.intended_bounds.extend(other.intended_bounds);
    }
}

/// The axis a shift-constrained drag sticks to: the dominant component.
#[must_use]
pub fn determine_constrained_drag_axis(drag: CanvasVector) -> Axis {
    if drag.x.abs() >= drag.y.abs() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Drop selected elements that are descendants of other selected elements;
/// moving the ancestor moves them already.
#[must_use]
pub fn flatten_selection(selected: &[ElementPath]) -> Vec<ElementPath> {
    selected
        .iter()
        .filter(|view| !selected.iter().any(|other| view.is_descendant_of(other)))
        .cloned()
        .collect()
}

/// Build the per-pin adjustment commands for one element.
///
/// Each working pin gets a signed pixel delta: `right`/`bottom` negate the
/// drag; a synthesized pin is offset by the element's measured local
/// position so the created value lands where the element already renders;
/// percentage values resolve their denominator from the parent bounds.
/// The intended global frame is computed here, independent of
/// re-measurement.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn create_move_commands_for_element(
    node: &LiteralNode,
    target: &ElementPath,
    mapped_path: &ElementPath,
    drag: CanvasVector,
    local_frame: Option<LocalRect>,
    global_frame: Option<CanvasRect>,
    parent_bounds: Option<CanvasRect>,
    parent_flex_direction: Option<FlexDirection>,
) -> MoveCommandsResult {
    let extension = ensure_pins_for_dimension(&node.style);

    let properties: Vec<LengthPropertyToAdjust> = extension
        .extended
        .iter()
        .map(|&pin| {
            let horizontal = pin.axis() == Axis::Horizontal;
            let negative = pin.negates_delta();

            // A pin that was missing starts from zero; the drag delta is
            // offset by the measured local position so the element does
            // not jump when the pin is created.
            let is_new_pin = extension.is_new_pin(pin);
            let offset_x = if is_new_pin && pin == Pin::Left {
                local_frame.map_or(0.0, |f| f.x)
            } else {
                0.0
            };
            let offset_y = if is_new_pin && pin == Pin::Top {
                local_frame.map_or(0.0, |f| f.y)
            } else {
                0.0
            };

            let raw = if horizontal {
                offset_x + drag.x
            } else {
                offset_y + drag.y
            };
            let delta_px = if negative { -raw } else { raw };
            let parent_dimension = if horizontal {
                parent_bounds.map(|b| b.width)
            } else {
                parent_bounds.map(|b| b.height)
            };

            LengthPropertyToAdjust::new(pin, delta_px, parent_dimension, CreatePolicy::IfMissing)
        })
        .collect();

    let commands = vec![Command::AdjustLengthProperties(AdjustLengthProperties {
        target: target.clone(),
        parent_flex_direction,
        properties,
    })];

    let intended_bounds = global_frame
        .map(|frame| {
            vec![FrameAndTarget {
                target: mapped_path.clone(),
                frame: frame.offset(drag).round_to_nearest_whole(),
            }]
        })
        .unwrap_or_default();

    MoveCommandsResult {
        commands,
        intended_bounds,
    }
}

/// Resolve an element's literal node and starting measurements, then build
/// its move commands. Unresolvable (deleted or generated) targets yield an
/// empty result for that element only.
#[must_use]
pub fn get_move_commands_for_selected_element(
    state: &InteractionCanvasState<'_>,
    selected: &ElementPath,
    mapped_path: &ElementPath,
    drag: CanvasVector,
) -> MoveCommandsResult {
    let Some(node) = state.project_contents.literal(selected) else {
        return MoveCommandsResult::empty();
    };

    let metadata = state.starting_metadata.find(selected);
    let parent_bounds = metadata.and_then(|m| m.special.coordinate_system_bounds);
    let parent_flex_direction = metadata.and_then(|m| m.special.parent_flex_direction);
    let local_frame = state.starting_metadata.local_frame(selected);
    let global_frame = state.starting_metadata.global_frame(selected);

    create_move_commands_for_element(
        node,
        selected,
        mapped_path,
        drag,
        local_frame,
        global_frame,
        parent_bounds,
        parent_flex_direction,
    )
}

/// Like [`get_move_commands_for_selected_element`], resolving the mapped
/// path through the session's remap table.
#[must_use]
pub fn get_interaction_move_commands_for_selected_element(
    state: &InteractionCanvasState<'_>,
    session: &InteractionSession,
    selected: &ElementPath,
    drag: CanvasVector,
) -> MoveCommandsResult {
    let mapped_path = session.mapped_path(selected);
    get_move_commands_for_selected_element(state, selected, &mapped_path, drag)
}

/// Build move commands for the flattened multiselection.
#[must_use]
pub fn get_adjust_move_commands(
    targets: &[ElementPath],
    state: &InteractionCanvasState<'_>,
    session: &InteractionSession,
    snapped_drag: CanvasVector,
) -> MoveCommandsResult {
    let mut result = MoveCommandsResult::empty();
    for selected in flatten_selection(targets) {
        result.extend(get_interaction_move_commands_for_selected_element(
            state, session, &selected, snapped_drag,
        ));
    }
    result
}

/// The shared move-application policy.
///
/// With the force-absolute modifier held, snapping is skipped and the raw
/// drag applies (this bypasses flex/sibling constraints, letting a flex
/// child be pulled out via direct pixel positioning). Otherwise guidelines
/// are gathered from the parents and siblings of each selected element
/// (remapped through the session's path table) and the drag is snapped.
/// A session with no active drag produces an empty result.
pub fn apply_move_common(
    original_targets: &[ElementPath],
    targets: &[ElementPath],
    state: &InteractionCanvasState<'_>,
    session: &InteractionSession,
    get_move_commands: impl Fn(CanvasVector) -> MoveCommandsResult,
) -> StrategyApplicationResult {
    let InteractionInput::Drag(drag_data) = &session.input else {
        return StrategyApplicationResult::empty();
    };
    let Some(drag) = drag_data.drag else {
        return StrategyApplicationResult::empty();
    };

    if drag_data.modifiers.cmd() {
        trace!(?drag, "force-absolute move, snapping bypassed");
        let for_selected = get_move_commands(drag);

        let mut commands = for_selected.commands;
        commands.push(Command::PushIntendedBounds(for_selected.intended_bounds));
        commands.push(Command::UpdateHighlightedViews(Vec::new()));
        commands.push(Command::SetElementsToRerender(targets.to_vec()));
        commands.push(Command::SetCursor(CursorKind::Select));
        StrategyApplicationResult::from_commands(commands)
    } else {
        let constrained_axis = if drag_data.modifiers.shift() {
            Some(determine_constrained_drag_axis(drag))
        } else {
            None
        };

        let targets_for_snapping: Vec<ElementPath> = original_targets
            .iter()
            .map(|path| session.mapped_path(path))
            .collect();
        let snap_targets =
            gather_parent_and_sibling_targets(state.starting_metadata, &targets_for_snapping);
        let move_guidelines =
            collect_parent_and_sibling_guidelines(state.starting_metadata, &snap_targets);

        let snap = snap_drag(
            Some(drag),
            constrained_axis,
            state.starting_metadata,
            targets,
            &move_guidelines,
            state.scale,
        );
        let for_selected = get_move_commands(snap.snapped_drag_vector);

        let mut commands = for_selected.commands;
        commands.push(Command::UpdateHighlightedViews(Vec::new()));
        commands.push(Command::SetSnappingGuidelines(
            snap.guidelines_with_snapping_vector,
        ));
        commands.push(Command::PushIntendedBounds(for_selected.intended_bounds));
        let mut rerender = targets.to_vec();
        rerender.extend(snap_targets);
        commands.push(Command::SetElementsToRerender(rerender));
        commands.push(Command::SetCursor(CursorKind::Select));
        StrategyApplicationResult::from_commands(commands)
    }
}
