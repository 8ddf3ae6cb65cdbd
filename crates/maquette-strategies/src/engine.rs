#![forbid(unsafe_code)]

//! The interaction engine: one session per pointer gesture.
//!
//! Owns the [`InteractionSession`] across pointer-down/move/up, applies
//! the movement threshold before the drag vector becomes non-null, routes
//! numeric strategy-lock keys against the last frame's ranked list, and
//! re-runs the metastrategy selector every frame.
//!
//! # Invariants
//!
//! 1. A session exists exactly between a `Down` event and the matching
//!    `Up`/`Cancel`; frames outside a session are no-ops.
//! 2. The path remap table is rebuilt each frame solely from that frame's
//!    command batch, keeping frames replayable.
//! 3. A gesture that never exceeds the drag threshold emits no
//!    property-mutation command on any frame.

use tracing::{debug, trace};

use maquette_core::event::{PointerEvent, PointerPhase};
use maquette_core::geometry::CanvasTransform;
use maquette_core::path::ElementPath;
use maquette_model::command::Command;
use rustc_hash::FxHashMap;

use crate::selector::{RankedStrategy, StrategySelection, select_strategy};
use crate::session::{
    ActiveControl, InteractionCanvasState, InteractionInput, InteractionSession, StrategyId,
};
use crate::strategy::{StrategyApplicationResult, StrategyContext, registered_strategies};

/// Engine tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// Manhattan distance in canvas pixels a pointer must travel before
    /// the drag vector activates. Below this the gesture is a click.
    pub drag_threshold_px: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 2.0,
        }
    }
}

/// One frame's output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutcome {
    /// The command batch to hand to the tree-mutation and UI collaborators.
    pub commands: Vec<Command>,
    /// The ranked strategy list for the strategy picker.
    pub ranked: Vec<RankedStrategy>,
    /// The strategy that produced this frame, when one applied.
    pub strategy: Option<StrategyId>,
}

/// The frame-driven interaction loop.
///
/// Only drag gestures route through [`InteractionEngine::pointer_event`];
/// hover and keyboard interactions are built by the host via
/// [`InteractionSession::begin_hover`] / [`InteractionSession::begin_keyboard`]
/// and evaluated against the selector directly.
#[derive(Debug, Default)]
pub struct InteractionEngine {
    config: InteractionConfig,
    transform: CanvasTransform,
    session: Option<InteractionSession>,
    last_ranked: Vec<RankedStrategy>,
}

impl InteractionEngine {
    /// Create an engine with the given tunables and initial transform.
    #[must_use]
    pub fn new(config: InteractionConfig, transform: CanvasTransform) -> Self {
        Self {
            config,
            transform,
            session: None,
            last_ranked: Vec::new(),
        }
    }

    /// Update the pan/zoom transform (the host owns it).
    pub fn set_transform(&mut self, transform: CanvasTransform) {
        self.transform = transform;
    }

    /// The live session, if a gesture is in progress.
    #[must_use]
    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// Route one pointer event.
    ///
    /// `Down` opens a session on the given control; `Move` produces a
    /// frame; `Up` ends the gesture (the frame's cumulative effect was
    /// already emitted); `Cancel` discards everything.
    pub fn pointer_event(
        &mut self,
        event: PointerEvent,
        active_control: ActiveControl,
        state: &InteractionCanvasState<'_>,
    ) -> FrameOutcome {
        match event.phase {
            PointerPhase::Down => {
                let start = self.transform.window_to_canvas(event.position);
                let mut session = InteractionSession::begin_drag(start, active_control);
                if let InteractionInput::Drag(data) = &mut session.input {
                    data.modifiers = event.modifiers;
                }
                debug!(?active_control, "interaction session opened");
                self.session = Some(session);
                self.last_ranked.clear();
                FrameOutcome::default()
            }
            PointerPhase::Move => self.pointer_moved(event, state),
            PointerPhase::Up => {
                debug!("interaction session committed");
                self.session = None;
                self.last_ranked.clear();
                FrameOutcome::default()
            }
            PointerPhase::Cancel => {
                debug!("interaction session cancelled");
                self.session = None;
                self.last_ranked.clear();
                FrameOutcome::default()
            }
        }
    }

    /// Lock the strategy bound to a numeric key (1..=9) against the last
    /// frame's ranked list. Out-of-range keys are ignored.
    pub fn lock_strategy_key(&mut self, key: u8) {
        let Some(session) = &mut self.session else {
            return;
        };
        if !(1..=9).contains(&key) {
            return;
        }
        if let Some(ranked) = self.last_ranked.get(usize::from(key) - 1) {
            debug!(strategy = %ranked.id, key, "strategy locked");
            session.locked_strategy = Some(ranked.id);
        }
    }

    fn pointer_moved(
        &mut self,
        event: PointerEvent,
        state: &InteractionCanvasState<'_>,
    ) -> FrameOutcome {
        let Some(session) = &mut self.session else {
            return FrameOutcome::default();
        };

        let point = self.transform.window_to_canvas(event.position);
        if let InteractionInput::Drag(data) = &mut session.input {
            data.raw_movement = point.vector_from(data.start);
            data.modifiers = event.modifiers;
            if data.raw_movement.manhattan_length() >= self.config.drag_threshold_px {
                data.drag = Some(data.raw_movement);
            } else {
                data.drag = None;
            }
        }

        let strategies = registered_strategies();
        let selection: StrategySelection = {
            let ctx = StrategyContext {
                state,
                session: &*session,
            };
            select_strategy(&strategies, &ctx)
        };

        let result = match selection.chosen {
            Some(chosen) => {
                let ctx = StrategyContext {
                    state,
                    session: &*session,
                };
                match strategies.iter().find(|s| s.id() == chosen) {
                    Some(strategy) => strategy.apply(&ctx),
                    None => StrategyApplicationResult::empty(),
                }
            }
            None => StrategyApplicationResult::empty(),
        };
        trace!(
            commands = result.commands.len(),
            strategy = ?selection.chosen,
            "frame produced"
        );

        if let Some(custom) = result.custom_state.clone() {
            session.custom_state = custom;
        }
        session.updated_target_paths =
            rebuild_remap_table(&state.selected_elements, session, &result.commands);
        self.last_ranked.clone_from(&selection.ranked);

        FrameOutcome {
            commands: result.commands,
            ranked: selection.ranked,
            strategy: selection.chosen,
        }
    }
}

/// Derive the original-path -> current-path table from one frame's
/// commands. Built fresh each frame so frames stay replayable.
fn rebuild_remap_table(
    selected: &[ElementPath],
    session: &InteractionSession,
    commands: &[Command],
) -> FxHashMap<ElementPath, ElementPath> {
    let mut table = FxHashMap::default();
    for command in commands {
        let Command::ReparentElement {
            target, new_parent, ..
        } = command
        else {
            continue;
        };
        let Some(new_path) = target.reparented_under(new_parent) else {
            continue;
        };
        for original in selected {
            if session.mapped_path(original) == *target {
                table.insert(original.clone(), new_path.clone());
            }
        }
    }
    table
}
