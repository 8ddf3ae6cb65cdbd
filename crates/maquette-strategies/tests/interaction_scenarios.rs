//! End-to-end strategy scenarios: selection, command production, and the
//! effect of applying the produced batch to the tree view.

use maquette_core::event::Modifiers;
use maquette_core::geometry::{CanvasPoint, CanvasRect, CanvasVector};
use maquette_core::path::ElementPath;
use maquette_model::command::{Command, apply_commands};
use maquette_model::length::CssLength;
use maquette_model::metadata::{
    ElementMetadata, FlexDirection, LayoutSystem, MetadataSnapshot, Position,
};
use maquette_model::pins::Pin;
use maquette_model::tree::{ElementNode, LiteralNode, ProjectContents, StyleProps};
use maquette_strategies::resize_helpers::EdgePosition;
use maquette_strategies::selector::select_strategy;
use maquette_strategies::session::{
    ActiveControl, InteractionCanvasState, InteractionInput, InteractionSession, StrategyId,
};
use maquette_strategies::strategy::{StrategyContext, registered_strategies};

fn path(s: &str) -> ElementPath {
    ElementPath::from_slash_str(s)
}

fn drag_session(
    start: CanvasPoint,
    drag: CanvasVector,
    modifiers: Modifiers,
    control: ActiveControl,
) -> InteractionSession {
    let mut session = InteractionSession::begin_drag(start, control);
    if let InteractionInput::Drag(data) = &mut session.input {
        data.raw_movement = drag;
        data.drag = Some(drag);
        data.modifiers = modifiers;
    }
    session
}

fn run_chosen(
    state: &InteractionCanvasState<'_>,
    session: &InteractionSession,
) -> (Option<StrategyId>, Vec<Command>) {
    let strategies = registered_strategies();
    let ctx = StrategyContext { state, session };
    let selection = select_strategy(&strategies, &ctx);
    let commands = match selection.chosen {
        Some(id) => strategies
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.apply(&ctx).commands)
            .unwrap_or_default(),
        None => Vec::new(),
    };
    (selection.chosen, commands)
}

/// A row flex parent with gap 10 holding a 180x180 sibling and the 80x190
/// element under test.
fn flex_row_fixture() -> (MetadataSnapshot, ProjectContents) {
    let parent_frame = CanvasRect::new(0.0, 0.0, 400.0, 200.0);

    let mut parent = ElementMetadata {
        global_frame: Some(parent_frame),
        ..ElementMetadata::default()
    };
    parent.special.layout_system_for_children = LayoutSystem::Flex;
    parent.special.flex_direction = Some(FlexDirection::Row);
    parent.special.flex_gap = 10.0;

    let flex_child = |x: f64, w: f64, h: f64| {
        let mut meta = ElementMetadata {
            global_frame: Some(CanvasRect::new(x, 0.0, w, h)),
            ..ElementMetadata::default()
        };
        meta.special.parent_layout_system = LayoutSystem::Flex;
        meta.special.parent_flex_direction = Some(FlexDirection::Row);
        meta.special.parent_flex_gap = 10.0;
        meta.special.coordinate_system_bounds = Some(parent_frame);
        meta
    };

    let metadata = MetadataSnapshot::new()
        .with(path("scene/root"), parent)
        .with(path("scene/root/bbb"), flex_child(0.0, 180.0, 180.0))
        .with(path("scene/root/ccc"), flex_child(190.0, 80.0, 190.0));

    let mut contents = ProjectContents::new();
    contents.insert(path("scene/root"), ElementNode::Literal(LiteralNode::default()));
    contents.insert(
        path("scene/root/bbb"),
        ElementNode::Literal(LiteralNode::with_style(
            StyleProps::default()
                .with(Pin::Width, CssLength::Px(180.0))
                .with(Pin::Height, CssLength::Px(180.0)),
        )),
    );
    contents.insert(
        path("scene/root/ccc"),
        ElementNode::Literal(LiteralNode::with_style(
            StyleProps::default()
                .with(Pin::Width, CssLength::Px(80.0))
                .with(Pin::Height, CssLength::Px(190.0)),
        )),
    );
    (metadata, contents)
}

#[test]
fn flex_resize_calibration() {
    let (metadata, mut contents) = flex_row_fixture();
    let state = InteractionCanvasState {
        starting_metadata: &metadata,
        project_contents: &contents,
        selected_elements: vec![path("scene/root/ccc")],
        scale: 1.0,
    };
    let session = drag_session(
        CanvasPoint::new(190.0, 0.0),
        CanvasVector::new(15.0, 25.0),
        Modifiers::NONE,
        ActiveControl::ResizeHandle(EdgePosition::TOP_LEFT),
    );

    let (chosen, commands) = run_chosen(&state, &session);
    assert_eq!(chosen, Some(StrategyId("BASIC_RESIZE")));

    apply_commands(&mut contents, &commands).unwrap();
    let style = &contents.literal(&path("scene/root/ccc")).unwrap().style;
    assert_eq!(style.get(Pin::Width), Some(CssLength::Px(65.0)));
    assert_eq!(style.get(Pin::Height), Some(CssLength::Px(165.0)));

    let intended = commands.iter().find_map(|c| match c {
        Command::PushIntendedBounds(frames) => Some(frames.clone()),
        _ => None,
    });
    assert_eq!(
        intended.unwrap()[0].frame,
        CanvasRect::new(205.0, 25.0, 65.0, 165.0)
    );
}

/// Two absolute containers side by side, with an absolutely positioned
/// card inside the first.
fn two_container_fixture() -> (MetadataSnapshot, ProjectContents) {
    let a_frame = CanvasRect::new(100.0, 50.0, 200.0, 200.0);
    let b_frame = CanvasRect::new(400.0, 30.0, 300.0, 300.0);

    let absolute = |frame: CanvasRect, parent_bounds: Option<CanvasRect>| {
        let mut meta = ElementMetadata {
            global_frame: Some(frame),
            ..ElementMetadata::default()
        };
        meta.special.position = Position::Absolute;
        meta.special.coordinate_system_bounds = parent_bounds;
        meta
    };

    let metadata = MetadataSnapshot::new()
        .with(
            path("root"),
            ElementMetadata {
                global_frame: Some(CanvasRect::new(0.0, 0.0, 800.0, 600.0)),
                ..ElementMetadata::default()
            },
        )
        .with(path("root/a"), absolute(a_frame, None))
        .with(path("root/b"), absolute(b_frame, None))
        .with(
            path("root/a/card"),
            absolute(CanvasRect::new(120.0, 90.0, 50.0, 40.0), Some(a_frame)),
        );

    let mut contents = ProjectContents::new();
    for p in ["root", "root/a", "root/b"] {
        contents.insert(path(p), ElementNode::Literal(LiteralNode::default()));
    }
    contents.insert(
        path("root/a/card"),
        ElementNode::Literal(LiteralNode::with_style(
            StyleProps::default()
                .with(Pin::Left, CssLength::Px(20.0))
                .with(Pin::Top, CssLength::Px(40.0))
                .with(Pin::Width, CssLength::Px(50.0))
                .with(Pin::Height, CssLength::Px(40.0)),
        )),
    );
    (metadata, contents)
}

#[test]
fn absolute_reparent_conserves_global_position() {
    let (metadata, mut contents) = two_container_fixture();
    let state = InteractionCanvasState {
        starting_metadata: &metadata,
        project_contents: &contents,
        selected_elements: vec![path("root/a/card")],
        scale: 1.0,
    };
    // Pointer lands inside container b; CMD signals reparent intent.
    let session = drag_session(
        CanvasPoint::new(130.0, 100.0),
        CanvasVector::new(300.0, -20.0),
        Modifiers::CMD,
        ActiveControl::BoundingArea,
    );

    let (chosen, commands) = run_chosen(&state, &session);
    assert_eq!(chosen, Some(StrategyId("ABSOLUTE_REPARENT")));

    apply_commands(&mut contents, &commands).unwrap();
    let node = contents.literal(&path("root/b/card")).unwrap();
    assert_eq!(node.position, Some(Position::Absolute));
    assert_eq!(node.style.get(Pin::Left), Some(CssLength::Px(20.0)));
    assert_eq!(node.style.get(Pin::Top), Some(CssLength::Px(40.0)));

    // Reconstructed global frame equals the dragged frame within 0.5px.
    let b_origin = metadata.global_frame(&path("root/b")).unwrap().origin();
    let dragged = CanvasRect::new(120.0, 90.0, 50.0, 40.0).offset(CanvasVector::new(300.0, -20.0));
    let rebuilt_x = b_origin.x + 20.0;
    let rebuilt_y = b_origin.y + 40.0;
    assert!((rebuilt_x - dragged.x).abs() <= 0.5);
    assert!((rebuilt_y - dragged.y).abs() <= 0.5);
}

#[test]
fn flex_reparent_inserts_by_sibling_midpoints() {
    let (mut metadata, mut contents) = two_container_fixture();
    // Make container b a row flex holding two children.
    let b_frame = CanvasRect::new(400.0, 30.0, 300.0, 300.0);
    let mut b_meta = ElementMetadata {
        global_frame: Some(b_frame),
        ..ElementMetadata::default()
    };
    b_meta.special.layout_system_for_children = LayoutSystem::Flex;
    b_meta.special.flex_direction = Some(FlexDirection::Row);
    metadata.record(path("root/b"), b_meta);
    for (name, x) in [("one", 400.0), ("two", 550.0)] {
        metadata.record(
            path(&format!("root/b/{name}")),
            ElementMetadata {
                global_frame: Some(CanvasRect::new(x, 30.0, 100.0, 100.0)),
                ..ElementMetadata::default()
            },
        );
        contents.insert(
            path(&format!("root/b/{name}")),
            ElementNode::Literal(LiteralNode::default()),
        );
    }

    let state = InteractionCanvasState {
        starting_metadata: &metadata,
        project_contents: &contents,
        selected_elements: vec![path("root/a/card")],
        scale: 1.0,
    };
    // Pointer at x = 530: past child one's midpoint (450), short of child
    // two's (600) -> insertion index 1.
    let session = drag_session(
        CanvasPoint::new(130.0, 100.0),
        CanvasVector::new(400.0, 0.0),
        Modifiers::CMD,
        ActiveControl::BoundingArea,
    );

    let (chosen, commands) = run_chosen(&state, &session);
    assert_eq!(chosen, Some(StrategyId("FLEX_REPARENT")));
    assert!(commands.iter().any(|c| matches!(
        c,
        Command::ReparentElement {
            new_parent,
            index: Some(1),
            ..
        } if *new_parent == path("root/b")
    )));

    apply_commands(&mut contents, &commands).unwrap();
    let node = contents.literal(&path("root/b/card")).unwrap();
    // Anchor pins dropped; size pins survive for flex participation.
    assert_eq!(node.style.get(Pin::Left), None);
    assert_eq!(node.style.get(Pin::Top), None);
    assert_eq!(node.style.get(Pin::Width), Some(CssLength::Px(50.0)));
    assert_eq!(node.position, Some(Position::Static));
}

#[test]
fn forced_absolute_wins_over_flex_with_modifier_intent() {
    let (mut metadata, contents) = two_container_fixture();
    let mut b_meta = ElementMetadata {
        global_frame: Some(CanvasRect::new(400.0, 30.0, 300.0, 300.0)),
        ..ElementMetadata::default()
    };
    b_meta.special.layout_system_for_children = LayoutSystem::Flex;
    b_meta.special.flex_direction = Some(FlexDirection::Row);
    metadata.record(path("root/b"), b_meta);

    let state = InteractionCanvasState {
        starting_metadata: &metadata,
        project_contents: &contents,
        selected_elements: vec![path("root/a/card")],
        scale: 1.0,
    };
    let over_b = |modifiers| {
        drag_session(
            CanvasPoint::new(130.0, 100.0),
            CanvasVector::new(400.0, 0.0),
            modifiers,
            ActiveControl::BoundingArea,
        )
    };

    // CMD alone over a flex container: flex insertion is the default.
    let (chosen, _) = run_chosen(&state, &over_b(Modifiers::CMD));
    assert_eq!(chosen, Some(StrategyId("FLEX_REPARENT")));

    // CMD+ALT forces absolute insertion even over flex.
    let (chosen, commands) = run_chosen(&state, &over_b(Modifiers::CMD | Modifiers::ALT));
    assert_eq!(chosen, Some(StrategyId("FORCED_ABSOLUTE_REPARENT")));
    assert!(commands.iter().any(|c| matches!(
        c,
        Command::ReparentElement { index: None, .. }
    )));
    assert!(commands.iter().any(|c| matches!(
        c,
        Command::SetPosition {
            position: Position::Absolute,
            ..
        }
    )));
}

#[test]
fn forced_absolute_applies_when_locked_over_plain_container() {
    let (metadata, mut contents) = two_container_fixture();
    let state = InteractionCanvasState {
        starting_metadata: &metadata,
        project_contents: &contents,
        selected_elements: vec![path("root/a/card")],
        scale: 1.0,
    };
    let mut session = drag_session(
        CanvasPoint::new(130.0, 100.0),
        CanvasVector::new(300.0, -20.0),
        Modifiers::CMD,
        ActiveControl::BoundingArea,
    );
    session.locked_strategy = Some(StrategyId("FORCED_ABSOLUTE_REPARENT"));

    let (chosen, commands) = run_chosen(&state, &session);
    assert_eq!(chosen, Some(StrategyId("FORCED_ABSOLUTE_REPARENT")));

    apply_commands(&mut contents, &commands).unwrap();
    let node = contents.literal(&path("root/b/card")).unwrap();
    assert_eq!(node.position, Some(Position::Absolute));
    // Pins re-based against the new parent's origin, not flex order.
    assert_eq!(node.style.get(Pin::Left), Some(CssLength::Px(20.0)));
    assert_eq!(node.style.get(Pin::Top), Some(CssLength::Px(40.0)));
}

#[test]
fn move_batch_restores_pin_completeness() {
    // The element starts with size pins only; a move synthesizes the
    // missing anchors so each axis ends with anchor + size.
    let frame = CanvasRect::new(30.0, 40.0, 60.0, 60.0);
    let mut meta = ElementMetadata {
        global_frame: Some(frame),
        local_frame: Some(maquette_core::geometry::LocalRect::new(30.0, 40.0, 60.0, 60.0)),
        ..ElementMetadata::default()
    };
    meta.special.position = Position::Absolute;
    meta.special.coordinate_system_bounds = Some(CanvasRect::new(0.0, 0.0, 400.0, 400.0));
    let metadata = MetadataSnapshot::new()
        .with(
            path("root"),
            ElementMetadata {
                global_frame: Some(CanvasRect::new(0.0, 0.0, 400.0, 400.0)),
                ..ElementMetadata::default()
            },
        )
        .with(path("root/box"), meta);

    let mut contents = ProjectContents::new();
    contents.insert(path("root"), ElementNode::Literal(LiteralNode::default()));
    contents.insert(
        path("root/box"),
        ElementNode::Literal(LiteralNode::with_style(
            StyleProps::default()
                .with(Pin::Width, CssLength::Px(60.0))
                .with(Pin::Height, CssLength::Px(60.0)),
        )),
    );

    let state = InteractionCanvasState {
        starting_metadata: &metadata,
        project_contents: &contents,
        selected_elements: vec![path("root/box")],
        scale: 1.0,
    };
    let session = drag_session(
        CanvasPoint::new(50.0, 50.0),
        CanvasVector::new(25.0, 35.0),
        Modifiers::NONE,
        ActiveControl::BoundingArea,
    );

    let (chosen, commands) = run_chosen(&state, &session);
    assert_eq!(chosen, Some(StrategyId("ABSOLUTE_MOVE")));

    apply_commands(&mut contents, &commands).unwrap();
    let style = &contents.literal(&path("root/box")).unwrap().style;
    // Synthesized anchors land on measured position + drag.
    assert_eq!(style.get(Pin::Left), Some(CssLength::Px(55.0)));
    assert_eq!(style.get(Pin::Top), Some(CssLength::Px(75.0)));
    assert_eq!(style.get(Pin::Width), Some(CssLength::Px(60.0)));
    assert_eq!(style.get(Pin::Height), Some(CssLength::Px(60.0)));
}
