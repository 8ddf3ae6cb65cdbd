#![forbid(unsafe_code)]

//! The declarative mutation command vocabulary.
//!
//! Commands are immutable descriptions of one property mutation or one UI
//! side effect. They are produced fresh every frame and are disposable;
//! only their cumulative effect on the tree persists. Property-mutating
//! commands are idempotent against a given starting snapshot: re-applying
//! the same interaction-session state yields the same resulting props, and
//! applying a command never requires the mutated element's resulting
//! metadata.
//!
//! [`apply_commands`] implements the property-mutating subset against a
//! [`ProjectContents`] view; presentation commands (cursor, highlights,
//! guidelines, rerender hints) are consumed by the UI collaborator and are
//! no-ops here. Tests use the applier to verify idempotence and
//! position-conservation properties.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guideline::GuidelineWithSnappingVector;
use crate::length::{CreatePolicy, CssLength};
use crate::metadata::{FlexDirection, Position};
use crate::pins::Pin;
use crate::tree::ProjectContents;
use maquette_core::geometry::CanvasRect;
use maquette_core::path::ElementPath;

/// Cursor hints surfaced to the UI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorKind {
    /// Default selection cursor.
    Select,
    /// Move in progress.
    Move,
    /// Reparent is not permitted for the current selection.
    ReparentNotPermitted,
    /// Horizontal resize.
    ResizeEw,
    /// Vertical resize.
    ResizeNs,
    /// Diagonal resize (NW/SE corners).
    ResizeNwse,
    /// Diagonal resize (NE/SW corners).
    ResizeNesw,
    /// Column gap adjustment.
    ColResize,
    /// Row gap adjustment.
    RowResize,
}

/// One length property adjustment within an
/// [`AdjustLengthProperties`] command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthPropertyToAdjust {
    /// Which pin to adjust.
    pub pin: Pin,
    /// Signed pixel delta to apply.
    pub delta_px: f64,
    /// Percentage-basis denominator, when the parent is measured.
    pub parent_dimension: Option<f64>,
    /// Whether to create the property if absent.
    pub create_policy: CreatePolicy,
}

impl LengthPropertyToAdjust {
    /// Construct an adjustment entry.
    #[must_use]
    pub const fn new(
        pin: Pin,
        delta_px: f64,
        parent_dimension: Option<f64>,
        create_policy: CreatePolicy,
    ) -> Self {
        Self {
            pin,
            delta_px,
            parent_dimension,
            create_policy,
        }
    }
}

/// Adjust several length properties of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustLengthProperties {
    /// The element whose props are rewritten.
    pub target: ElementPath,
    /// Parent flex direction at adjustment time; lets the tree collaborator
    /// normalize `flex-basis`-style sizing when the element is a flex child.
    pub parent_flex_direction: Option<FlexDirection>,
    /// The per-pin adjustments, applied in order.
    pub properties: Vec<LengthPropertyToAdjust>,
}

/// An intended post-command frame for one element.
///
/// Computed before re-measurement confirms it; consumed by dependent layout
/// recalculation (group bounding boxes and overlays) so they do not lag a
/// frame behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAndTarget {
    pub target: ElementPath,
    pub frame: CanvasRect,
}

/// One declarative mutation or UI side effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Adjust length properties by deltas, creating them per policy.
    AdjustLengthProperties(AdjustLengthProperties),
    /// Set one pin to a literal value, creating it if absent.
    SetLengthProperty {
        target: ElementPath,
        pin: Pin,
        value: CssLength,
    },
    /// Remove pins from an element's props.
    DeleteProperties {
        target: ElementPath,
        pins: Vec<Pin>,
    },
    /// Set the flex gap of a container.
    SetFlexGap { target: ElementPath, gap: f64 },
    /// Set the element's position mode (absolute/relative/static).
    SetPosition {
        target: ElementPath,
        position: Position,
    },
    /// Move an element (and its subtree) under a new parent, optionally at
    /// a specific sibling index in tree order.
    ReparentElement {
        target: ElementPath,
        new_parent: ElementPath,
        index: Option<usize>,
    },
    /// Push provisional frames to dependent layout recalculation.
    PushIntendedBounds(Vec<FrameAndTarget>),
    /// Cursor hint for the UI collaborator.
    SetCursor(CursorKind),
    /// Highlighted-view paths for the UI collaborator.
    UpdateHighlightedViews(Vec<ElementPath>),
    /// Active snapping guideline geometry for the UI collaborator.
    SetSnappingGuidelines(Vec<GuidelineWithSnappingVector>),
    /// Paths whose rendering must refresh after this batch.
    SetElementsToRerender(Vec<ElementPath>),
}

impl Command {
    /// True for commands that rewrite element-tree properties (as opposed
    /// to presentation hints).
    #[must_use]
    pub const fn is_property_mutation(&self) -> bool {
        matches!(
            self,
            Self::AdjustLengthProperties(_)
                | Self::SetLengthProperty { .. }
                | Self::DeleteProperties { .. }
                | Self::SetFlexGap { .. }
                | Self::SetPosition { .. }
                | Self::ReparentElement { .. }
        )
    }
}

/// Errors from applying property-mutating commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The target path has no entry in the tree view.
    #[error("no element found at path {path}")]
    UnknownTarget { path: ElementPath },
    /// The target resolved to a generated node with no rewritable props.
    #[error("element at path {path} is generated and cannot be mutated")]
    GeneratedTarget { path: ElementPath },
    /// A reparent produced no valid destination path.
    #[error("cannot reparent the root element at path {path}")]
    InvalidReparent { path: ElementPath },
}

/// Apply the property-mutating subset of a command batch to the tree view.
///
/// Presentation commands are skipped. Commands are applied in order;
/// the first failure aborts the batch.
pub fn apply_commands(
    contents: &mut ProjectContents,
    commands: &[Command],
) -> Result<(), CommandError> {
    for command in commands {
        apply_command(contents, command)?;
    }
    Ok(())
}

fn literal_mut<'a>(
    contents: &'a mut ProjectContents,
    path: &ElementPath,
) -> Result<&'a mut crate::tree::LiteralNode, CommandError> {
    match contents.get_mut(path) {
        None => Err(CommandError::UnknownTarget { path: path.clone() }),
        Some(crate::tree::ElementNode::Generated) => {
            Err(CommandError::GeneratedTarget { path: path.clone() })
        }
        Some(crate::tree::ElementNode::Literal(node)) => Ok(node),
    }
}

fn apply_command(contents: &mut ProjectContents, command: &Command) -> Result<(), CommandError> {
    match command {
        Command::AdjustLengthProperties(adjust) => {
            let node = literal_mut(contents, &adjust.target)?;
            for prop in &adjust.properties {
                match node.style.get(prop.pin) {
                    Some(existing) => {
                        node.style
                            .set(prop.pin, existing.adjusted_by(prop.delta_px, prop.parent_dimension));
                    }
                    None => {
                        if prop.create_policy == CreatePolicy::IfMissing {
                            node.style.set(prop.pin, CssLength::Px(prop.delta_px));
                        }
                    }
                }
            }
            Ok(())
        }
        Command::SetLengthProperty { target, pin, value } => {
            let node = literal_mut(contents, target)?;
            node.style.set(*pin, *value);
            Ok(())
        }
        Command::DeleteProperties { target, pins } => {
            let node = literal_mut(contents, target)?;
            for pin in pins {
                node.style.remove(*pin);
            }
            Ok(())
        }
        Command::SetFlexGap { target, gap } => {
            let node = literal_mut(contents, target)?;
            node.flex_gap = Some(*gap);
            Ok(())
        }
        Command::SetPosition { target, position } => {
            let node = literal_mut(contents, target)?;
            node.position = Some(*position);
            Ok(())
        }
        Command::ReparentElement {
            target, new_parent, ..
        } => match contents.reparent(target, new_parent) {
            Some(_) => Ok(()),
            None => Err(CommandError::InvalidReparent {
                path: target.clone(),
            }),
        },
        Command::PushIntendedBounds(_)
        | Command::SetCursor(_)
        | Command::UpdateHighlightedViews(_)
        | Command::SetSnappingGuidelines(_)
        | Command::SetElementsToRerender(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ElementNode, LiteralNode, StyleProps};

    fn path(s: &str) -> ElementPath {
        ElementPath::from_slash_str(s)
    }

    fn contents_with(path_str: &str, style: StyleProps) -> ProjectContents {
        let mut contents = ProjectContents::new();
        contents.insert(path(path_str), ElementNode::Literal(LiteralNode::with_style(style)));
        contents
    }

    #[test]
    fn adjust_existing_px_property() {
        let mut contents =
            contents_with("a/b", StyleProps::default().with(Pin::Left, CssLength::Px(10.0)));
        let command = Command::AdjustLengthProperties(AdjustLengthProperties {
            target: path("a/b"),
            parent_flex_direction: None,
            properties: vec![LengthPropertyToAdjust::new(
                Pin::Left,
                15.0,
                None,
                CreatePolicy::IfMissing,
            )],
        });
        apply_commands(&mut contents, &[command]).unwrap();
        assert_eq!(
            contents.literal(&path("a/b")).unwrap().style.get(Pin::Left),
            Some(CssLength::Px(25.0))
        );
    }

    #[test]
    fn adjust_creates_missing_property_per_policy() {
        let mut contents = contents_with("a/b", StyleProps::default());
        let adjust = |policy| {
            Command::AdjustLengthProperties(AdjustLengthProperties {
                target: path("a/b"),
                parent_flex_direction: None,
                properties: vec![LengthPropertyToAdjust::new(Pin::Top, 7.0, None, policy)],
            })
        };

        apply_commands(&mut contents, &[adjust(CreatePolicy::ExistingOnly)]).unwrap();
        assert_eq!(contents.literal(&path("a/b")).unwrap().style.get(Pin::Top), None);

        apply_commands(&mut contents, &[adjust(CreatePolicy::IfMissing)]).unwrap();
        assert_eq!(
            contents.literal(&path("a/b")).unwrap().style.get(Pin::Top),
            Some(CssLength::Px(7.0))
        );
    }

    #[test]
    fn adjust_percent_uses_parent_dimension() {
        let mut contents =
            contents_with("a/b", StyleProps::default().with(Pin::Left, CssLength::Percent(10.0)));
        let command = Command::AdjustLengthProperties(AdjustLengthProperties {
            target: path("a/b"),
            parent_flex_direction: None,
            properties: vec![LengthPropertyToAdjust::new(
                Pin::Left,
                40.0,
                Some(400.0),
                CreatePolicy::IfMissing,
            )],
        });
        apply_commands(&mut contents, &[command]).unwrap();
        assert_eq!(
            contents.literal(&path("a/b")).unwrap().style.get(Pin::Left),
            Some(CssLength::Percent(20.0))
        );
    }

    #[test]
    fn mutating_a_generated_target_fails() {
        let mut contents = ProjectContents::new();
        contents.insert(path("a/gen"), ElementNode::Generated);
        let command = Command::SetLengthProperty {
            target: path("a/gen"),
            pin: Pin::Left,
            value: CssLength::Px(1.0),
        };
        assert_eq!(
            apply_commands(&mut contents, &[command]),
            Err(CommandError::GeneratedTarget { path: path("a/gen") })
        );
    }

    #[test]
    fn presentation_commands_are_noops() {
        let mut contents = contents_with("a/b", StyleProps::default());
        let before = contents.literal(&path("a/b")).unwrap().clone();
        apply_commands(
            &mut contents,
            &[
                Command::SetCursor(CursorKind::Select),
                Command::UpdateHighlightedViews(vec![path("a/b")]),
                Command::SetSnappingGuidelines(Vec::new()),
                Command::SetElementsToRerender(vec![path("a/b")]),
                Command::PushIntendedBounds(Vec::new()),
            ],
        )
        .unwrap();
        assert_eq!(contents.literal(&path("a/b")).unwrap(), &before);
    }

    #[test]
    fn reparent_command_moves_the_node() {
        let mut contents = contents_with("root/old/card", StyleProps::default());
        contents.insert(path("root/new"), ElementNode::Literal(LiteralNode::default()));
        let command = Command::ReparentElement {
            target: path("root/old/card"),
            new_parent: path("root/new"),
            index: Some(0),
        };
        apply_commands(&mut contents, &[command]).unwrap();
        assert!(contents.literal(&path("root/new/card")).is_some());
        assert!(contents.get(&path("root/old/card")).is_none());
    }

    #[test]
    fn command_serde_round_trip() {
        let command = Command::SetCursor(CursorKind::ReparentNotPermitted);
        let json = serde_json::to_string(&command).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }

    #[test]
    fn property_mutation_classification() {
        assert!(Command::SetFlexGap { target: path("a"), gap: 4.0 }.is_property_mutation());
        assert!(!Command::SetCursor(CursorKind::Move).is_property_mutation());
    }
}
