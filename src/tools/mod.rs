//! The tool state machine.
//!
//! [`ToolSession`] turns pointer events into edits of the active layer. Every
//! tool is a [`Tool`] variant and every event goes through one `match` on the
//! tool and its [`ToolState`]. Committing to history is left to the caller,
//! which is told to do so through [`ToolAction::Commit`].

use egui::{Pos2, Rect};

use crate::drawable::DrawableId;
use crate::geometry::rect_from_corners;
use crate::layer::Layer;
use crate::style::BrushSettings;

pub mod freehand;
pub mod selection;
pub mod shape;
pub mod text;

/// Every tool the user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Line,
    Rectangle,
    Text,
    Select,
    Move,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Line,
        Tool::Rectangle,
        Tool::Text,
        Tool::Select,
        Tool::Move,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Eraser => "Eraser",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Text => "Text",
            Tool::Select => "Selection",
            Tool::Move => "Move",
        }
    }
}

/// Where the current gesture is.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    /// Brush or eraser drag
    Drawing,
    /// Line or rectangle: pressed at `anchor`, waiting for release
    AwaitingSecondPoint { anchor: Pos2 },
    /// Text tool pressed. `release` is set once the text has been asked for.
    TextPending { release: Option<Pos2> },
    /// Selection box dragged from `anchor`
    Selecting { anchor: Pos2 },
    /// Move drag; `target` is `None` when the press hit nothing
    Moving { target: Option<DrawableId>, last: Pos2 },
}

/// What the caller has to do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    /// The gesture changed the canvas and ended: push a history entry
    Commit,
    /// Ask the user for text to place at `position`
    RequestText { position: Pos2 },
}

/// Transient outline drawn over the canvas while a gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview {
    Line { from: Pos2, to: Pos2 },
    Rectangle { from: Pos2, to: Pos2 },
    SelectionBox(Rect),
}

/// Everything a tool may touch while handling an event.
pub struct ToolContext<'a> {
    /// The active layer
    pub layer: &'a mut Layer,
    pub brush: &'a BrushSettings,
}

/// The active tool plus the state of its in-progress gesture.
#[derive(Debug, Clone, Default)]
pub struct ToolSession {
    tool: Tool,
    state: ToolState,
    /// Result of the last selection gesture
    selection: Vec<DrawableId>,
    dragging: bool,
    /// The button is still down from an abandoned gesture; nothing starts
    /// until it is released
    suppressed: bool,
    /// Last known pointer position, for previews
    cursor: Option<Pos2>,
}

impl ToolSession {
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            ..Self::default()
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn selection(&self) -> &[DrawableId] {
        &self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_idle(&self) -> bool {
        self.state == ToolState::Idle
    }

    /// Switch tools. The gesture in progress is dropped without a commit.
    pub fn select_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::info!("Switching tool: {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
        self.abandon();
        self.selection.clear();
    }

    /// Whether input is ignored until the pointer is released.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Drop the gesture in progress. Edits it already made stay on the canvas
    /// and the rest of the drag is ignored.
    pub fn abandon(&mut self) {
        if !self.is_idle() {
            log::debug!("Abandoning {:?} gesture in state {:?}", self.tool, self.state);
        }
        self.state = ToolState::Idle;
        self.suppressed |= self.dragging;
        self.dragging = false;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Leave `TextPending` once the requested text was answered or cancelled.
    pub fn finish_text(&mut self) {
        if matches!(self.state, ToolState::TextPending { .. }) {
            self.state = ToolState::Idle;
        }
    }

    pub fn pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolAction> {
        self.cursor = Some(pos);
        if matches!(self.state, ToolState::TextPending { release: Some(_) }) {
            // Blocked on the text prompt
            return None;
        }

        self.suppressed = false;
        self.dragging = true;
        self.state = match self.tool {
            // Only move events paint
            Tool::Brush | Tool::Eraser => ToolState::Drawing,
            Tool::Line | Tool::Rectangle => ToolState::AwaitingSecondPoint { anchor: pos },
            Tool::Text => ToolState::TextPending { release: None },
            Tool::Select => ToolState::Selecting { anchor: pos },
            Tool::Move => {
                let target = selection::pick_target(ctx.layer, pos);
                log::debug!("Move gesture grabbed {:?}", target);
                ToolState::Moving { target, last: pos }
            }
        };
        None
    }

    /// `held` is whether the primary button is down.
    pub fn pointer_move(&mut self, pos: Pos2, held: bool, ctx: &mut ToolContext<'_>) -> Option<ToolAction> {
        self.cursor = Some(pos);
        if !held {
            self.suppressed = false;
            return None;
        }
        if self.suppressed {
            return None;
        }

        match (self.tool, &mut self.state) {
            // A drag that started outside the canvas still paints
            (Tool::Brush | Tool::Eraser, state @ ToolState::Idle) => {
                *state = ToolState::Drawing;
                self.dragging = true;
                paint(self.tool, pos, ctx);
            }
            (Tool::Brush | Tool::Eraser, ToolState::Drawing) => paint(self.tool, pos, ctx),
            (Tool::Move, ToolState::Moving { target, last }) => {
                if let Some(target) = *target {
                    selection::drag_target(ctx.layer, target, pos - *last);
                }
                *last = pos;
            }
            _ => {}
        }
        None
    }

    pub fn pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<ToolAction> {
        self.cursor = Some(pos);
        self.dragging = false;
        if std::mem::take(&mut self.suppressed) {
            return None;
        }

        let state = std::mem::take(&mut self.state);
        match (self.tool, state) {
            (_, ToolState::Drawing) => Some(ToolAction::Commit),
            (tool, ToolState::AwaitingSecondPoint { anchor }) => {
                shape::place_shape(ctx.layer, tool, anchor, pos, ctx.brush).map(|_| ToolAction::Commit)
            }
            (_, ToolState::TextPending { release: None }) => {
                self.state = ToolState::TextPending { release: Some(pos) };
                Some(ToolAction::RequestText { position: pos })
            }
            (_, state @ ToolState::TextPending { release: Some(_) }) => {
                self.state = state;
                None
            }
            (_, ToolState::Selecting { anchor }) => {
                self.selection = selection::select_enclosed(ctx.layer, anchor, pos);
                log::debug!("Selected {} drawable(s)", self.selection.len());
                None
            }
            (_, ToolState::Moving { target, .. }) => target.map(|_| ToolAction::Commit),
            (_, ToolState::Idle) => None,
        }
    }

    /// Outline to draw for the gesture in progress.
    pub fn preview(&self) -> Option<Preview> {
        let cursor = self.cursor?;
        match (self.tool, &self.state) {
            (Tool::Line, ToolState::AwaitingSecondPoint { anchor }) => Some(Preview::Line {
                from: *anchor,
                to: cursor,
            }),
            (Tool::Rectangle, ToolState::AwaitingSecondPoint { anchor }) => Some(Preview::Rectangle {
                from: *anchor,
                to: cursor,
            }),
            (_, ToolState::Selecting { anchor }) => Some(Preview::SelectionBox(rect_from_corners(*anchor, cursor))),
            _ => None,
        }
    }
}

/// One brush dab or eraser pass at `pos`.
fn paint(tool: Tool, pos: Pos2, ctx: &mut ToolContext<'_>) {
    match tool {
        Tool::Brush => {
            freehand::paint_dot(ctx.layer, pos, ctx.brush);
        }
        Tool::Eraser => {
            let removed = freehand::erase_at(ctx.layer, pos, ctx.brush.size);
            if !removed.is_empty() {
                log::debug!("Erased {} drawable(s)", removed.len());
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn context<'a>(layer: &'a mut Layer, brush: &'a BrushSettings) -> ToolContext<'a> {
        ToolContext { layer, brush }
    }

    #[test]
    fn test_brush_paints_only_on_move() {
        let mut layer = Layer::new("Layer 1", 100, 100);
        let brush = BrushSettings::default();
        let mut session = ToolSession::new(Tool::Brush);
        let mut ctx = context(&mut layer, &brush);

        assert_eq!(session.pointer_down(pos2(10.0, 10.0), &mut ctx), None);
        assert_eq!(session.state(), &ToolState::Drawing);
        assert!(ctx.layer.drawables().is_empty());

        session.pointer_move(pos2(11.0, 10.0), true, &mut ctx);
        session.pointer_move(pos2(12.0, 10.0), true, &mut ctx);
        assert_eq!(ctx.layer.drawables().len(), 2);

        assert_eq!(session.pointer_up(pos2(12.0, 10.0), &mut ctx), Some(ToolAction::Commit));
        assert!(session.is_idle());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_hover_without_button_does_nothing() {
        let mut layer = Layer::new("Layer 1", 100, 100);
        let brush = BrushSettings::default();
        let mut session = ToolSession::new(Tool::Brush);
        let mut ctx = context(&mut layer, &brush);

        session.pointer_move(pos2(11.0, 10.0), false, &mut ctx);
        assert!(ctx.layer.drawables().is_empty());
        assert!(session.is_idle());
    }

    #[test]
    fn test_line_gesture_records_anchor_and_release() {
        let mut layer = Layer::new("Layer 1", 200, 200);
        let brush = BrushSettings::default();
        let mut session = ToolSession::new(Tool::Line);
        let mut ctx = context(&mut layer, &brush);

        session.pointer_down(pos2(10.0, 10.0), &mut ctx);
        assert_eq!(
            session.state(),
            &ToolState::AwaitingSecondPoint { anchor: pos2(10.0, 10.0) }
        );
        session.pointer_move(pos2(50.0, 30.0), true, &mut ctx);
        assert_eq!(
            session.preview(),
            Some(Preview::Line { from: pos2(10.0, 10.0), to: pos2(50.0, 30.0) })
        );

        assert_eq!(session.pointer_up(pos2(100.0, 50.0), &mut ctx), Some(ToolAction::Commit));
        assert_eq!(ctx.layer.drawables().len(), 1);
        assert_eq!(session.preview(), None);
    }

    #[test]
    fn test_text_waits_for_answer() {
        let mut layer = Layer::new("Layer 1", 100, 100);
        let brush = BrushSettings::default();
        let mut session = ToolSession::new(Tool::Text);
        let mut ctx = context(&mut layer, &brush);

        session.pointer_down(pos2(5.0, 5.0), &mut ctx);
        let action = session.pointer_up(pos2(40.0, 40.0), &mut ctx);
        assert_eq!(action, Some(ToolAction::RequestText { position: pos2(40.0, 40.0) }));

        // Presses are ignored until the text is answered
        session.pointer_down(pos2(1.0, 1.0), &mut ctx);
        assert_eq!(
            session.state(),
            &ToolState::TextPending { release: Some(pos2(40.0, 40.0)) }
        );

        session.finish_text();
        assert!(session.is_idle());
    }

    #[test]
    fn test_move_without_target_commits_nothing() {
        let mut layer = Layer::new("Layer 1", 100, 100);
        let brush = BrushSettings::default();
        let mut session = ToolSession::new(Tool::Move);
        let mut ctx = context(&mut layer, &brush);

        session.pointer_down(pos2(5.0, 5.0), &mut ctx);
        session.pointer_move(pos2(25.0, 5.0), true, &mut ctx);
        assert_eq!(session.pointer_up(pos2(25.0, 5.0), &mut ctx), None);
    }

    #[test]
    fn test_abandoned_drag_stays_dead_until_release() {
        let mut layer = Layer::new("Layer 1", 100, 100);
        let brush = BrushSettings::default();
        let mut session = ToolSession::new(Tool::Brush);
        let mut ctx = context(&mut layer, &brush);

        session.pointer_down(pos2(10.0, 10.0), &mut ctx);
        session.pointer_move(pos2(11.0, 10.0), true, &mut ctx);
        session.abandon();
        assert!(session.is_suppressed());

        session.pointer_move(pos2(12.0, 10.0), true, &mut ctx);
        assert!(session.is_idle());
        assert_eq!(ctx.layer.drawables().len(), 1);
        assert_eq!(session.pointer_up(pos2(12.0, 10.0), &mut ctx), None);
        assert!(!session.is_suppressed());

        // The next drag paints again
        session.pointer_move(pos2(20.0, 20.0), true, &mut ctx);
        assert_eq!(session.state(), &ToolState::Drawing);
    }

    #[test]
    fn test_abandon_while_idle_suppresses_nothing() {
        let mut layer = Layer::new("Layer 1", 100, 100);
        let brush = BrushSettings::default();
        let mut session = ToolSession::new(Tool::Brush);
        let mut ctx = context(&mut layer, &brush);

        session.abandon();
        assert!(!session.is_suppressed());
        session.pointer_move(pos2(20.0, 20.0), true, &mut ctx);
        assert_eq!(ctx.layer.drawables().len(), 1);
    }

    #[test]
    fn test_switching_tool_abandons_gesture_and_selection() {
        let mut layer = Layer::new("Layer 1", 100, 100);
        let brush = BrushSettings::default();
        let mut session = ToolSession::new(Tool::Rectangle);
        let mut ctx = context(&mut layer, &brush);

        session.pointer_down(pos2(5.0, 5.0), &mut ctx);
        session.select_tool(Tool::Brush);
        assert!(session.is_idle());

        // The release that follows belongs to no gesture
        assert_eq!(session.pointer_up(pos2(50.0, 50.0), &mut ctx), None);
        assert!(ctx.layer.drawables().is_empty());
    }
}
