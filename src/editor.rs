use std::path::{Path, PathBuf};

use egui::{Color32, Key, Modifiers, PointerButton, Pos2};
use image::RgbaImage;

use crate::config::EditorConfig;
use crate::drawable::DrawableId;
use crate::error::{EditorError, EditorResult};
use crate::file_io;
use crate::history::History;
use crate::input::InputEvent;
use crate::layer::LayerId;
use crate::layer_stack::LayerStack;
use crate::prompt::{PendingPrompt, Prompt, PromptAnswer, Prompter};
use crate::style::{BrushSettings, StyleUpdate};
use crate::tools::{Tool, ToolAction, ToolContext, ToolSession, text};

/// Outcome of a layer deletion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerDeletion {
    Removed(LayerId),
    /// The layer was the only one left, so it was cleared instead
    Cleared(LayerId),
}

/// One drawing session: the layers, their history, the active tool and the
/// brush, plus whatever question the session is waiting on.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    layers: LayerStack,
    history: History,
    session: ToolSession,
    brush: BrushSettings,
    pending_prompt: Option<PendingPrompt>,
    /// A commit failed because the surface had no area; retried on resize
    commit_pending: bool,
    /// Bumped whenever pixels may have changed
    revision: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let brush = BrushSettings::new(config.brush_color(), config.brush_size, config.fill_shapes);
        Self {
            layers: LayerStack::new(config.canvas_width, config.canvas_height),
            history: History::new(),
            session: ToolSession::new(Tool::default()),
            brush,
            pending_prompt: None,
            commit_pending: false,
            revision: 0,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn session(&self) -> &ToolSession {
        &self.session
    }

    pub fn tool(&self) -> Tool {
        self.session.tool()
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    /// Replace the brush wholesale, e.g. with settings restored from storage.
    pub fn set_brush(&mut self, brush: BrushSettings) {
        self.brush = BrushSettings::new(brush.color, brush.size, brush.fill_enabled);
    }

    pub fn selection(&self) -> &[DrawableId] {
        self.session.selection()
    }

    pub fn pending_prompt(&self) -> Option<&PendingPrompt> {
        self.pending_prompt.as_ref()
    }

    pub fn is_commit_pending(&self) -> bool {
        self.commit_pending
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// The visible layers blended over the background color.
    pub fn composite(&self) -> RgbaImage {
        self.layers.composite(self.config.background_color())
    }

    // ---- Input ----

    /// Feed one input event through the active tool.
    ///
    /// Pointer input is ignored while a prompt is pending.
    pub fn handle_event(&mut self, event: InputEvent, prompter: &mut dyn Prompter) -> EditorResult<()> {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.handle_key(key, modifiers);
                Ok(())
            }
            _ if self.pending_prompt.is_some() => Ok(()),
            InputEvent::PointerDown {
                location,
                button: PointerButton::Primary,
            } if location.is_in_canvas => {
                let mut ctx = ToolContext {
                    layer: self.layers.active_mut(),
                    brush: &self.brush,
                };
                let action = self.session.pointer_down(location.position, &mut ctx);
                self.apply_action(action, prompter)
            }
            InputEvent::PointerMove { location, held_buttons } if location.is_in_canvas => {
                let held = held_buttons.contains(&PointerButton::Primary);
                let mut ctx = ToolContext {
                    layer: self.layers.active_mut(),
                    brush: &self.brush,
                };
                let action = self.session.pointer_move(location.position, held, &mut ctx);
                if held {
                    self.touch();
                }
                self.apply_action(action, prompter)
            }
            InputEvent::PointerUp {
                location,
                button: PointerButton::Primary,
            } => {
                let mut ctx = ToolContext {
                    layer: self.layers.active_mut(),
                    brush: &self.brush,
                };
                let action = self.session.pointer_up(location.position, &mut ctx);
                self.touch();
                self.apply_action(action, prompter)
            }
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        if self.pending_prompt.is_some() {
            if key == Key::Escape {
                self.cancel_prompt();
            }
            return;
        }
        match key {
            Key::Escape => self.session.abandon(),
            Key::Z if modifiers.command && modifiers.shift => {
                self.redo();
            }
            Key::Z if modifiers.command => {
                self.undo();
            }
            Key::Y if modifiers.command => {
                self.redo();
            }
            _ => {}
        }
    }

    fn apply_action(&mut self, action: Option<ToolAction>, prompter: &mut dyn Prompter) -> EditorResult<()> {
        match action {
            None => Ok(()),
            Some(ToolAction::Commit) => {
                self.commit_or_defer();
                Ok(())
            }
            Some(ToolAction::RequestText { position }) => match prompter.ask_text("Enter text:") {
                Prompt::Answered(content) => self.submit_text(position, &content).map(|_| ()).or_else(ignore_empty),
                Prompt::Cancelled => self.submit_text(position, "").map(|_| ()).or_else(ignore_empty),
                Prompt::Pending => {
                    self.pending_prompt = Some(PendingPrompt::Text { position });
                    Ok(())
                }
            },
        }
    }

    /// Place text at `position` on the active layer and commit it. Empty text
    /// places nothing and fails with [`EditorError::EmptyGesture`].
    pub fn submit_text(&mut self, position: Pos2, content: &str) -> EditorResult<DrawableId> {
        self.session.finish_text();
        let placed = text::place_text(
            self.layers.active_mut(),
            position,
            content,
            self.config.text_size,
            &self.brush,
        );
        let id = placed.inspect_err(|err| log::debug!("Text dropped: {}", err))?;
        self.touch();
        self.commit_or_defer();
        Ok(id)
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.session.select_tool(tool);
    }

    // ---- History ----

    /// Push a snapshot of every layer onto the history.
    pub fn commit(&mut self) -> EditorResult<()> {
        let snapshot = self.layers.capture_all()?;
        self.history.commit(snapshot);
        self.commit_pending = false;
        log::debug!("Committed snapshot ({} in history)", self.history.past_len());
        Ok(())
    }

    fn commit_or_defer(&mut self) {
        if let Err(err) = self.commit() {
            log::warn!("Deferring commit: {}", err);
            self.commit_pending = true;
        }
    }

    /// Step back one commit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.session.abandon();
        let Some(snapshot) = self.history.undo() else {
            log::debug!("Nothing to undo");
            return false;
        };
        self.layers.restore_all(&snapshot);
        self.session.clear_selection();
        self.touch();
        log::info!("Undo ({} left)", self.history.past_len());
        true
    }

    /// Step forward one commit. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.session.abandon();
        let Some(snapshot) = self.history.redo() else {
            log::debug!("Nothing to redo");
            return false;
        };
        self.layers.restore_all(&snapshot);
        self.session.clear_selection();
        self.touch();
        log::info!("Redo ({} left)", self.history.future_len());
        true
    }

    /// Wipe every layer and forget the history.
    pub fn clear(&mut self) {
        self.session.abandon();
        self.session.clear_selection();
        self.layers.clear_all();
        self.history.reset();
        self.commit_pending = false;
        self.touch();
        log::info!("Cleared canvas");
    }

    /// Layout pass. Retries a commit that failed for lack of a surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.layers.width(), self.layers.height()) {
            log::debug!("Resizing canvas to {}x{}", width, height);
            self.layers.resize(width, height);
            self.touch();
        }
        if self.commit_pending {
            self.commit_or_defer();
        }
    }

    // ---- Brush and style commands ----

    pub fn change_brush_color(&mut self, prompter: &mut dyn Prompter) {
        if self.prompt_busy() {
            return;
        }
        match prompter.pick_color("Brush Color", self.brush.color) {
            Prompt::Answered(color) => self.set_brush_color(color),
            Prompt::Cancelled => {}
            Prompt::Pending => self.pending_prompt = Some(PendingPrompt::BrushColor),
        }
    }

    /// Affects new drawables only.
    pub fn set_brush_color(&mut self, color: Color32) {
        log::info!("Brush color set to {:?}", color);
        self.brush.color = color;
    }

    pub fn change_brush_size(&mut self, prompter: &mut dyn Prompter) -> EditorResult<()> {
        if self.prompt_busy() {
            return Ok(());
        }
        match prompter.ask_integer("Brush Size", i64::from(self.brush.size)) {
            Prompt::Answered(size) => self.set_brush_size(size),
            Prompt::Cancelled => Ok(()),
            Prompt::Pending => {
                self.pending_prompt = Some(PendingPrompt::BrushSize);
                Ok(())
            }
        }
    }

    /// Non-positive sizes are rejected and the current size is kept.
    pub fn set_brush_size(&mut self, size: i64) -> EditorResult<()> {
        self.brush.size = validate_size("brush size", size)?;
        log::info!("Brush size set to {}", self.brush.size);
        Ok(())
    }

    /// Fill every drawable with the brush color, and fill new shapes from now on.
    pub fn fill_shapes(&mut self) -> usize {
        self.brush.fill_enabled = true;
        let changed = self.layers.set_style_all(&StyleUpdate::fill(Some(self.brush.color)));
        self.touch();
        log::info!("Filled {} drawable(s)", changed);
        changed
    }

    /// Remove the fill of every drawable, and stop filling new shapes.
    pub fn no_fill_shapes(&mut self) -> usize {
        self.brush.fill_enabled = false;
        let changed = self.layers.set_style_all(&StyleUpdate::fill(None));
        self.touch();
        log::info!("Removed fill from {} drawable(s)", changed);
        changed
    }

    pub fn change_outline_color(&mut self, prompter: &mut dyn Prompter) {
        if self.prompt_busy() {
            return;
        }
        match prompter.pick_color("Outline Color", self.brush.color) {
            Prompt::Answered(color) => {
                self.set_outline_color(color);
            }
            Prompt::Cancelled => {}
            Prompt::Pending => self.pending_prompt = Some(PendingPrompt::OutlineColor),
        }
    }

    /// Set the brush color and recolor the outline of every drawable.
    pub fn set_outline_color(&mut self, color: Color32) -> usize {
        self.brush.color = color;
        let changed = self.layers.set_style_all(&StyleUpdate::stroke_color(color));
        self.touch();
        log::info!("Outline color set to {:?} on {} drawable(s)", color, changed);
        changed
    }

    pub fn change_outline_size(&mut self, prompter: &mut dyn Prompter) -> EditorResult<()> {
        if self.prompt_busy() {
            return Ok(());
        }
        match prompter.ask_integer("Outline Size", i64::from(self.brush.size)) {
            Prompt::Answered(size) => self.set_outline_size(size).map(|_| ()),
            Prompt::Cancelled => Ok(()),
            Prompt::Pending => {
                self.pending_prompt = Some(PendingPrompt::OutlineSize);
                Ok(())
            }
        }
    }

    /// Set the brush size and the stroke width of every drawable.
    /// Non-positive sizes are rejected and nothing changes.
    pub fn set_outline_size(&mut self, size: i64) -> EditorResult<usize> {
        let size = validate_size("outline size", size)?;
        self.brush.size = size;
        let changed = self.layers.set_style_all(&StyleUpdate::stroke_width(size));
        self.touch();
        log::info!("Outline size set to {} on {} drawable(s)", size, changed);
        Ok(changed)
    }

    // ---- Prompts ----

    /// Only one question can be open at a time.
    fn prompt_busy(&self) -> bool {
        match &self.pending_prompt {
            Some(prompt) => {
                log::warn!("{} is still open; answer it first", prompt.title());
                true
            }
            None => false,
        }
    }

    /// Drop the pending prompt as if the user cancelled it.
    pub fn cancel_prompt(&mut self) {
        let Some(prompt) = self.pending_prompt.take() else {
            return;
        };
        if let PendingPrompt::Text { .. } = prompt {
            self.session.finish_text();
        }
        log::debug!("{} cancelled", prompt.title());
    }

    /// Deliver the answer to the pending prompt.
    pub fn resolve_prompt(&mut self, answer: PromptAnswer) -> EditorResult<()> {
        let Some(prompt) = self.pending_prompt.take() else {
            log::warn!("Got a prompt answer with no prompt pending");
            return Ok(());
        };

        match (prompt, answer) {
            (PendingPrompt::Text { position }, PromptAnswer::Text(content)) => {
                self.submit_text(position, &content).map(|_| ()).or_else(ignore_empty)
            }
            (PendingPrompt::Text { .. }, _) => {
                self.session.finish_text();
                log::debug!("Text input cancelled");
                Ok(())
            }
            (PendingPrompt::BrushColor, PromptAnswer::Color(color)) => {
                self.set_brush_color(color);
                Ok(())
            }
            (PendingPrompt::BrushSize, PromptAnswer::Integer(size)) => self.set_brush_size(size),
            (PendingPrompt::OutlineColor, PromptAnswer::Color(color)) => {
                self.set_outline_color(color);
                Ok(())
            }
            (PendingPrompt::OutlineSize, PromptAnswer::Integer(size)) => self.set_outline_size(size).map(|_| ()),
            (PendingPrompt::OpenPath, PromptAnswer::Path(path)) => self.open(&path),
            (PendingPrompt::SavePath, PromptAnswer::Path(path)) => self.save(&path).map(|_| ()),
            (prompt, PromptAnswer::Cancelled) => {
                log::debug!("{} cancelled", prompt.title());
                Ok(())
            }
            (prompt, answer) => {
                log::warn!("Ignoring {:?} as an answer to {}", answer, prompt.title());
                Ok(())
            }
        }
    }

    // ---- Layers ----

    /// Add an empty layer on top and make it the target of new edits.
    pub fn add_layer(&mut self) -> LayerId {
        self.session.abandon();
        self.session.clear_selection();
        let id = self.layers.add_layer();
        log::info!("Added {}", self.layers.active().name);
        id
    }

    /// Delete a layer, or clear it when it is the last one.
    pub fn delete_layer(&mut self, id: LayerId) -> EditorResult<LayerDeletion> {
        if id == self.layers.active_id() {
            self.session.abandon();
            self.session.clear_selection();
        }
        let outcome = match self.layers.delete_layer(id) {
            Ok(removed) => {
                log::info!("Deleted {}", removed.name);
                LayerDeletion::Removed(id)
            }
            Err(EditorError::LastLayerProtected) => {
                let layer = self.layers.get_mut(id).ok_or(EditorError::UnknownLayer(id))?;
                layer.clear();
                log::info!("Cleared {} instead of deleting the last layer", layer.name);
                LayerDeletion::Cleared(id)
            }
            Err(err) => return Err(err),
        };
        self.touch();
        Ok(outcome)
    }

    pub fn delete_active_layer(&mut self) -> EditorResult<LayerDeletion> {
        self.delete_layer(self.layers.active_id())
    }

    pub fn move_layer_up(&mut self, id: LayerId) -> EditorResult<bool> {
        let moved = self.layers.move_up(id)?;
        if moved {
            self.touch();
        }
        Ok(moved)
    }

    pub fn move_layer_down(&mut self, id: LayerId) -> EditorResult<bool> {
        let moved = self.layers.move_down(id)?;
        if moved {
            self.touch();
        }
        Ok(moved)
    }

    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> EditorResult<()> {
        self.layers.set_visible(id, visible)?;
        self.touch();
        Ok(())
    }

    /// Make `id` the target of new edits. Any gesture in progress is dropped.
    pub fn select_layer(&mut self, id: LayerId) -> EditorResult<()> {
        if id == self.layers.active_id() {
            return Ok(());
        }
        self.layers.set_active(id)?;
        self.session.abandon();
        self.session.clear_selection();
        log::info!("Active layer: {}", self.layers.active().name);
        Ok(())
    }

    // ---- Files ----

    /// Write the composited canvas to `path`. Returns the path written.
    pub fn save(&self, path: &Path) -> EditorResult<PathBuf> {
        file_io::save_image(&self.composite(), path).inspect_err(|err| log::warn!("{}", err))
    }

    /// Replace the canvas with the image at `path`. On failure the canvas is
    /// left untouched.
    pub fn open(&mut self, path: &Path) -> EditorResult<()> {
        let image = file_io::load_image(path).inspect_err(|err| log::warn!("{}", err))?;
        self.open_image(image);
        Ok(())
    }

    /// Replace the canvas with `image` as a single layer and make it the new
    /// history baseline.
    pub fn open_image(&mut self, image: RgbaImage) {
        self.session.abandon();
        self.session.clear_selection();
        self.layers.replace_with_image(image);
        match self.layers.capture_all() {
            Ok(baseline) => {
                self.history.reset_to(baseline);
                self.commit_pending = false;
            }
            Err(err) => {
                log::warn!("Deferring baseline: {}", err);
                self.history.reset();
                self.commit_pending = true;
            }
        }
        self.touch();
    }

    /// Ask for a path and save there. `Ok(None)` when nothing was written yet.
    pub fn save_as(&mut self, prompter: &mut dyn Prompter) -> EditorResult<Option<PathBuf>> {
        if self.prompt_busy() {
            return Ok(None);
        }
        match prompter.save_path() {
            Prompt::Answered(path) => self.save(&path).map(Some),
            Prompt::Cancelled => Ok(None),
            Prompt::Pending => {
                self.pending_prompt = Some(PendingPrompt::SavePath);
                Ok(None)
            }
        }
    }

    /// Ask for a path and open it. Returns whether the canvas was replaced.
    pub fn open_from(&mut self, prompter: &mut dyn Prompter) -> EditorResult<bool> {
        if self.prompt_busy() {
            return Ok(false);
        }
        match prompter.open_path() {
            Prompt::Answered(path) => self.open(&path).map(|_| true),
            Prompt::Cancelled => Ok(false),
            Prompt::Pending => {
                self.pending_prompt = Some(PendingPrompt::OpenPath);
                Ok(false)
            }
        }
    }
}

fn validate_size(setting: &'static str, value: i64) -> EditorResult<u32> {
    if value <= 0 {
        log::warn!("Rejected {} {}", setting, value);
        return Err(EditorError::InvalidToolInput { setting, value });
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

fn ignore_empty(err: EditorError) -> EditorResult<()> {
    match err {
        EditorError::EmptyGesture => Ok(()),
        err => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{DeferredPrompter, ScriptedPrompter};
    use egui::pos2;

    fn small_editor() -> Editor {
        Editor::new(EditorConfig {
            canvas_width: 64,
            canvas_height: 64,
            ..EditorConfig::default()
        })
    }

    #[test]
    fn test_brush_follows_config() {
        let editor = Editor::new(EditorConfig {
            brush_size: 9,
            fill_shapes: false,
            ..EditorConfig::default()
        });
        assert_eq!(editor.brush().size, 9);
        assert!(!editor.brush().fill_enabled);
        assert_eq!(editor.tool(), Tool::Brush);
    }

    #[test]
    fn test_pointer_input_blocked_while_prompt_pending() {
        let mut editor = small_editor();
        let mut prompter = DeferredPrompter;
        editor.change_brush_color(&mut prompter);
        assert_eq!(editor.pending_prompt(), Some(&PendingPrompt::BrushColor));

        editor.handle_event(InputEvent::primary_down(pos2(5.0, 5.0)), &mut prompter).unwrap();
        editor.handle_event(InputEvent::primary_drag(pos2(6.0, 5.0)), &mut prompter).unwrap();
        assert!(editor.layers().active().drawables().is_empty());

        editor.resolve_prompt(PromptAnswer::Color(Color32::RED)).unwrap();
        assert_eq!(editor.brush().color, Color32::RED);
        assert!(editor.pending_prompt().is_none());
    }

    #[test]
    fn test_escape_cancels_pending_prompt() {
        let mut editor = small_editor();
        editor.change_outline_color(&mut DeferredPrompter);
        editor
            .handle_event(
                InputEvent::KeyDown {
                    key: Key::Escape,
                    modifiers: Modifiers::NONE,
                },
                &mut DeferredPrompter,
            )
            .unwrap();
        assert!(editor.pending_prompt().is_none());
        assert_eq!(editor.brush().color, Color32::BLACK);
    }

    #[test]
    fn test_second_prompt_waits_for_the_first() {
        let mut editor = small_editor();
        let mut prompter = DeferredPrompter;
        editor.select_tool(Tool::Text);
        editor.handle_event(InputEvent::primary_down(pos2(40.0, 40.0)), &mut prompter).unwrap();
        editor.handle_event(InputEvent::primary_up(pos2(40.0, 40.0)), &mut prompter).unwrap();
        assert_eq!(editor.pending_prompt(), Some(&PendingPrompt::Text { position: pos2(40.0, 40.0) }));

        editor.change_brush_size(&mut prompter).unwrap();
        editor.change_outline_color(&mut prompter);
        assert_eq!(editor.save_as(&mut prompter).unwrap(), None);
        assert_eq!(editor.pending_prompt(), Some(&PendingPrompt::Text { position: pos2(40.0, 40.0) }));

        editor.resolve_prompt(PromptAnswer::Text("Hi".into())).unwrap();
        assert_eq!(editor.layers().active().drawables().len(), 1);
        assert!(editor.session().is_idle());

        // The text tool asks again on the next click
        editor.handle_event(InputEvent::primary_down(pos2(10.0, 10.0)), &mut prompter).unwrap();
        editor.handle_event(InputEvent::primary_up(pos2(10.0, 10.0)), &mut prompter).unwrap();
        assert_eq!(editor.pending_prompt(), Some(&PendingPrompt::Text { position: pos2(10.0, 10.0) }));
    }

    #[test]
    fn test_cancelled_text_prompt_frees_the_tool() {
        let mut editor = small_editor();
        let mut prompter = DeferredPrompter;
        editor.select_tool(Tool::Text);
        editor.handle_event(InputEvent::primary_down(pos2(20.0, 20.0)), &mut prompter).unwrap();
        editor.handle_event(InputEvent::primary_up(pos2(20.0, 20.0)), &mut prompter).unwrap();

        editor.cancel_prompt();
        assert!(editor.pending_prompt().is_none());
        assert!(editor.session().is_idle());
        assert!(editor.layers().active().drawables().is_empty());
    }

    #[test]
    fn test_mismatched_answer_is_ignored() {
        let mut editor = small_editor();
        editor.change_brush_size(&mut DeferredPrompter).unwrap();
        editor.resolve_prompt(PromptAnswer::Text("big".into())).unwrap();
        assert_eq!(editor.brush().size, 5);
        assert!(editor.pending_prompt().is_none());
    }

    #[test]
    fn test_commit_deferred_until_surface_exists() {
        let mut editor = Editor::new(EditorConfig {
            canvas_width: 0,
            canvas_height: 0,
            ..EditorConfig::default()
        });
        let mut prompter = ScriptedPrompter::new();
        editor.select_tool(Tool::Line);
        editor.handle_event(InputEvent::primary_down(pos2(0.0, 0.0)), &mut prompter).unwrap();
        editor.handle_event(InputEvent::primary_up(pos2(3.0, 3.0)), &mut prompter).unwrap();
        assert!(editor.is_commit_pending());
        assert_eq!(editor.history().past_len(), 0);

        editor.resize(32, 32);
        assert!(!editor.is_commit_pending());
        assert_eq!(editor.history().past_len(), 1);
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut editor = small_editor();
        let mut prompter = ScriptedPrompter::new();
        for x in [10.0, 20.0] {
            editor.handle_event(InputEvent::primary_down(pos2(x, x)), &mut prompter).unwrap();
            editor.handle_event(InputEvent::primary_drag(pos2(x, x)), &mut prompter).unwrap();
            editor.handle_event(InputEvent::primary_up(pos2(x, x)), &mut prompter).unwrap();
        }
        assert_eq!(editor.history().past_len(), 2);

        let ctrl = Modifiers::COMMAND;
        editor
            .handle_event(InputEvent::KeyDown { key: Key::Z, modifiers: ctrl }, &mut prompter)
            .unwrap();
        assert!(editor.can_redo());
        editor
            .handle_event(InputEvent::KeyDown { key: Key::Y, modifiers: ctrl }, &mut prompter)
            .unwrap();
        assert!(!editor.can_redo());
        assert_eq!(editor.history().past_len(), 2);
    }
}
