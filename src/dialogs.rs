//! egui implementations of the editor's prompts.

use std::path::PathBuf;

use eframe::egui::{self, Align2, Color32, Key};

use crate::editor::Editor;
use crate::prompt::{PendingPrompt, Prompt, PromptAnswer, Prompter};

/// Native file dialogs answer immediately; everything else is deferred to a
/// [`PromptDialog`] window.
#[derive(Debug, Default)]
pub struct GuiPrompter;

impl Prompter for GuiPrompter {
    fn pick_color(&mut self, _label: &str, _current: Color32) -> Prompt<Color32> {
        Prompt::Pending
    }

    fn ask_integer(&mut self, _label: &str, _current: i64) -> Prompt<i64> {
        Prompt::Pending
    }

    fn ask_text(&mut self, _label: &str) -> Prompt<String> {
        Prompt::Pending
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn open_path(&mut self) -> Prompt<PathBuf> {
        let picked = rfd::FileDialog::new()
            .add_filter("Images", &crate::file_io::IMAGE_EXTENSIONS)
            .pick_file();
        picked.map_or(Prompt::Cancelled, Prompt::Answered)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_path(&mut self) -> Prompt<PathBuf> {
        let picked = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name("drawing.png")
            .save_file();
        picked.map_or(Prompt::Cancelled, Prompt::Answered)
    }

    #[cfg(target_arch = "wasm32")]
    fn open_path(&mut self) -> Prompt<PathBuf> {
        Prompt::Pending
    }

    #[cfg(target_arch = "wasm32")]
    fn save_path(&mut self) -> Prompt<PathBuf> {
        Prompt::Pending
    }
}

/// The window shown while the editor waits on a prompt.
#[derive(Debug, Default)]
pub struct PromptDialog {
    /// The prompt the buffers below were initialised for
    showing: Option<PendingPrompt>,
    text: String,
    color: Color32,
    integer: i64,
}

impl PromptDialog {
    fn reset_for(&mut self, prompt: &PendingPrompt, editor: &Editor) {
        self.showing = Some(prompt.clone());
        self.text.clear();
        self.color = editor.brush().color;
        self.integer = i64::from(editor.brush().size);
    }

    /// Draw the dialog for the editor's pending prompt, if any. Returns the
    /// answer once the user confirms or cancels.
    pub fn show(&mut self, ctx: &egui::Context, editor: &Editor) -> Option<PromptAnswer> {
        let Some(prompt) = editor.pending_prompt() else {
            self.showing = None;
            return None;
        };
        if self.showing.as_ref() != Some(prompt) {
            self.reset_for(prompt, editor);
        }

        let mut answer = None;
        egui::Window::new(prompt.title())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(prompt.label());
                let submitted = match prompt {
                    PendingPrompt::Text { .. } | PendingPrompt::OpenPath | PendingPrompt::SavePath => {
                        let response = ui.text_edit_singleline(&mut self.text);
                        response.request_focus();
                        response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter))
                    }
                    PendingPrompt::BrushColor | PendingPrompt::OutlineColor => {
                        egui::color_picker::color_picker_color32(ui, &mut self.color, egui::color_picker::Alpha::Opaque);
                        false
                    }
                    PendingPrompt::BrushSize | PendingPrompt::OutlineSize => {
                        ui.add(egui::DragValue::new(&mut self.integer).range(-1000..=1000));
                        false
                    }
                };

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || submitted {
                        answer = Some(self.answer_for(prompt));
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(PromptAnswer::Cancelled);
                    }
                });
            });

        if answer.is_some() {
            self.showing = None;
        }
        answer
    }

    fn answer_for(&self, prompt: &PendingPrompt) -> PromptAnswer {
        match prompt {
            PendingPrompt::Text { .. } => PromptAnswer::Text(self.text.clone()),
            PendingPrompt::OpenPath | PendingPrompt::SavePath => {
                if self.text.trim().is_empty() {
                    PromptAnswer::Cancelled
                } else {
                    PromptAnswer::Path(PathBuf::from(self.text.trim()))
                }
            }
            PendingPrompt::BrushColor | PendingPrompt::OutlineColor => PromptAnswer::Color(self.color),
            PendingPrompt::BrushSize | PendingPrompt::OutlineSize => PromptAnswer::Integer(self.integer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_path_cancels() {
        let dialog = PromptDialog::default();
        assert_eq!(dialog.answer_for(&PendingPrompt::SavePath), PromptAnswer::Cancelled);
    }

    #[test]
    fn test_size_answer_is_passed_through_unvalidated() {
        let dialog = PromptDialog {
            integer: -3,
            ..PromptDialog::default()
        };
        assert_eq!(dialog.answer_for(&PendingPrompt::BrushSize), PromptAnswer::Integer(-3));
    }
}
