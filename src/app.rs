use crate::config::EditorConfig;
use crate::dialogs::{GuiPrompter, PromptDialog};
use crate::editor::Editor;
use crate::error::EditorResult;
use crate::file_io::{self, DroppedImage, FileHandler};
use crate::input::InputHandler;
use crate::panels::{central_panel, layers_panel, menu_bar, status_bar};
use crate::prompt::Prompter;
use crate::renderer::Renderer;
use crate::style::BrushSettings;

/// Storage key for the brush settings remembered between runs
const BRUSH_KEY: &str = "brush";

/// How long a notification stays on screen, in seconds
const NOTIFICATION_SECONDS: f64 = 4.0;

struct Notification {
    message: String,
    expires_at: f64,
}

pub struct PaintApp {
    editor: Editor,
    renderer: Renderer,
    input_handler: InputHandler,
    prompter: GuiPrompter,
    dialog: PromptDialog,
    file_handler: FileHandler,
    notifications: Vec<Notification>,
    /// Time of the current frame, for notification expiry
    now: f64,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let mut editor = Editor::new(config);
        if let Some(storage) = cc.storage {
            if let Some(brush) = eframe::get_value::<BrushSettings>(storage, BRUSH_KEY) {
                log::info!("Restored brush settings: {:?}", brush);
                editor.set_brush(brush);
            }
        }

        Self {
            editor,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            prompter: GuiPrompter,
            dialog: PromptDialog::default(),
            file_handler: FileHandler::new(),
            notifications: Vec::new(),
            now: 0.0,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// Paint the canvas and overlays into `rect`.
    pub fn paint_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        self.renderer.render(ctx, painter, rect, &self.editor);
    }

    pub fn input_handler_mut(&mut self) -> &mut InputHandler {
        &mut self.input_handler
    }

    /// Run an editor command that may ask the user something, reporting any
    /// failure as a notification.
    pub fn run<T>(&mut self, command: impl FnOnce(&mut Editor, &mut dyn Prompter) -> EditorResult<T>) -> Option<T> {
        let result = command(&mut self.editor, &mut self.prompter);
        self.report(result)
    }

    /// Turn an error into a notification.
    pub fn report<T>(&mut self, result: EditorResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("{}", err);
                self.notifications.push(Notification {
                    message: err.to_string(),
                    expires_at: self.now + NOTIFICATION_SECONDS,
                });
                None
            }
        }
    }

    /// Feed this frame's input events to the editor.
    pub fn handle_input(&mut self, ctx: &egui::Context) {
        let events = self.input_handler.process_input(ctx);
        for event in events {
            let result = self.editor.handle_event(event, &mut self.prompter);
            self.report(result);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let result = match self.file_handler.take_dropped_image(ctx) {
            Some(DroppedImage::Path(path)) => self.editor.open(&path),
            Some(DroppedImage::Bytes { name, bytes }) => {
                file_io::decode_image_bytes(&name, &bytes).map(|image| self.editor.open_image(image))
            }
            None => return,
        };
        self.report(result);
    }

    fn show_notifications(&mut self, ctx: &egui::Context) {
        let now = self.now;
        self.notifications.retain(|n| n.expires_at > now);
        if self.notifications.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notifications"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for notification in &self.notifications {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.colored_label(ui.visuals().warn_fg_color, &notification.message);
                    });
                }
            });
        // Keep repainting so expired notifications disappear
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, BRUSH_KEY, self.editor.brush());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.now = ctx.input(|i| i.time);

        menu_bar(self, ctx);
        status_bar(self, ctx);
        layers_panel(self, ctx);
        central_panel(self, ctx);

        if let Some(answer) = self.dialog.show(ctx, &self.editor) {
            let result = self.editor.resolve_prompt(answer);
            self.report(result);
        }

        self.handle_dropped_files(ctx);
        self.show_notifications(ctx);
    }
}
