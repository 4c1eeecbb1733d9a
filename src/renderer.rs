use eframe::egui::{self, Color32, ColorImage, Painter, Pos2, Rect, Stroke, TextureHandle, TextureOptions, Vec2};

use crate::drawable::Primitive;
use crate::editor::Editor;
use crate::tools::Preview;

const PREVIEW_STROKE: Stroke = Stroke {
    width: 1.0,
    color: Color32::from_rgb(60, 120, 220),
};

const SELECTION_STROKE: Stroke = Stroke {
    width: 1.0,
    color: Color32::from_rgb(255, 140, 0),
};

/// Uploads the editor's composite as a texture and paints it plus the
/// transient overlays.
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    /// Editor revision the texture was built from
    uploaded: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").field("uploaded", &self.uploaded).finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas size in points.
    pub fn canvas_size(editor: &Editor) -> Vec2 {
        Vec2::new(editor.layers().width() as f32, editor.layers().height() as f32)
    }

    /// Re-upload the composite if the editor changed since the last frame.
    fn sync(&mut self, ctx: &egui::Context, editor: &Editor) {
        if self.uploaded == Some(editor.revision()) && self.texture.is_some() {
            return;
        }
        let composite = editor.composite();
        let size = [composite.width() as usize, composite.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, composite.as_raw());
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST)),
        }
        self.uploaded = Some(editor.revision());
    }

    /// Paint the canvas into `rect`, whose top-left is canvas origin.
    pub fn render(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect, editor: &Editor) {
        self.sync(ctx, editor);
        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }

        let to_screen = |p: Pos2| rect.min + p.to_vec2();
        let active = editor.layers().active();
        for id in editor.selection() {
            if let Some(drawable) = active.drawable(*id) {
                let bounds = drawable.bounds();
                let outline = Rect::from_min_max(to_screen(bounds.min), to_screen(bounds.max)).expand(2.0);
                painter.rect_stroke(outline, 0.0, SELECTION_STROKE);
            }
        }

        match editor.session().preview() {
            Some(Preview::Line { from, to }) => {
                painter.line_segment([to_screen(from), to_screen(to)], PREVIEW_STROKE);
            }
            Some(Preview::Rectangle { from, to }) | Some(Preview::SelectionBox(Rect { min: from, max: to })) => {
                painter.rect_stroke(Rect::from_two_pos(to_screen(from), to_screen(to)), 0.0, PREVIEW_STROKE);
            }
            None => {}
        }
    }
}
