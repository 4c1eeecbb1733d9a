use egui::{Pos2, Rect, Vec2};

use super::{DrawableId, Primitive};
use crate::geometry::rect_contains;
use crate::style::Style;
use crate::surface::{RasterSurface, font};

/// A run of text centered on its anchor.
///
/// The model does not know the rendered extent of the glyphs, so for every
/// query the text is treated as the single anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    id: DrawableId,
    position: Pos2,
    content: String,
    font_size: f32,
    style: Style,
}

impl Text {
    pub fn new(id: DrawableId, position: Pos2, content: String, font_size: f32, style: Style) -> Self {
        Self {
            id,
            position,
            content,
            font_size: font_size.max(1.0),
            style,
        }
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl Primitive for Text {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "text"
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_max(self.position, self.position)
    }

    fn enclosed_by(&self, region: Rect) -> bool {
        rect_contains(region, self.position)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn rasterize(&self, surface: &mut RasterSurface) {
        // Glyphs take the fill color; with no fill they fall back to the stroke
        let color = self.style.fill_color.unwrap_or(self.style.stroke_color);
        font::draw_text(surface.image_mut(), &self.content, self.position, self.font_size, color);
    }
}
