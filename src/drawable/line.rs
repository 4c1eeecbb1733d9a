use egui::{Pos2, Rect, Vec2};

use super::{DrawableId, Primitive};
use crate::geometry::{rect_contains, rect_from_corners};
use crate::style::Style;
use crate::surface::{RasterSurface, raster};

/// A straight segment drawn in the stroke color.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: DrawableId,
    start: Pos2,
    end: Pos2,
    style: Style,
}

impl Line {
    pub fn new(id: DrawableId, start: Pos2, end: Pos2, style: Style) -> Self {
        Self { id, start, end, style }
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }
}

impl Primitive for Line {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "line"
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn bounds(&self) -> Rect {
        rect_from_corners(self.start, self.end)
    }

    fn enclosed_by(&self, region: Rect) -> bool {
        rect_contains(region, self.start) && rect_contains(region, self.end)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn rasterize(&self, surface: &mut RasterSurface) {
        raster::draw_line(
            surface.image_mut(),
            self.start,
            self.end,
            self.style.stroke_width as f32,
            self.style.stroke_color,
        );
    }
}
