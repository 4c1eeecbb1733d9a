use egui::{Pos2, Rect, Vec2};

use super::{DrawableId, Primitive};
use crate::geometry::{rect_contains, rect_from_corners};
use crate::style::Style;
use crate::surface::{RasterSurface, raster};

/// An axis-aligned rectangle. The corners are kept exactly as placed, in
/// gesture order, so `first` is the press point and `second` the release.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    id: DrawableId,
    first: Pos2,
    second: Pos2,
    style: Style,
}

impl Rectangle {
    pub fn new(id: DrawableId, first: Pos2, second: Pos2, style: Style) -> Self {
        Self {
            id,
            first,
            second,
            style,
        }
    }

    pub fn corners(&self) -> (Pos2, Pos2) {
        (self.first, self.second)
    }
}

impl Primitive for Rectangle {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "rectangle"
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn bounds(&self) -> Rect {
        rect_from_corners(self.first, self.second)
    }

    fn enclosed_by(&self, region: Rect) -> bool {
        rect_contains(region, self.first) && rect_contains(region, self.second)
    }

    fn translate(&mut self, delta: Vec2) {
        self.first += delta;
        self.second += delta;
    }

    fn rasterize(&self, surface: &mut RasterSurface) {
        let rect = self.bounds();
        let image = surface.image_mut();
        if let Some(fill) = self.style.fill_color {
            raster::fill_rect(image, rect, fill);
        }
        raster::stroke_rect(image, rect, self.style.stroke_width as f32, self.style.stroke_color);
    }
}
