use egui::{Pos2, Rect, Vec2, vec2};

use super::{DrawableId, Primitive};
use crate::geometry::rect_contains;
use crate::style::Style;
use crate::surface::{RasterSurface, raster};

/// A single brush dab: a circle laid down by the brush on each drag event.
#[derive(Debug, Clone, PartialEq)]
pub struct FreehandDot {
    id: DrawableId,
    center: Pos2,
    radius: f32,
    style: Style,
}

impl FreehandDot {
    /// The radius is clamped to at least 1.
    pub fn new(id: DrawableId, center: Pos2, radius: f32, style: Style) -> Self {
        Self {
            id,
            center,
            radius: radius.max(1.0),
            style,
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Primitive for FreehandDot {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "dot"
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, vec2(self.radius * 2.0, self.radius * 2.0))
    }

    fn enclosed_by(&self, region: Rect) -> bool {
        let bounds = self.bounds();
        rect_contains(region, bounds.min) && rect_contains(region, bounds.max)
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    fn rasterize(&self, surface: &mut RasterSurface) {
        let image = surface.image_mut();
        if let Some(fill) = self.style.fill_color {
            raster::fill_circle(image, self.center, self.radius, fill);
        }
        raster::stroke_circle(
            image,
            self.center,
            self.radius,
            self.style.stroke_width as f32,
            self.style.stroke_color,
        );
    }
}
