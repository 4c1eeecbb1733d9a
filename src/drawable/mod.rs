use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::rects_overlap;
use crate::style::{Style, StyleUpdate};
use crate::surface::RasterSurface;

mod dot;
mod line;
mod rectangle;
mod text;

pub use dot::FreehandDot;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::Text;

// Single static counter for all drawables
static NEXT_DRAWABLE_ID: AtomicUsize = AtomicUsize::new(1);

/// Stable handle of a placed drawable, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrawableId(usize);

impl DrawableId {
    pub fn next() -> Self {
        Self(NEXT_DRAWABLE_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a region query matches drawables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Bounding box intersects the region (eraser, hit-testing).
    Overlapping,
    /// Defining points all lie inside the region (selection box).
    Enclosed,
}

/// Behaviour shared by every primitive that can be placed on a layer
pub trait Primitive {
    fn id(&self) -> DrawableId;

    /// Short lowercase name of the primitive kind
    fn kind(&self) -> &'static str;

    fn style(&self) -> &Style;

    fn style_mut(&mut self) -> &mut Style;

    /// Axis-aligned bounds of the defining geometry
    fn bounds(&self) -> Rect;

    /// Whether every defining point lies inside `region`
    fn enclosed_by(&self, region: Rect) -> bool;

    fn translate(&mut self, delta: Vec2);

    /// Paint onto the surface, on top of what is already there
    fn rasterize(&self, surface: &mut RasterSurface);

    fn overlaps(&self, region: Rect) -> bool {
        rects_overlap(self.bounds(), region)
    }
}

/// Every kind of drawable a layer can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Dot(FreehandDot),
    Line(Line),
    Rectangle(Rectangle),
    Text(Text),
}

impl Drawable {
    pub fn matches(&self, region: Rect, mode: QueryMode) -> bool {
        match mode {
            QueryMode::Overlapping => self.overlaps(region),
            QueryMode::Enclosed => self.enclosed_by(region),
        }
    }

    pub fn apply_style(&mut self, update: &StyleUpdate) {
        self.style_mut().apply(update);
    }
}

impl Primitive for Drawable {
    fn id(&self) -> DrawableId {
        match self {
            Drawable::Dot(d) => d.id(),
            Drawable::Line(l) => l.id(),
            Drawable::Rectangle(r) => r.id(),
            Drawable::Text(t) => t.id(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Drawable::Dot(d) => d.kind(),
            Drawable::Line(l) => l.kind(),
            Drawable::Rectangle(r) => r.kind(),
            Drawable::Text(t) => t.kind(),
        }
    }

    fn style(&self) -> &Style {
        match self {
            Drawable::Dot(d) => d.style(),
            Drawable::Line(l) => l.style(),
            Drawable::Rectangle(r) => r.style(),
            Drawable::Text(t) => t.style(),
        }
    }

    fn style_mut(&mut self) -> &mut Style {
        match self {
            Drawable::Dot(d) => d.style_mut(),
            Drawable::Line(l) => l.style_mut(),
            Drawable::Rectangle(r) => r.style_mut(),
            Drawable::Text(t) => t.style_mut(),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Drawable::Dot(d) => d.bounds(),
            Drawable::Line(l) => l.bounds(),
            Drawable::Rectangle(r) => r.bounds(),
            Drawable::Text(t) => t.bounds(),
        }
    }

    fn enclosed_by(&self, region: Rect) -> bool {
        match self {
            Drawable::Dot(d) => d.enclosed_by(region),
            Drawable::Line(l) => l.enclosed_by(region),
            Drawable::Rectangle(r) => r.enclosed_by(region),
            Drawable::Text(t) => t.enclosed_by(region),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            Drawable::Dot(d) => d.translate(delta),
            Drawable::Line(l) => l.translate(delta),
            Drawable::Rectangle(r) => r.translate(delta),
            Drawable::Text(t) => t.translate(delta),
        }
    }

    fn rasterize(&self, surface: &mut RasterSurface) {
        match self {
            Drawable::Dot(d) => d.rasterize(surface),
            Drawable::Line(l) => l.rasterize(surface),
            Drawable::Rectangle(r) => r.rasterize(surface),
            Drawable::Text(t) => t.rasterize(surface),
        }
    }
}

/// Factory functions for creating drawables with fresh ids
pub mod factory {
    use super::*;

    pub fn create_dot(center: Pos2, radius: f32, style: Style) -> Drawable {
        Drawable::Dot(FreehandDot::new(DrawableId::next(), center, radius, style))
    }

    pub fn create_line(p1: Pos2, p2: Pos2, style: Style) -> Drawable {
        Drawable::Line(Line::new(DrawableId::next(), p1, p2, style))
    }

    pub fn create_rectangle(p1: Pos2, p2: Pos2, style: Style) -> Drawable {
        Drawable::Rectangle(Rectangle::new(DrawableId::next(), p1, p2, style))
    }

    /// `None` for empty content: empty input places nothing.
    pub fn create_text(position: Pos2, content: &str, font_size: f32, style: Style) -> Option<Drawable> {
        if content.is_empty() {
            return None;
        }
        Some(Drawable::Text(Text::new(
            DrawableId::next(),
            position,
            content.to_owned(),
            font_size,
            style,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2, vec2};

    #[test]
    fn test_ids_are_unique() {
        let a = factory::create_dot(pos2(0.0, 0.0), 2.0, Style::default());
        let b = factory::create_dot(pos2(0.0, 0.0), 2.0, Style::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_overlap_and_enclosure_differ() {
        let line = factory::create_line(pos2(10.0, 10.0), pos2(50.0, 50.0), Style::default());
        let region = Rect::from_min_max(pos2(0.0, 0.0), pos2(30.0, 30.0));

        assert!(line.matches(region, QueryMode::Overlapping));
        assert!(!line.matches(region, QueryMode::Enclosed));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(factory::create_text(pos2(1.0, 1.0), "", 16.0, Style::default()).is_none());
        assert!(factory::create_text(pos2(1.0, 1.0), "hi", 16.0, Style::default()).is_some());
    }

    #[test]
    fn test_apply_style_through_enum() {
        let mut rect = factory::create_rectangle(pos2(0.0, 0.0), pos2(5.0, 5.0), Style::solid(Color32::RED, 2));
        rect.apply_style(&StyleUpdate::fill(None));
        assert_eq!(rect.style().fill_color, None);
        assert_eq!(rect.style().stroke_color, Color32::RED);

        rect.translate(vec2(1.0, 2.0));
        assert_eq!(rect.bounds().min, pos2(1.0, 2.0));
    }
}
