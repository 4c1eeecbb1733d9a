use egui::{Pos2, Rect, vec2};

use crate::drawable::{DrawableId, QueryMode, factory};
use crate::layer::Layer;
use crate::style::BrushSettings;

/// Lay down one brush dab centered on `pos`.
pub fn paint_dot(layer: &mut Layer, pos: Pos2, brush: &BrushSettings) -> DrawableId {
    layer.add_drawable(factory::create_dot(pos, brush.size as f32, brush.dot_style()))
}

/// The square an eraser of `size` covers when centered on `pos`.
pub fn eraser_region(pos: Pos2, size: u32) -> Rect {
    let side = 2.0 * size as f32;
    Rect::from_center_size(pos, vec2(side, side))
}

/// Remove every drawable whose bounds touch the eraser square.
pub fn erase_at(layer: &mut Layer, pos: Pos2, size: u32) -> Vec<DrawableId> {
    layer.remove_matching(eraser_region(pos, size), QueryMode::Overlapping)
}
