use egui::{Pos2, Vec2};

use crate::drawable::{DrawableId, QueryMode};
use crate::geometry::rect_from_corners;
use crate::layer::Layer;

/// Drawables fully enclosed by the box spanned by the two corners.
pub fn select_enclosed(layer: &Layer, anchor: Pos2, release: Pos2) -> Vec<DrawableId> {
    layer.query(rect_from_corners(anchor, release), QueryMode::Enclosed)
}

/// The drawable a move gesture starting at `pos` grabs.
pub fn pick_target(layer: &Layer, pos: Pos2) -> Option<DrawableId> {
    layer.nearest(pos)
}

/// Drag the grabbed drawable by the pointer delta.
pub fn drag_target(layer: &mut Layer, target: DrawableId, delta: Vec2) -> bool {
    if delta == Vec2::ZERO {
        return false;
    }
    layer.translate_drawable(target, delta)
}
