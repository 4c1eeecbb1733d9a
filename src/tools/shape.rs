use egui::Pos2;

use super::Tool;
use crate::drawable::{Drawable, DrawableId, factory};
use crate::layer::Layer;
use crate::style::BrushSettings;

/// The drawable a two-point tool produces, or `None` for other tools.
pub fn build_shape(tool: Tool, anchor: Pos2, release: Pos2, brush: &BrushSettings) -> Option<Drawable> {
    let style = brush.current_style();
    match tool {
        Tool::Line => Some(factory::create_line(anchor, release, style)),
        Tool::Rectangle => Some(factory::create_rectangle(anchor, release, style)),
        _ => None,
    }
}

/// Place the finished shape on the layer.
pub fn place_shape(
    layer: &mut Layer,
    tool: Tool,
    anchor: Pos2,
    release: Pos2,
    brush: &BrushSettings,
) -> Option<DrawableId> {
    let shape = build_shape(tool, anchor, release, brush)?;
    log::debug!("Placing {:?} from {:?} to {:?}", tool, anchor, release);
    Some(layer.add_drawable(shape))
}
