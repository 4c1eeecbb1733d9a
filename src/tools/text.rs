use egui::Pos2;

use crate::drawable::{DrawableId, factory};
use crate::error::{EditorError, EditorResult};
use crate::layer::Layer;
use crate::style::BrushSettings;

/// Place `content` centered on `position`. Empty content places nothing and
/// reports [`EditorError::EmptyGesture`].
pub fn place_text(
    layer: &mut Layer,
    position: Pos2,
    content: &str,
    font_size: f32,
    brush: &BrushSettings,
) -> EditorResult<DrawableId> {
    let text = factory::create_text(position, content, font_size, brush.current_style())
        .ok_or(EditorError::EmptyGesture)?;
    Ok(layer.add_drawable(text))
}
