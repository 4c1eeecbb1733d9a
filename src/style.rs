use egui::Color32;
use serde::{Deserialize, Serialize};

/// Visual attributes shared by every drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub stroke_color: Color32,
    /// `None` means "no fill".
    pub fill_color: Option<Color32>,
    /// Always at least 1.
    pub stroke_width: u32,
}

impl Style {
    pub fn new(stroke_color: Color32, fill_color: Option<Color32>, stroke_width: u32) -> Self {
        Self {
            stroke_color,
            fill_color,
            stroke_width: stroke_width.max(1),
        }
    }

    /// Stroke and fill in the same color.
    pub fn solid(color: Color32, stroke_width: u32) -> Self {
        Self::new(color, Some(color), stroke_width)
    }

    /// Apply the fields present in `update`, leaving the others untouched.
    pub fn apply(&mut self, update: &StyleUpdate) {
        if let Some(color) = update.stroke_color {
            self.stroke_color = color;
        }
        if let Some(fill) = update.fill_color {
            self.fill_color = fill;
        }
        if let Some(width) = update.stroke_width {
            self.stroke_width = width.max(1);
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::solid(Color32::BLACK, 1)
    }
}

/// A partial style: any subset of the [`Style`] fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleUpdate {
    pub stroke_color: Option<Color32>,
    /// `Some(None)` clears the fill.
    pub fill_color: Option<Option<Color32>>,
    pub stroke_width: Option<u32>,
}

impl StyleUpdate {
    pub fn stroke_color(color: Color32) -> Self {
        Self {
            stroke_color: Some(color),
            ..Self::default()
        }
    }

    pub fn fill(fill: Option<Color32>) -> Self {
        Self {
            fill_color: Some(fill),
            ..Self::default()
        }
    }

    pub fn stroke_width(width: u32) -> Self {
        Self {
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stroke_color.is_none() && self.fill_color.is_none() && self.stroke_width.is_none()
    }
}

/// The user's current drawing settings.
///
/// New drawables take their style from here; editing these never touches
/// drawables already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushSettings {
    pub color: Color32,
    /// Dot radius for the brush, half the eraser square, stroke width for
    /// shapes. Always at least 1.
    pub size: u32,
    /// Whether new rectangles get filled with `color`
    pub fill_enabled: bool,
}

impl BrushSettings {
    pub fn new(color: Color32, size: u32, fill_enabled: bool) -> Self {
        Self {
            color,
            size: size.max(1),
            fill_enabled,
        }
    }

    /// Style for new lines, rectangles and text.
    pub fn current_style(&self) -> Style {
        Style::new(self.color, self.fill_enabled.then_some(self.color), self.size)
    }

    /// Style for brush dots: always filled, one pixel outline.
    pub fn dot_style(&self) -> Style {
        Style::solid(self.color, 1)
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::new(Color32::BLACK, 5, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_leaves_other_fields() {
        let mut style = Style::solid(Color32::RED, 3);
        style.apply(&StyleUpdate::fill(None));

        assert_eq!(style.stroke_color, Color32::RED);
        assert_eq!(style.fill_color, None);
        assert_eq!(style.stroke_width, 3);

        style.apply(&StyleUpdate::stroke_width(7));
        assert_eq!(style.stroke_width, 7);
        assert_eq!(style.fill_color, None);
    }

    #[test]
    fn test_width_never_drops_below_one() {
        let mut style = Style::new(Color32::BLACK, None, 0);
        assert_eq!(style.stroke_width, 1);

        style.apply(&StyleUpdate::stroke_width(0));
        assert_eq!(style.stroke_width, 1);
    }

    #[test]
    fn test_brush_style_follows_fill_flag() {
        let mut brush = BrushSettings::new(Color32::RED, 4, true);
        assert_eq!(brush.current_style(), Style::new(Color32::RED, Some(Color32::RED), 4));

        brush.fill_enabled = false;
        assert_eq!(brush.current_style().fill_color, None);
        assert_eq!(brush.dot_style(), Style::solid(Color32::RED, 1));
    }
}
