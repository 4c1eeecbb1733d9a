use ab_glyph::{Font, FontRef, GlyphId, PxScale, ScaleFont, point};
use egui::{Color32, Pos2};
use image::RgbaImage;

use super::raster::blend_pixel;

static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Rasterize `text` centered on `anchor`. Lines are split on `\n`.
pub fn draw_text(image: &mut RgbaImage, text: &str, anchor: Pos2, size: f32, color: Color32) {
    let font = match FontRef::try_from_slice(FONT_DATA) {
        Ok(font) => font,
        Err(err) => {
            log::warn!("Bundled font could not be parsed: {}", err);
            return;
        }
    };
    let scaled = font.as_scaled(PxScale::from(size.max(1.0)));

    let lines: Vec<&str> = text.lines().collect();
    let line_height = scaled.ascent() - scaled.descent() + scaled.line_gap();
    let block_height = line_height * lines.len() as f32 - scaled.line_gap();
    let top = anchor.y - block_height / 2.0;

    for (row, line) in lines.iter().enumerate() {
        let (glyphs, width) = layout_line(&scaled, line);
        let left = anchor.x - width / 2.0;
        let baseline = top + row as f32 * line_height + scaled.ascent();

        for (id, offset) in glyphs {
            let glyph = id.with_scale_and_position(scaled.scale(), point(left + offset, baseline));
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue; // whitespace has no outline
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                blend_pixel(image, x, y, color, coverage);
            });
        }
    }
}

/// Glyph ids with their horizontal offsets, plus the total advance width.
fn layout_line<F: Font, SF: ScaleFont<F>>(scaled: &SF, line: &str) -> (Vec<(GlyphId, f32)>, f32) {
    let mut glyphs = Vec::with_capacity(line.len());
    let mut caret = 0.0;
    let mut previous: Option<GlyphId> = None;
    for c in line.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        glyphs.push((id, caret));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }
    (glyphs, caret)
}
