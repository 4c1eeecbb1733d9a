//! Pixel-level drawing routines on RGBA buffers.
//!
//! All routines clip to the buffer and use hard-edged coverage (a pixel is
//! painted when its center falls inside the shape), except glyphs which
//! carry their own antialiased coverage.

use egui::{Color32, Pos2, Rect};
use image::{Rgba, RgbaImage};

use crate::geometry::distance_to_line_segment;

/// Source-over blend of `src` (unpremultiplied RGBA) onto `dst`.
/// The source alpha is scaled by `coverage`.
pub fn blend(dst: &mut Rgba<u8>, src: [u8; 4], coverage: f32) {
    let sa = (src[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    if sa >= 1.0 {
        dst.0 = src;
        return;
    }

    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let s = src[i] as f32;
        let d = dst[i] as f32;
        dst[i] = ((s * sa + d * da * (1.0 - sa)) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Blend one pixel, ignoring coordinates outside the buffer.
pub fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: Color32, coverage: f32) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    blend(image.get_pixel_mut(x as u32, y as u32), color.to_srgba_unmultiplied(), coverage);
}

/// Composite `src` over `dst` pixel by pixel. Only the overlapping area is touched.
pub fn alpha_over(dst: &mut RgbaImage, src: &RgbaImage) {
    let width = dst.width().min(src.width());
    let height = dst.height().min(src.height());
    for y in 0..height {
        for x in 0..width {
            let pixel = src.get_pixel(x, y).0;
            if pixel[3] == 0 {
                continue;
            }
            blend(dst.get_pixel_mut(x, y), pixel, 1.0);
        }
    }
}

/// Integer pixel range covering `min..=max`, clipped to `0..limit`.
fn span(min: f32, max: f32, limit: u32) -> std::ops::Range<i64> {
    let start = (min.floor() as i64).max(0);
    let end = (max.ceil() as i64 + 1).min(limit as i64);
    start..end.max(start)
}

fn pixel_center(x: i64, y: i64) -> Pos2 {
    Pos2::new(x as f32 + 0.5, y as f32 + 0.5)
}

pub fn fill_circle(image: &mut RgbaImage, center: Pos2, radius: f32, color: Color32) {
    let (w, h) = image.dimensions();
    for y in span(center.y - radius, center.y + radius, h) {
        for x in span(center.x - radius, center.x + radius, w) {
            if pixel_center(x, y).distance(center) <= radius {
                blend_pixel(image, x, y, color, 1.0);
            }
        }
    }
}

/// Ring of the given width lying just inside the circle's edge.
pub fn stroke_circle(image: &mut RgbaImage, center: Pos2, radius: f32, width: f32, color: Color32) {
    let inner = (radius - width).max(0.0);
    let (w, h) = image.dimensions();
    for y in span(center.y - radius, center.y + radius, h) {
        for x in span(center.x - radius, center.x + radius, w) {
            let d = pixel_center(x, y).distance(center);
            if d <= radius && d >= inner {
                blend_pixel(image, x, y, color, 1.0);
            }
        }
    }
}

/// Thick segment: every pixel within `width / 2` of the segment.
pub fn draw_line(image: &mut RgbaImage, from: Pos2, to: Pos2, width: f32, color: Color32) {
    let half = (width / 2.0).max(0.5);
    let (w, h) = image.dimensions();
    for y in span(from.y.min(to.y) - half, from.y.max(to.y) + half, h) {
        for x in span(from.x.min(to.x) - half, from.x.max(to.x) + half, w) {
            if distance_to_line_segment(pixel_center(x, y), from, to) <= half {
                blend_pixel(image, x, y, color, 1.0);
            }
        }
    }
}

pub fn fill_rect(image: &mut RgbaImage, rect: Rect, color: Color32) {
    let (w, h) = image.dimensions();
    for y in span(rect.min.y, rect.max.y, h) {
        for x in span(rect.min.x, rect.max.x, w) {
            let c = pixel_center(x, y);
            if c.x >= rect.min.x && c.x <= rect.max.x && c.y >= rect.min.y && c.y <= rect.max.y {
                blend_pixel(image, x, y, color, 1.0);
            }
        }
    }
}

pub fn stroke_rect(image: &mut RgbaImage, rect: Rect, width: f32, color: Color32) {
    let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
    // Blend into a mask first so overlapping corners are not painted twice.
    let mut mask = RgbaImage::new(image.width(), image.height());
    for i in 0..corners.len() {
        draw_line(&mut mask, corners[i], corners[(i + 1) % corners.len()], width, color);
    }
    alpha_over(image, &mask);
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_opaque_blend_replaces_pixel() {
        let mut px = Rgba([10, 20, 30, 255]);
        blend(&mut px, [200, 100, 50, 255], 1.0);
        assert_eq!(px.0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_blend_over_transparent_keeps_source_color() {
        let mut px = Rgba([0, 0, 0, 0]);
        blend(&mut px, [255, 0, 0, 255], 0.5);
        assert_eq!(px.0[0], 255);
        assert_eq!(px.0[3], 128);
    }

    #[test]
    fn test_shapes_are_clipped() {
        let mut image = RgbaImage::new(10, 10);
        fill_circle(&mut image, pos2(0.0, 0.0), 4.0, Color32::RED);
        draw_line(&mut image, pos2(-20.0, 5.0), pos2(30.0, 5.0), 3.0, Color32::BLUE);

        assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(9, 5).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(9, 9).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_stroke_rect_leaves_interior_empty() {
        let mut image = RgbaImage::new(20, 20);
        let rect = Rect::from_min_max(pos2(2.0, 2.0), pos2(17.0, 17.0));
        stroke_rect(&mut image, rect, 1.0, Color32::BLACK);

        assert_eq!(image.get_pixel(2, 10).0[3], 255);
        assert_eq!(image.get_pixel(10, 10).0[3], 0);
    }
}
