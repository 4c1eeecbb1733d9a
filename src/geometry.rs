use egui::{Pos2, Rect};

/// Distance from a point to a line segment.
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Distance from a point to a rectangle; zero when the point lies inside it.
pub fn distance_to_rect(point: Pos2, rect: Rect) -> f32 {
    let dx = (rect.min.x - point.x).max(0.0).max(point.x - rect.max.x);
    let dy = (rect.min.y - point.y).max(0.0).max(point.y - rect.max.y);
    (dx * dx + dy * dy).sqrt()
}

/// Axis-aligned rectangle spanned by two corners given in any order.
pub fn rect_from_corners(a: Pos2, b: Pos2) -> Rect {
    Rect::from_two_pos(a, b)
}

/// Edge-inclusive containment, so points on the border count as inside.
pub fn rect_contains(rect: Rect, point: Pos2) -> bool {
    rect.min.x <= point.x && point.x <= rect.max.x && rect.min.y <= point.y && point.y <= rect.max.y
}

/// Edge-inclusive overlap test. Touching rectangles overlap.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_segment_distance() {
        let d = distance_to_line_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 3.0).abs() < 0.001);

        // Past the end of the segment the distance is to the endpoint
        let d = distance_to_line_segment(pos2(13.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_rect_distance_inside_is_zero() {
        let rect = rect_from_corners(pos2(10.0, 10.0), pos2(0.0, 0.0));
        assert_eq!(distance_to_rect(pos2(5.0, 5.0), rect), 0.0);
        assert!((distance_to_rect(pos2(13.0, 14.0), rect) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_touching_rects_overlap() {
        let a = rect_from_corners(pos2(0.0, 0.0), pos2(10.0, 10.0));
        let b = rect_from_corners(pos2(10.0, 10.0), pos2(20.0, 20.0));
        let c = rect_from_corners(pos2(10.5, 0.0), pos2(20.0, 20.0));
        assert!(rects_overlap(a, b));
        assert!(!rects_overlap(a, c));
        assert!(rect_contains(a, pos2(10.0, 0.0)));
    }
}
