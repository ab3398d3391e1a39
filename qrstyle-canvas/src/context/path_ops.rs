//! Path building operations for Canvas2dContext.
//!
//! Coordinates are device pixels; the context has no transformation matrix.

use super::Canvas2dContext;
use crate::geometry::{ArcParams, CornerRadius, RectParams, RoundRectParams};

/// Kappa for quarter-ellipse cubic Bezier approximation.
const K: f32 = 0.552_284_8;

impl Canvas2dContext {
    /// Begin a new path.
    pub fn begin_path(&mut self) {
        log::trace!(target: "canvas", "beginPath");
        self.path_builder = tiny_skia::PathBuilder::new();
        self.has_current_point = false;
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, x: f32, y: f32) {
        log::trace!(target: "canvas", "moveTo {} {}", x, y);
        self.path_builder.move_to(x, y);
        self.current_x = x;
        self.current_y = y;
        self.subpath_start_x = x;
        self.subpath_start_y = y;
        self.has_current_point = true;
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        log::trace!(target: "canvas", "lineTo {} {}", x, y);
        if !self.has_current_point {
            self.move_to(x, y);
            return;
        }
        self.path_builder.line_to(x, y);
        self.current_x = x;
        self.current_y = y;
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        log::trace!(target: "canvas", "closePath");
        self.path_builder.close();
        self.current_x = self.subpath_start_x;
        self.current_y = self.subpath_start_y;
    }

    /// Add a rectangle to the path.
    pub fn rect(&mut self, params: &RectParams) {
        log::trace!(target: "canvas", "rect {} {} {} {}", params.x, params.y, params.width, params.height);
        let RectParams {
            x,
            y,
            width,
            height,
        } = *params;

        self.path_builder.move_to(x, y);
        self.path_builder.line_to(x + width, y);
        self.path_builder.line_to(x + width, y + height);
        self.path_builder.line_to(x, y + height);
        self.path_builder.close();

        self.current_x = x;
        self.current_y = y;
        self.subpath_start_x = x;
        self.subpath_start_y = y;
        self.has_current_point = true;
    }

    /// Add a rounded rectangle to the path.
    ///
    /// Negative radii are clamped to zero. When adjacent radii add up to more
    /// than the side they share, all radii are scaled down by the same factor,
    /// so a radius of half the side yields a circle (for a square box).
    pub fn round_rect(&mut self, params: &RoundRectParams) {
        log::trace!(target: "canvas", "roundRect {} {} {} {}", params.x, params.y, params.width, params.height);
        // Handle negative dimensions by adjusting position
        let (x, width) = if params.width < 0.0 {
            (params.x + params.width, -params.width)
        } else {
            (params.x, params.width)
        };
        let (y, height) = if params.height < 0.0 {
            (params.y + params.height, -params.height)
        } else {
            (params.y, params.height)
        };

        let [mut tl, mut tr, mut br, mut bl] = params.radii.map(|r| CornerRadius {
            x: r.x.max(0.0),
            y: r.y.max(0.0),
        });

        // Scale radii uniformly if they exceed the rectangle dimensions
        let top = (tl.x + tr.x).max(1e-10);
        let bottom = (bl.x + br.x).max(1e-10);
        let left = (tl.y + bl.y).max(1e-10);
        let right = (tr.y + br.y).max(1e-10);
        let scale = (width / top)
            .min(width / bottom)
            .min(height / left)
            .min(height / right)
            .min(1.0);

        if scale < 1.0 {
            for corner in [&mut tl, &mut tr, &mut br, &mut bl] {
                corner.x *= scale;
                corner.y *= scale;
            }
        }

        let pb = &mut self.path_builder;
        pb.move_to(x + tl.x, y);

        // Top edge and top-right corner
        pb.line_to(x + width - tr.x, y);
        if tr.x > 0.0 || tr.y > 0.0 {
            pb.cubic_to(
                x + width - tr.x + tr.x * K,
                y,
                x + width,
                y + tr.y - tr.y * K,
                x + width,
                y + tr.y,
            );
        }

        // Right edge and bottom-right corner
        pb.line_to(x + width, y + height - br.y);
        if br.x > 0.0 || br.y > 0.0 {
            pb.cubic_to(
                x + width,
                y + height - br.y + br.y * K,
                x + width - br.x + br.x * K,
                y + height,
                x + width - br.x,
                y + height,
            );
        }

        // Bottom edge and bottom-left corner
        pb.line_to(x + bl.x, y + height);
        if bl.x > 0.0 || bl.y > 0.0 {
            pb.cubic_to(
                x + bl.x - bl.x * K,
                y + height,
                x,
                y + height - bl.y + bl.y * K,
                x,
                y + height - bl.y,
            );
        }

        // Left edge and top-left corner
        pb.line_to(x, y + tl.y);
        if tl.x > 0.0 || tl.y > 0.0 {
            pb.cubic_to(x, y + tl.y - tl.y * K, x + tl.x - tl.x * K, y, x + tl.x, y);
        }

        pb.close();

        self.current_x = x;
        self.current_y = y;
        self.subpath_start_x = x + tl.x;
        self.subpath_start_y = y;
        self.has_current_point = true;
    }

    /// Add an arc to the path.
    pub fn arc(&mut self, params: &ArcParams) {
        log::trace!(target: "canvas", "arc {} {} r={}", params.x, params.y, params.radius);
        let connect = self.has_current_point;
        if let Some((end_x, end_y)) =
            crate::arc::append_arc(&mut self.path_builder, params, connect)
        {
            if !connect {
                let start = params.start_angle;
                self.subpath_start_x = params.x + params.radius * start.cos();
                self.subpath_start_y = params.y + params.radius * start.sin();
            }
            self.current_x = end_x;
            self.current_y = end_y;
            self.has_current_point = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{ArcParams, RoundRectParams};
    use crate::Canvas2dContext;

    #[test]
    fn test_round_rect_corners_are_cut() {
        let mut ctx = Canvas2dContext::new(40, 40).unwrap();
        ctx.set_fill_style("#000000").unwrap();
        ctx.begin_path();
        ctx.round_rect(&RoundRectParams::uniform(0.0, 0.0, 40.0, 40.0, 10.0));
        ctx.fill();

        assert_eq!(ctx.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(ctx.pixel(39, 39), Some([0, 0, 0, 0]));
        assert_eq!(ctx.pixel(20, 20), Some([0, 0, 0, 255]));
        // Straight edges are fully covered
        assert_eq!(ctx.pixel(20, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_round_rect_oversized_radius_becomes_circle() {
        // Radius larger than half the side is scaled down to half the side
        let mut ctx = Canvas2dContext::new(40, 40).unwrap();
        ctx.set_fill_style("#000000").unwrap();
        ctx.begin_path();
        ctx.round_rect(&RoundRectParams::uniform(0.0, 0.0, 40.0, 40.0, 100.0));
        ctx.fill();

        let mut circle = Canvas2dContext::new(40, 40).unwrap();
        circle.set_fill_style("#000000").unwrap();
        circle.begin_path();
        circle.arc(&ArcParams::circle(20.0, 20.0, 20.0));
        circle.fill();

        // Same silhouette away from the anti-aliased rim
        for (x, y) in [(3, 3), (6, 6), (20, 20), (20, 1), (36, 36)] {
            let a = ctx.pixel(x, y).unwrap()[3];
            let b = circle.pixel(x, y).unwrap()[3];
            assert!(a.abs_diff(b) <= 40, "pixel ({x}, {y}): {a} vs {b}");
        }
        assert_eq!(ctx.pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_negative_radius_is_square() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.set_fill_style("#000000").unwrap();
        ctx.begin_path();
        ctx.round_rect(&RoundRectParams::uniform(0.0, 0.0, 10.0, 10.0, -5.0));
        ctx.fill();
        assert_eq!(ctx.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_arc_sets_current_point() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.begin_path();
        assert!(!ctx.has_current_point);
        ctx.arc(&ArcParams::circle(5.0, 5.0, 2.0));
        assert!(ctx.has_current_point);
        assert!((ctx.subpath_start_x - 7.0).abs() < 1e-4);
        assert!((ctx.subpath_start_y - 5.0).abs() < 1e-4);
    }
}
