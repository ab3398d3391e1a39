//! Arc operations using bezier curve approximation.
//!
//! tiny-skia does not support arc primitives directly, so arcs are flattened
//! into cubic bezier curves with `kurbo`.

use crate::geometry::ArcParams;
use kurbo::{PathEl, Point, Vec2};
use std::f64::consts::TAU;
use tiny_skia::PathBuilder;

/// Maximum distance between the true arc and its bezier approximation, in pixels.
const ARC_TOLERANCE: f64 = 0.01;

/// Compute the signed sweep angle following Canvas 2D `arc()` semantics.
///
/// A clockwise sweep of at least a full turn draws a full circle; otherwise the
/// sweep is normalized into `(0, 2π)` in the drawing direction.
pub(crate) fn sweep_angle(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if !anticlockwise && end - start >= TAU {
        return TAU;
    }
    if anticlockwise && start - end >= TAU {
        return -TAU;
    }
    let mut sweep = (end - start) % TAU;
    if anticlockwise {
        if sweep > 0.0 {
            sweep -= TAU;
        }
    } else if sweep < 0.0 {
        sweep += TAU;
    }
    sweep
}

/// Append an arc to `path`.
///
/// When `connect` is true the arc is joined to the current point with a line,
/// otherwise a new subpath is started at the arc's first point. Returns the
/// arc's end point, or `None` if nothing was appended.
pub(crate) fn append_arc(
    path: &mut PathBuilder,
    params: &ArcParams,
    connect: bool,
) -> Option<(f32, f32)> {
    if !params.radius.is_finite() || params.radius <= 0.0 {
        return None;
    }

    let center = Point::new(params.x as f64, params.y as f64);
    let radius = params.radius as f64;
    let start = params.start_angle as f64;
    let sweep = sweep_angle(start, params.end_angle as f64, params.anticlockwise);

    let start_point = center + Vec2::from_angle(start) * radius;
    if connect {
        path.line_to(start_point.x as f32, start_point.y as f32);
    } else {
        path.move_to(start_point.x as f32, start_point.y as f32);
    }

    let arc = kurbo::Arc::new(center, Vec2::new(radius, radius), start, sweep, 0.0);
    let mut end = start_point;
    for element in arc.append_iter(ARC_TOLERANCE) {
        match element {
            PathEl::LineTo(p) => {
                path.line_to(p.x as f32, p.y as f32);
                end = p;
            }
            PathEl::QuadTo(c, p) => {
                path.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32);
                end = p;
            }
            PathEl::CurveTo(c1, c2, p) => {
                path.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                );
                end = p;
            }
            PathEl::MoveTo(_) | PathEl::ClosePath => {}
        }
    }
    Some((end.x as f32, end.y as f32))
}
