//! Paints a module matrix onto a canvas.

use crate::color::{contrast_ratio, WCAG_AA_CONTRAST};
use crate::error::{QrStyleError, QrStyleResult};
use crate::matrix::QrMatrix;
use crate::settings::{DotStyle, StyleSettings};
use crate::structure::is_structural_pattern;
use qrstyle_canvas::{ArcParams, Canvas2dContext, RectParams, RoundRectParams, MAX_DIMENSION};

/// Geometry of one data module, resolved for a module size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DotShape {
    /// The full cell, flush with its neighbours.
    Square,
    /// A circle centered in the cell.
    Circle { radius: f32 },
    /// A rounded square inset from the cell edges.
    Rounded { margin: f32, corner_radius: f32 },
}

impl DotStyle {
    /// Resolve the shape drawn for a data module of `module_size` pixels.
    pub fn shape(self, module_size: f32) -> DotShape {
        match self {
            DotStyle::Square => DotShape::Square,
            DotStyle::Circle => {
                let margin = module_size / 8.0;
                DotShape::Circle {
                    radius: (module_size - 2.0 * margin) / 2.0,
                }
            }
            DotStyle::Rounded => DotShape::Rounded {
                margin: module_size / 10.0,
                corner_radius: module_size / 4.0,
            },
        }
    }
}

impl DotShape {
    /// Add the shape for the cell at `(x, y)` to the current path and fill it.
    fn paint(self, ctx: &mut Canvas2dContext, x: f32, y: f32, module_size: f32) {
        match self {
            DotShape::Square => ctx.fill_rect(&RectParams::square(x, y, module_size)),
            DotShape::Circle { radius } => {
                let half = module_size / 2.0;
                ctx.begin_path();
                ctx.arc(&ArcParams::circle(x + half, y + half, radius));
                ctx.fill();
            }
            DotShape::Rounded {
                margin,
                corner_radius,
            } => {
                let side = module_size - 2.0 * margin;
                ctx.begin_path();
                ctx.round_rect(&RoundRectParams::uniform(
                    x + margin,
                    y + margin,
                    side,
                    side,
                    corner_radius,
                ));
                ctx.fill();
            }
        }
    }
}

/// Side of the rendered image in pixels, quiet zone included.
pub fn canvas_size(matrix_size: usize, style: &StyleSettings) -> QrStyleResult<u32> {
    let too_large = || {
        QrStyleError::Render(format!(
            "a {matrix_size}-module matrix with border {} at {}px per module exceeds {MAX_DIMENSION}px",
            style.border_modules, style.module_size_px
        ))
    };
    let modules = u32::try_from(matrix_size)
        .ok()
        .and_then(|size| size.checked_add(style.border_modules.checked_mul(2)?))
        .ok_or_else(too_large)?;
    let pixels = modules
        .checked_mul(style.module_size_px)
        .ok_or_else(too_large)?;
    if pixels > MAX_DIMENSION {
        return Err(too_large());
    }
    Ok(pixels)
}

/// Resize `surface` and paint `matrix` onto it.
///
/// Prior content is discarded. Returns the pixel dimensions of the result.
pub fn render_matrix(
    matrix: &QrMatrix,
    style: &StyleSettings,
    surface: &mut Canvas2dContext,
) -> QrStyleResult<(u32, u32)> {
    style.validate()?;
    let size = matrix.size();
    let pixels = canvas_size(size, style)?;
    surface.resize(pixels, pixels)?;

    if let Ok(ratio) = contrast_ratio(&style.fg_color, &style.bg_color) {
        if ratio < WCAG_AA_CONTRAST {
            log::warn!(
                "low contrast between {} and {} ({:.2}:1); the code may not scan reliably",
                style.fg_color,
                style.bg_color,
                ratio
            );
        }
    }

    surface.set_fill_style(&style.bg_color)?;
    surface.fill_rect(&RectParams::square(0.0, 0.0, pixels as f32));

    surface.set_fill_style(&style.fg_color)?;
    let module_size = style.module_size_px as f32;
    let border = style.border_modules as usize;
    let shape = style.dot_style.shape(module_size);

    for (row, modules) in matrix.rows().iter().enumerate() {
        for (col, _) in modules.iter().enumerate().filter(|&(_, &dark)| dark) {
            let x = ((col + border) as f32) * module_size;
            let y = ((row + border) as f32) * module_size;
            if is_structural_pattern(row, col, size) {
                surface.fill_rect(&RectParams::square(x, y, module_size));
            } else {
                shape.paint(surface, x, y, module_size);
            }
        }
    }

    log::debug!(
        "rendered {size}x{size} matrix ({} dark modules) as {}px {} dots",
        matrix.dark_count(),
        pixels,
        style.dot_style
    );
    Ok((pixels, pixels))
}
