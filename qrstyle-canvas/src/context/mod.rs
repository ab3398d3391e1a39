//! Canvas rendering context implementation.

mod drawing;
mod image_ops;
mod path_ops;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::CanvasColor;
use crate::style::FillStyle;
use tiny_skia::Pixmap;

/// Maximum canvas dimension (same as Chrome).
pub const MAX_DIMENSION: u32 = 32767;

/// Canvas rendering context.
///
/// Owns a premultiplied RGBA pixel buffer together with the current drawing
/// state and path. A context is not shared between concurrent renders; callers
/// hold it exclusively for the duration of a paint.
pub struct Canvas2dContext {
    /// Width of the canvas in pixels.
    pub(crate) width: u32,
    /// Height of the canvas in pixels.
    pub(crate) height: u32,
    /// Pixel buffer.
    pub(crate) pixmap: Pixmap,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
    /// Current path builder.
    pub(crate) path_builder: tiny_skia::PathBuilder,
    /// Current path position (for tracking subpath start).
    pub(crate) current_x: f32,
    pub(crate) current_y: f32,
    /// Subpath start position (for closePath).
    pub(crate) subpath_start_x: f32,
    pub(crate) subpath_start_y: f32,
    /// Whether the path has a current point (for arc line_to vs move_to).
    pub(crate) has_current_point: bool,
}

impl Canvas2dContext {
    /// Create a new Canvas2dContext with the specified dimensions.
    ///
    /// The canvas starts fully transparent.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        let pixmap = allocate_pixmap(width, height)?;

        Ok(Self {
            width,
            height,
            pixmap,
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path_builder: tiny_skia::PathBuilder::new(),
            current_x: 0.0,
            current_y: 0.0,
            subpath_start_x: 0.0,
            subpath_start_y: 0.0,
            has_current_point: false,
        })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize the canvas, discarding its content.
    ///
    /// Behaves like assigning `canvas.width`/`canvas.height` in a browser: the
    /// pixel buffer is reallocated fully transparent and all drawing state is
    /// reset, even if the dimensions are unchanged. On failure the canvas is
    /// left untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "resize {}x{}", width, height);
        let pixmap = allocate_pixmap(width, height)?;
        self.pixmap = pixmap;
        self.width = width;
        self.height = height;
        self.reset_state();
        Ok(())
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    /// Reset the rendering context to its default state.
    ///
    /// This clears the canvas to transparent, resets all drawing state and
    /// empties the state stack.
    pub fn reset(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.reset_state();
    }

    fn reset_state(&mut self) {
        self.state = DrawingState::default();
        self.state_stack.clear();

        self.path_builder = tiny_skia::PathBuilder::new();
        self.current_x = 0.0;
        self.current_y = 0.0;
        self.subpath_start_x = 0.0;
        self.subpath_start_y = 0.0;
        self.has_current_point = false;
    }

    // --- Style setters ---

    /// Set the fill style from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> Canvas2dResult<()> {
        let color = parse_color(style)?;
        self.state.fill_style = FillStyle::Color(color.into());
        Ok(())
    }

    /// Set the fill style from a CanvasColor.
    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = FillStyle::Color(color.into());
    }

    // --- Image smoothing ---

    /// Set whether image smoothing is enabled.
    pub fn set_image_smoothing_enabled(&mut self, enabled: bool) {
        self.state.image_smoothing_enabled = enabled;
    }

    /// Get whether image smoothing is enabled.
    pub fn get_image_smoothing_enabled(&self) -> bool {
        self.state.image_smoothing_enabled
    }

    /// Get the filter quality for image rendering based on smoothing settings.
    pub(crate) fn get_image_filter_quality(&self) -> tiny_skia::FilterQuality {
        if self.state.image_smoothing_enabled {
            tiny_skia::FilterQuality::Bicubic
        } else {
            tiny_skia::FilterQuality::Nearest
        }
    }
}

fn allocate_pixmap(width: u32, height: u32) -> Canvas2dResult<Pixmap> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Canvas2dError::InvalidDimensions { width, height });
    }
    Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })
}

/// Parse a CSS color string into a CanvasColor.
pub fn parse_color(s: &str) -> Canvas2dResult<CanvasColor> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_rgba8();
    Ok(CanvasColor::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RectParams;

    #[test]
    fn test_new_context_defaults() {
        let ctx = Canvas2dContext::new(200, 150).unwrap();
        assert_eq!(ctx.width(), 200);
        assert_eq!(ctx.height(), 150);
        assert!(ctx.state.image_smoothing_enabled);
        assert!(ctx.state.clip_path.is_none());
        // Canvas should be fully transparent
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Canvas2dContext::new(0, 100),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::new(100, 0),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas2dContext::new(MAX_DIMENSION + 1, 10),
            Err(Canvas2dError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_resize_discards_content_and_state() {
        let mut ctx = Canvas2dContext::new(20, 20).unwrap();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill_rect(&RectParams::square(0.0, 0.0, 20.0));
        ctx.save();
        ctx.set_image_smoothing_enabled(false);

        ctx.resize(40, 30).unwrap();
        assert_eq!((ctx.width(), ctx.height()), (40, 30));
        assert_eq!(ctx.pixmap.data().len(), 40 * 30 * 4);
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
        assert!(ctx.get_image_smoothing_enabled());
        assert!(ctx.state_stack.is_empty());
        assert!(matches!(
            ctx.state.fill_style,
            FillStyle::Color(c) if c == tiny_skia::Color::BLACK
        ));
    }

    #[test]
    fn test_resize_failure_keeps_canvas() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.set_fill_style("#00ff00").unwrap();
        ctx.fill_rect(&RectParams::square(0.0, 0.0, 10.0));

        assert!(ctx.resize(0, 10).is_err());
        assert_eq!((ctx.width(), ctx.height()), (10, 10));
        assert_eq!(ctx.pixel(5, 5), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_save_restore_fill_style() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.save();
        ctx.set_fill_style("#0000ff").unwrap();
        ctx.restore();

        ctx.fill_rect(&RectParams::square(0.0, 0.0, 10.0));
        assert_eq!(ctx.pixel(3, 3), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_restore_without_save_is_noop() {
        let mut ctx = Canvas2dContext::new(10, 10).unwrap();
        ctx.set_image_smoothing_enabled(false);
        ctx.restore();
        assert!(!ctx.get_image_smoothing_enabled());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#111827").unwrap(), CanvasColor::from_rgba8(17, 24, 39, 255));
        assert_eq!(parse_color("#abc").unwrap(), CanvasColor::from_rgba8(170, 187, 204, 255));
        assert_eq!(parse_color("white").unwrap(), CanvasColor::WHITE);
        assert!(matches!(
            parse_color("not-a-color"),
            Err(Canvas2dError::ColorParseError(_))
        ));
    }

    #[test]
    fn test_reset() {
        let mut ctx = Canvas2dContext::new(100, 100).unwrap();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.save();
        ctx.fill_rect(&RectParams::square(0.0, 0.0, 100.0));
        assert!(ctx.pixmap.data().iter().any(|&b| b != 0));

        ctx.reset();

        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
        assert!(ctx.state_stack.is_empty());
        assert!(!ctx.has_current_point);
    }
}
