//! Pure Rust raster drawing surface modelled on the Canvas 2D API.
//!
//! Only the subset needed to paint styled QR symbols is provided: solid fills,
//! rectangles, rounded rectangles, circular arcs, clipping, scaled image
//! drawing and pixel readback. Rendering is done with `tiny-skia`, so output is
//! deterministic for identical call sequences.
//!
//! # Example
//!
//! ```rust,ignore
//! use qrstyle_canvas::{Canvas2dContext, RectParams};
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_rect(&RectParams { x: 10.0, y: 10.0, width: 100.0, height: 50.0 });
//! let png_data = ctx.to_png(None)?;
//! ```

mod arc;
mod context;
mod drawing_state;
mod error;
mod geometry;
mod style;

// Re-export public API
pub use context::{parse_color, Canvas2dContext, MAX_DIMENSION};
pub use error::{Canvas2dError, Canvas2dResult};
pub use geometry::{
    ArcParams, CanvasColor, CanvasImageDataRef, CornerRadius, RectParams, RoundRectParams,
};
pub use style::FillStyle;
