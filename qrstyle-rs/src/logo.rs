//! Logo decoding and compositing over a rendered matrix.

use crate::error::{QrStyleError, QrStyleResult};
use crate::settings::LogoSettings;
use qrstyle_canvas::{
    ArcParams, Canvas2dContext, CanvasColor, CanvasImageDataRef, RectParams, RoundRectParams,
};
use std::path::Path;

/// A decoded logo as straight-alpha RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LogoImage {
    /// Wrap already decoded straight-alpha RGBA pixels.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> QrStyleResult<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(QrStyleError::LogoLoad(format!(
                "expected {expected} bytes of RGBA data for a {width}x{height} image, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode an encoded image (PNG, JPEG, GIF or WebP).
    pub fn decode(bytes: &[u8]) -> QrStyleResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|err| QrStyleError::LogoLoad(format!("Failed to decode logo: {err}")))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("decoded {}x{} logo", width, height);
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Read and decode an image file.
    pub fn from_path(path: &Path) -> QrStyleResult<Self> {
        let bytes = std::fs::read(path).map_err(|err| {
            QrStyleError::LogoLoad(format!("Failed to read logo {}: {err}", path.display()))
        })?;
        Self::decode(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn as_image_data(&self) -> CanvasImageDataRef<'_> {
        CanvasImageDataRef {
            data: &self.data,
            width: self.width,
            height: self.height,
        }
    }
}

/// Centered logo geometry for a given surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoLayout {
    pub center_x: f32,
    pub center_y: f32,
    /// Side of the logo itself.
    pub logo_size: u32,
    /// Side of the white backing: the logo plus padding on both sides.
    pub backing_size: u32,
}

impl LogoLayout {
    pub fn new(surface_width: u32, surface_height: u32, settings: &LogoSettings) -> Self {
        let canvas_size = surface_width.min(surface_height) as u64;
        let logo_size = (canvas_size * settings.size_percent as u64 / 100) as u32;
        Self {
            center_x: surface_width as f32 / 2.0,
            center_y: surface_height as f32 / 2.0,
            logo_size,
            backing_size: logo_size.saturating_add(settings.padding_px.saturating_mul(2)),
        }
    }
}

/// Shape shared by the backing and the logo clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CornerShape {
    Square,
    Rounded(u32),
    Circle,
}

impl CornerShape {
    fn from_percent(percent: u32) -> Self {
        match percent {
            0 => CornerShape::Square,
            100.. => CornerShape::Circle,
            p => CornerShape::Rounded(p),
        }
    }

    /// Add a centered box of side `size` to the current path.
    fn add_to_path(self, ctx: &mut Canvas2dContext, cx: f32, cy: f32, size: f32) {
        let half = size / 2.0;
        match self {
            CornerShape::Square => ctx.rect(&RectParams::square(cx - half, cy - half, size)),
            CornerShape::Circle => ctx.arc(&ArcParams::circle(cx, cy, half)),
            CornerShape::Rounded(percent) => {
                // Radii past half the side are clamped by round_rect
                let radius = size * percent as f32 / 100.0;
                ctx.round_rect(&RoundRectParams::uniform(
                    cx - half,
                    cy - half,
                    size,
                    size,
                    radius,
                ))
            }
        }
    }
}

/// Overlay `logo` on the center of an already rendered surface.
///
/// A white backing is painted first, then the logo scaled to a square and
/// clipped to the same corner shape. Drawing state is restored afterwards.
pub fn embed_logo(
    surface: &mut Canvas2dContext,
    logo: &LogoImage,
    settings: &LogoSettings,
) -> QrStyleResult<()> {
    settings.validate()?;
    let layout = LogoLayout::new(surface.width(), surface.height(), settings);
    let shape = CornerShape::from_percent(settings.corner_radius_percent);
    let (cx, cy) = (layout.center_x, layout.center_y);
    log::debug!(
        "embedding {}x{} logo at {}px with {}px backing ({:?})",
        logo.width,
        logo.height,
        layout.logo_size,
        layout.backing_size,
        shape
    );

    surface.save();

    if layout.backing_size > 0 {
        surface.set_fill_style_color(CanvasColor::WHITE);
        surface.begin_path();
        shape.add_to_path(surface, cx, cy, layout.backing_size as f32);
        surface.fill();
    }

    let result = if layout.logo_size > 0 {
        let size = layout.logo_size as f32;
        if shape != CornerShape::Square {
            surface.begin_path();
            shape.add_to_path(surface, cx, cy, size);
            surface.clip();
        }
        surface.draw_image_data_scaled(
            &logo.as_image_data(),
            cx - size / 2.0,
            cy - size / 2.0,
            size,
            size,
        )
    } else {
        Ok(())
    };

    surface.restore();
    result.map_err(|err| QrStyleError::LogoLoad(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_surface(size: u32, color: &str) -> Canvas2dContext {
        let mut ctx = Canvas2dContext::new(size, size).unwrap();
        ctx.set_fill_style(color).unwrap();
        ctx.fill_rect(&RectParams::square(0.0, 0.0, size as f32));
        ctx
    }

    /// Scaled image draws may be off by one from filtering.
    fn assert_close(actual: Option<[u8; 4]>, expected: [u8; 4]) {
        let actual = actual.unwrap();
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.abs_diff(e) <= 2, "{actual:?} != {expected:?}");
        }
    }

    fn solid_logo(size: u32, rgba: [u8; 4]) -> LogoImage {
        LogoImage::from_rgba(size, size, rgba.repeat((size * size) as usize)).unwrap()
    }

    #[test]
    fn test_layout() {
        let layout = LogoLayout::new(370, 370, &LogoSettings::default());
        assert_eq!(layout.logo_size, 74);
        assert_eq!(layout.backing_size, 82);
        assert_eq!((layout.center_x, layout.center_y), (185.0, 185.0));

        // The smaller side drives the size
        let layout = LogoLayout::new(200, 100, &LogoSettings::default());
        assert_eq!(layout.logo_size, 20);
    }

    #[test]
    fn test_decode_failure_is_logo_load_error() {
        let err = LogoImage::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, QrStyleError::LogoLoad(_)));

        let err = LogoImage::from_path(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert!(matches!(err, QrStyleError::LogoLoad(_)));

        assert!(LogoImage::from_rgba(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn test_decode_png() {
        let mut ctx = Canvas2dContext::new(3, 2).unwrap();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill_rect(&RectParams::square(0.0, 0.0, 1.0));
        let logo = LogoImage::decode(&ctx.to_png(None).unwrap()).unwrap();
        assert_eq!((logo.width(), logo.height()), (3, 2));
        assert_eq!(&logo.data[0..4], &[255, 0, 0, 255]);
        assert_eq!(&logo.data[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_square_logo_with_padding_ring() {
        let mut ctx = filled_surface(200, "#000000");
        let settings = LogoSettings {
            size_percent: 20,
            padding_px: 5,
            corner_radius_percent: 0,
        };
        embed_logo(&mut ctx, &solid_logo(4, [255, 0, 0, 255]), &settings).unwrap();

        // Logo spans 80..120, backing spans 75..125
        assert_close(ctx.pixel(100, 100), [255, 0, 0, 255]);
        assert_close(ctx.pixel(81, 81), [255, 0, 0, 255]);
        assert_eq!(ctx.pixel(77, 100), Some([255, 255, 255, 255]));
        assert_eq!(ctx.pixel(122, 122), Some([255, 255, 255, 255]));
        assert_eq!(ctx.pixel(74, 100), Some([0, 0, 0, 255]));
        assert_eq!(ctx.pixel(125, 125), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_circle_backing_bounding_box() {
        let mut ctx = filled_surface(200, "#000000");
        let settings = LogoSettings {
            size_percent: 20,
            padding_px: 10,
            corner_radius_percent: 100,
        };
        // Fully transparent logo leaves only the backing visible
        embed_logo(&mut ctx, &solid_logo(8, [0, 0, 0, 0]), &settings).unwrap();

        // Backing circle of diameter 60 centered at (100, 100)
        let white = Some([255, 255, 255, 255]);
        let black = Some([0, 0, 0, 255]);
        assert_eq!(ctx.pixel(100, 100), white);
        for (x, y) in [(71, 99), (128, 99), (99, 71), (99, 128)] {
            assert_eq!(ctx.pixel(x, y), white, "({x}, {y})");
        }
        for (x, y) in [(69, 99), (130, 99), (99, 69), (99, 130)] {
            assert_eq!(ctx.pixel(x, y), black, "({x}, {y})");
        }
        // Corners of the bounding box are outside the circle
        assert_eq!(ctx.pixel(72, 72), black);
        assert_eq!(ctx.pixel(127, 127), black);
    }

    #[test]
    fn test_rounded_backing_corners() {
        let white = Some([255, 255, 255, 255]);
        let black = Some([0, 0, 0, 255]);
        let backing = |corner_radius_percent| {
            let mut ctx = filled_surface(200, "#000000");
            let settings = LogoSettings {
                size_percent: 20,
                padding_px: 10,
                corner_radius_percent,
            };
            embed_logo(&mut ctx, &solid_logo(8, [0, 0, 0, 0]), &settings).unwrap();
            ctx
        };

        // Backing spans 70..130 with a 6px corner radius
        let ctx = backing(10);
        assert_eq!(ctx.pixel(70, 70), black);
        assert_eq!(ctx.pixel(80, 70), white);
        assert_eq!(ctx.pixel(70, 80), white);

        // Radius saturates at half the side, matching the circle
        for percent in [50, 60, 99] {
            let ctx = backing(percent);
            assert_eq!(ctx.pixel(72, 72), black, "{percent}%");
            assert_eq!(ctx.pixel(80, 70), black, "{percent}%");
            assert_eq!(ctx.pixel(71, 99), white, "{percent}%");
            assert_eq!(ctx.pixel(100, 100), white, "{percent}%");
        }
    }

    #[test]
    fn test_circle_clips_logo() {
        let mut ctx = filled_surface(200, "#000000");
        let settings = LogoSettings {
            size_percent: 50,
            padding_px: 0,
            corner_radius_percent: 100,
        };
        embed_logo(&mut ctx, &solid_logo(2, [0, 0, 255, 255]), &settings).unwrap();

        assert_close(ctx.pixel(100, 100), [0, 0, 255, 255]);
        // Corner of the logo square lies outside the circular clip
        assert_eq!(ctx.pixel(51, 51), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_state_restored_after_embed() {
        let mut ctx = filled_surface(100, "#000000");
        ctx.set_fill_style("#00ff00").unwrap();
        embed_logo(&mut ctx, &solid_logo(1, [0, 0, 0, 0]), &LogoSettings::default()).unwrap();

        // Fill style and clip are back to what they were
        ctx.fill_rect(&RectParams::square(0.0, 0.0, 100.0));
        assert_eq!(ctx.pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(ctx.pixel(50, 50), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_zero_size_logo_is_noop() {
        let mut ctx = filled_surface(50, "#000000");
        let before = ctx.premultiplied_data().to_vec();
        let settings = LogoSettings {
            size_percent: 0,
            padding_px: 0,
            corner_radius_percent: 0,
        };
        embed_logo(&mut ctx, &solid_logo(1, [255, 0, 0, 255]), &settings).unwrap();
        assert_eq!(ctx.premultiplied_data(), &before[..]);
    }
}
