//! Image drawing, pixel readback and PNG export for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::CanvasImageDataRef;

impl Canvas2dContext {
    /// Draw straight-alpha RGBA image data scaled into the destination rectangle.
    ///
    /// The current clip applies. Filtering follows
    /// [`get_image_smoothing_enabled`](Self::get_image_smoothing_enabled).
    pub fn draw_image_data_scaled(
        &mut self,
        image: &CanvasImageDataRef,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) -> Canvas2dResult<()> {
        log::debug!(
            target: "canvas",
            "drawImage {}x{} -> {} {} {} {}",
            image.width, image.height, dx, dy, dw, dh
        );
        let expected = image.width as usize * image.height as usize * 4;
        if image.data.len() != expected || image.width == 0 || image.height == 0 {
            return Err(Canvas2dError::InvalidImageData {
                width: image.width,
                height: image.height,
                expected,
                actual: image.data.len(),
            });
        }
        if dw <= 0.0 || dh <= 0.0 {
            return Ok(());
        }

        // Convert to premultiplied alpha for tiny-skia
        let mut premultiplied = Vec::with_capacity(expected);
        for px in image.data.chunks_exact(4) {
            let c = tiny_skia::ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            premultiplied.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        let size = tiny_skia::IntSize::from_wh(image.width, image.height).ok_or(
            Canvas2dError::InvalidImageData {
                width: image.width,
                height: image.height,
                expected,
                actual: image.data.len(),
            },
        )?;
        let Some(src_pixmap) = tiny_skia::Pixmap::from_vec(premultiplied, size) else {
            return Err(Canvas2dError::InvalidImageData {
                width: image.width,
                height: image.height,
                expected,
                actual: image.data.len(),
            });
        };

        let scale_x = dw / image.width as f32;
        let scale_y = dh / image.height as f32;
        let transform = tiny_skia::Transform::from_translate(dx, dy).pre_scale(scale_x, scale_y);

        let paint = tiny_skia::PixmapPaint {
            opacity: 1.0,
            blend_mode: tiny_skia::BlendMode::SourceOver,
            quality: self.get_image_filter_quality(),
        };
        let clip_mask = self.create_clip_mask();
        self.pixmap.draw_pixmap(
            0,
            0,
            src_pixmap.as_ref(),
            &paint,
            transform,
            clip_mask.as_ref(),
        );
        Ok(())
    }

    /// Get image data for a region, as straight-alpha RGBA.
    ///
    /// Pixels outside the canvas read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        let src = self.pixmap.data();

        for dy in 0..height {
            for dx in 0..width {
                let src_x = x + dx as i32;
                let src_y = y + dy as i32;
                if src_x < 0
                    || src_y < 0
                    || src_x >= self.width as i32
                    || src_y >= self.height as i32
                {
                    continue;
                }

                let src_idx = (src_y as usize * self.width as usize + src_x as usize) * 4;
                let dst_idx = (dy as usize * width as usize + dx as usize) * 4;
                data[dst_idx..dst_idx + 4]
                    .copy_from_slice(&unpremultiply(&src[src_idx..src_idx + 4]));
            }
        }

        data
    }

    /// Read a single pixel as straight-alpha `[r, g, b, a]`.
    ///
    /// Returns `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some(unpremultiply(&self.pixmap.data()[idx..idx + 4]))
    }

    /// The raw premultiplied RGBA buffer, row-major.
    pub fn premultiplied_data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Export canvas content as PNG data.
    ///
    /// `ppi` sets the pixel density metadata, defaulting to 72.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Set pixel density metadata (pixels per meter)
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;

            // Convert from premultiplied to straight alpha for PNG
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }
}

fn unpremultiply(pixel: &[u8]) -> [u8; 4] {
    match pixel[3] {
        0 => [0, 0, 0, 0],
        255 => [pixel[0], pixel[1], pixel[2], 255],
        a => {
            let alpha_f = a as f32 / 255.0;
            [
                (pixel[0] as f32 / alpha_f).round().min(255.0) as u8,
                (pixel[1] as f32 / alpha_f).round().min(255.0) as u8,
                (pixel[2] as f32 / alpha_f).round().min(255.0) as u8,
                a,
            ]
        }
    }
}
