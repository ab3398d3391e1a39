//! One-call pipeline: encode, render, then embed an optional logo.

use crate::error::QrStyleResult;
use crate::logo::{embed_logo, LogoImage};
use crate::matrix_cache::MatrixCache;
use crate::render::render_matrix;
use crate::settings::{LogoSettings, StyleSettings};
use qrstyle_canvas::Canvas2dContext;

/// Dimensions reported back after a successful render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutcome {
    pub width: u32,
    pub height: u32,
    /// Modules along one side of the encoded symbol.
    pub matrix_size: usize,
}

/// Runs the rendering pipeline, memoizing encoded matrices across calls.
///
/// Each call repaints the surface from scratch. A generator is used by one
/// caller at a time; coalescing rapid requests is up to that caller.
#[derive(Debug, Default)]
pub struct QrGenerator {
    cache: MatrixCache,
}

impl QrGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: MatrixCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &MatrixCache {
        &self.cache
    }

    /// Render `text` onto `surface`, then overlay the logo if one is given.
    ///
    /// If the logo step fails the matrix is left painted on the surface and
    /// the logo error is returned.
    pub fn generate(
        &mut self,
        text: &str,
        style: &StyleSettings,
        logo: Option<(&LogoImage, &LogoSettings)>,
        surface: &mut Canvas2dContext,
    ) -> QrStyleResult<RenderOutcome> {
        let matrix = self.cache.get_or_encode(text, style.error_correction)?;
        let (width, height) = render_matrix(&matrix, style, surface)?;

        if let Some((image, settings)) = logo {
            embed_logo(surface, image, settings)?;
        }

        Ok(RenderOutcome {
            width,
            height,
            matrix_size: matrix.size(),
        })
    }
}
