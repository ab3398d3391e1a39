//! Fill, clip, and paint helper operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::style::FillStyle;
use tiny_skia::Transform;

impl Canvas2dContext {
    // --- Clipping ---

    /// Create a clipping region from the current path using the non-zero winding rule.
    ///
    /// The new region replaces any previous clip; wrap the call in
    /// [`save`](Self::save)/[`restore`](Self::restore) to scope it.
    pub fn clip(&mut self) {
        log::debug!(target: "canvas", "clip");
        let path =
            std::mem::replace(&mut self.path_builder, tiny_skia::PathBuilder::new()).finish();
        self.has_current_point = false;

        if let Some(path) = path {
            self.state.clip_path = Some(path);
        }
    }

    // --- Drawing operations ---

    /// Fill the current path using the non-zero winding rule.
    pub fn fill(&mut self) {
        log::debug!(target: "canvas", "fill");
        // Clone the path builder so we don't consume it
        let path = self.path_builder.clone().finish();

        if let Some(path) = path {
            let clip_mask = self.create_clip_mask();
            let paint = self.fill_paint();
            self.pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                clip_mask.as_ref(),
            );
        }
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::trace!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.begin_path();
        self.rect(params);
        self.fill();
    }

    /// Clear a rectangle (set pixels to transparent).
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let Some(rect) =
            tiny_skia::Rect::from_xywh(params.x, params.y, params.width, params.height)
        else {
            return;
        };
        let path = tiny_skia::PathBuilder::from_rect(rect);
        let paint = tiny_skia::Paint {
            blend_mode: tiny_skia::BlendMode::Clear,
            ..Default::default()
        };
        let clip_mask = self.create_clip_mask();
        self.pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            Transform::identity(),
            clip_mask.as_ref(),
        );
    }

    // --- Private paint helpers ---

    pub(crate) fn create_clip_mask(&self) -> Option<tiny_skia::Mask> {
        self.state.clip_path.as_ref().and_then(|clip_path| {
            let mut mask = tiny_skia::Mask::new(self.width, self.height)?;
            mask.fill_path(
                clip_path,
                tiny_skia::FillRule::Winding,
                true,
                Transform::identity(),
            );
            Some(mask)
        })
    }

    fn fill_paint(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };
        match self.state.fill_style {
            FillStyle::Color(color) => paint.set_color(color),
        }
        paint
    }
}
