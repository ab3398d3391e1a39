//! Drawing state that can be saved and restored.

use crate::style::FillStyle;

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone)]
pub(crate) struct DrawingState {
    /// Current fill style.
    pub fill_style: FillStyle,
    /// Clipping path in device space (if any).
    pub clip_path: Option<tiny_skia::Path>,
    /// Whether image smoothing is enabled.
    pub image_smoothing_enabled: bool,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            clip_path: None,
            image_smoothing_enabled: true,
        }
    }
}
