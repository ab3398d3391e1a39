//! Serialization of a painted surface to PNG or JPEG bytes.
//!
//! Nothing is re-rendered here; the bytes reflect the surface exactly as painted.

use crate::error::{QrStyleError, QrStyleResult};
use chrono::NaiveDateTime;
use image::codecs::jpeg::JpegEncoder;
use qrstyle_canvas::Canvas2dContext;
use std::fmt;
use std::str::FromStr;

/// JPEG quality used for exports.
pub const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = QrStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            _ => Err(QrStyleError::Serialization(format!(
                "Unsupported export format: {s}"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => f.write_str("png"),
            ExportFormat::Jpeg => f.write_str("jpeg"),
        }
    }
}

/// Encode the surface pixels.
///
/// PNG keeps alpha. JPEG has none, so pixels are flattened onto black the way
/// a browser canvas does; an opaque background comes through unchanged.
pub fn serialize(surface: &Canvas2dContext, format: ExportFormat) -> QrStyleResult<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Png => surface
            .to_png(None)
            .map_err(|err| QrStyleError::Serialization(err.to_string()))?,
        ExportFormat::Jpeg => encode_jpeg(surface)?,
    };
    log::info!(
        "serialized {}x{} surface to {} bytes of {}",
        surface.width(),
        surface.height(),
        bytes.len(),
        format
    );
    Ok(bytes)
}

fn encode_jpeg(surface: &Canvas2dContext) -> QrStyleResult<Vec<u8>> {
    // Premultiplied color is the color composited over black
    let rgb: Vec<u8> = surface
        .premultiplied_data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode(
            &rgb,
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|err| QrStyleError::Serialization(format!("Failed to encode JPEG: {err}")))?;
    Ok(buf)
}

/// An encoded image ready to hand to a clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// PNG bytes of the surface wrapped with their MIME type.
pub fn clipboard_image(surface: &Canvas2dContext) -> QrStyleResult<ClipboardImage> {
    let format = ExportFormat::Png;
    Ok(ClipboardImage {
        mime_type: format.mime_type(),
        bytes: serialize(surface, format)?,
    })
}

/// Download name of the form `qrcode_YYYYMMDDHHMMSS.<ext>`.
pub fn default_file_name(format: ExportFormat, timestamp: NaiveDateTime) -> String {
    format!(
        "qrcode_{}.{}",
        timestamp.format("%Y%m%d%H%M%S"),
        format.extension()
    )
}
