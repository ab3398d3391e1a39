//! Error types for qrstyle-rs.

use qrstyle_canvas::Canvas2dError;
use thiserror::Error;

/// Result type alias using QrStyleError.
pub type QrStyleResult<T> = Result<T, QrStyleError>;

/// Errors produced by the rendering pipeline.
///
/// Each variant is terminal for the step that raised it; nothing is retried.
#[derive(Debug, Error)]
pub enum QrStyleError {
    /// Text cannot be encoded at the requested error-correction level.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The matrix is malformed or the drawing surface is unusable.
    #[error("Render error: {0}")]
    Render(String),

    /// The logo image could not be read or decoded.
    #[error("Logo load error: {0}")]
    LogoLoad(String),

    /// The surface could not be serialized to bytes.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<qrcode::types::QrError> for QrStyleError {
    fn from(err: qrcode::types::QrError) -> Self {
        QrStyleError::Encoding(err.to_string())
    }
}

impl From<Canvas2dError> for QrStyleError {
    fn from(err: Canvas2dError) -> Self {
        QrStyleError::Render(err.to_string())
    }
}
