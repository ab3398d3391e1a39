//! Adapter around the `qrcode` encoder producing a plain boolean module grid.

use crate::error::{QrStyleError, QrStyleResult};
use crate::settings::ErrorCorrection;
use qrcode::{Color, QrCode};

/// Square grid of modules where `true` marks a dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    modules: Vec<Vec<bool>>,
    size: usize,
}

impl QrMatrix {
    /// Build a matrix from rows of modules.
    ///
    /// Fails with a render error if there are no rows or the grid is not square.
    pub fn from_modules(modules: Vec<Vec<bool>>) -> QrStyleResult<Self> {
        let size = modules.len();
        if size == 0 {
            return Err(QrStyleError::Render("matrix has no modules".to_string()));
        }
        if let Some((row, len)) = modules
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != size)
        {
            return Err(QrStyleError::Render(format!(
                "matrix row {row} has {len} modules, expected {size}"
            )));
        }
        Ok(Self { modules, size })
    }

    /// Number of modules along one side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the module at `(row, col)` is dark.
    ///
    /// Panics if the coordinates are out of range.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules[row][col]
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.modules
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().flatten().filter(|&&dark| dark).count()
    }

    /// Approximate heap footprint, used for cache accounting.
    pub(crate) fn size_bytes(&self) -> usize {
        self.size * self.size + self.size * std::mem::size_of::<Vec<bool>>()
    }
}

/// Encode `text` into a module matrix at the given error-correction level.
///
/// Empty text is refused; the encoder would otherwise produce a valid but
/// meaningless symbol.
pub fn encode(text: &str, error_correction: ErrorCorrection) -> QrStyleResult<QrMatrix> {
    if text.is_empty() {
        return Err(QrStyleError::Encoding("no input text".to_string()));
    }
    let code =
        QrCode::with_error_correction_level(text.as_bytes(), error_correction.to_ec_level())?;
    let size = code.width();
    let modules = code
        .to_colors()
        .chunks(size)
        .map(|row| row.iter().map(|c| *c == Color::Dark).collect())
        .collect();
    log::debug!(
        "encoded {} bytes at level {} into a {}x{} matrix",
        text.len(),
        error_correction,
        size,
        size
    );
    QrMatrix::from_modules(modules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_short_text_is_version_1_at_low_ec() {
        let matrix = encode("hello", ErrorCorrection::L).unwrap();
        assert_eq!(matrix.size(), 21);
        // Finder pattern corners are dark
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.is_dark(0, 20));
        assert!(matrix.is_dark(20, 0));
        // Dark module of version 1
        assert!(matrix.is_dark(13, 8));
    }

    #[test]
    fn test_higher_ec_never_shrinks_symbol() {
        let low = encode("https://example.com", ErrorCorrection::L).unwrap();
        let high = encode("https://example.com", ErrorCorrection::H).unwrap();
        assert!(high.size() >= low.size());
        assert_eq!((high.size() - 17) % 4, 0);
    }

    #[test]
    fn test_empty_text_is_encoding_error() {
        let err = encode("", ErrorCorrection::H).unwrap_err();
        assert!(matches!(err, QrStyleError::Encoding(msg) if msg == "no input text"));
    }

    #[test]
    fn test_too_long_is_encoding_error() {
        let text = "x".repeat(4000);
        assert!(matches!(
            encode(&text, ErrorCorrection::H),
            Err(QrStyleError::Encoding(_))
        ));
    }

    #[test]
    fn test_from_modules_validation() {
        assert!(matches!(
            QrMatrix::from_modules(vec![]),
            Err(QrStyleError::Render(_))
        ));
        assert!(matches!(
            QrMatrix::from_modules(vec![vec![true, false], vec![true]]),
            Err(QrStyleError::Render(_))
        ));
        let m = QrMatrix::from_modules(vec![vec![true, false], vec![false, true]]).unwrap();
        assert_eq!(m.size(), 2);
        assert_eq!(m.dark_count(), 2);
    }
}
