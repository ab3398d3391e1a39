//! Style and logo settings passed into each render.
//!
//! Settings are plain values. The renderer never reads ambient state; callers
//! build a fresh value (from defaults, a JSON file, or flags) per request.

use crate::error::{QrStyleError, QrStyleResult};
use qrstyle_canvas::parse_color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// Recovers ~7% of codewords.
    L,
    /// Recovers ~15% of codewords.
    M,
    /// Recovers ~25% of codewords.
    Q,
    /// Recovers ~30% of codewords.
    #[default]
    H,
}

impl ErrorCorrection {
    pub(crate) fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = QrStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "L" => ErrorCorrection::L,
            "M" => ErrorCorrection::M,
            "Q" => ErrorCorrection::Q,
            "H" => ErrorCorrection::H,
            _ => {
                return Err(QrStyleError::Render(format!(
                    "Invalid error correction level: {s}"
                )))
            }
        })
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        };
        f.write_str(s)
    }
}

/// Shape used for data modules.
///
/// Structural modules are always drawn as squares regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotStyle {
    #[default]
    Square,
    Circle,
    Rounded,
}

impl FromStr for DotStyle {
    type Err = QrStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(DotStyle::Square),
            "circle" => Ok(DotStyle::Circle),
            "rounded" => Ok(DotStyle::Rounded),
            _ => Err(QrStyleError::Render(format!("Invalid dot style: {s}"))),
        }
    }
}

impl fmt::Display for DotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DotStyle::Square => "square",
            DotStyle::Circle => "circle",
            DotStyle::Rounded => "rounded",
        };
        f.write_str(s)
    }
}

/// Visual settings for the matrix itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    pub error_correction: ErrorCorrection,
    /// CSS color of dark modules.
    pub fg_color: String,
    /// CSS color of the background and quiet zone.
    pub bg_color: String,
    pub dot_style: DotStyle,
    /// Side of one module in pixels.
    #[serde(alias = "moduleSize", alias = "boxSize")]
    pub module_size_px: u32,
    /// Quiet zone width in modules.
    #[serde(alias = "border")]
    pub border_modules: u32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::H,
            fg_color: "#111827".to_string(),
            bg_color: "#F9FAFB".to_string(),
            dot_style: DotStyle::Square,
            module_size_px: 10,
            border_modules: 4,
        }
    }
}

impl StyleSettings {
    /// Check that the settings can be rendered.
    pub fn validate(&self) -> QrStyleResult<()> {
        if self.module_size_px == 0 {
            return Err(QrStyleError::Render(
                "module size must be a positive number of pixels".to_string(),
            ));
        }
        parse_color(&self.fg_color)?;
        parse_color(&self.bg_color)?;
        Ok(())
    }
}

/// Placement of an embedded logo.
///
/// Has no effect unless a logo image is supplied alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoSettings {
    /// Logo side as a percentage of the canvas side.
    #[serde(alias = "size")]
    pub size_percent: u32,
    /// White margin around the logo in pixels.
    #[serde(alias = "padding")]
    pub padding_px: u32,
    /// Corner radius as a percentage of the side: 0 is a square, 100 is a circle.
    ///
    /// Radii are capped at half the side, so 50 and above already render
    /// as a circle.
    #[serde(alias = "cornerRadius")]
    pub corner_radius_percent: u32,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            size_percent: 20,
            padding_px: 4,
            corner_radius_percent: 100,
        }
    }
}

impl LogoSettings {
    pub fn validate(&self) -> QrStyleResult<()> {
        if self.size_percent > 100 {
            return Err(QrStyleError::Render(format!(
                "logo size must be between 0 and 100 percent, got {}",
                self.size_percent
            )));
        }
        if self.corner_radius_percent > 100 {
            return Err(QrStyleError::Render(format!(
                "logo corner radius must be between 0 and 100 percent, got {}",
                self.corner_radius_percent
            )));
        }
        Ok(())
    }
}

/// Contents of a JSON settings file.
///
/// ```json
/// { "style": { "dotStyle": "rounded", "fgColor": "#1E40AF" }, "logo": { "size": 25 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub style: StyleSettings,
    pub logo: LogoSettings,
}

impl SettingsFile {
    pub fn from_json(json: &str) -> QrStyleResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| QrStyleError::Render(format!("Invalid settings file: {err}")))
    }
}
