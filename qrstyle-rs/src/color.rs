//! Color helpers: contrast checks and preset palettes.

use crate::error::QrStyleResult;
use qrstyle_canvas::CanvasColor;
use serde::Serialize;

pub use qrstyle_canvas::parse_color;

/// Minimum WCAG AA contrast ratio for normal text.
pub const WCAG_AA_CONTRAST: f64 = 4.5;

/// A named foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPreset {
    pub name: &'static str,
    pub fg: &'static str,
    pub bg: &'static str,
}

const PRESETS: [ColorPreset; 8] = [
    ColorPreset {
        name: "Classic",
        fg: "#000000",
        bg: "#FFFFFF",
    },
    ColorPreset {
        name: "Blue",
        fg: "#1E40AF",
        bg: "#FFFFFF",
    },
    ColorPreset {
        name: "Green",
        fg: "#166534",
        bg: "#FFFFFF",
    },
    ColorPreset {
        name: "Red",
        fg: "#DC2626",
        bg: "#FFFFFF",
    },
    ColorPreset {
        name: "Purple",
        fg: "#7C3AED",
        bg: "#FFFFFF",
    },
    ColorPreset {
        name: "Orange",
        fg: "#EA580C",
        bg: "#FFFFFF",
    },
    ColorPreset {
        name: "Dark mode",
        fg: "#FFFFFF",
        bg: "#111827",
    },
    ColorPreset {
        name: "Navy",
        fg: "#1E3A8A",
        bg: "#EFF6FF",
    },
];

/// Recommended color pairs for QR codes.
pub fn color_presets() -> &'static [ColorPreset] {
    &PRESETS
}

/// Look up a preset by name, ignoring case.
pub fn find_preset(name: &str) -> Option<&'static ColorPreset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// WCAG relative luminance in `0.0..=1.0`. Alpha is ignored.
pub fn relative_luminance(color: CanvasColor) -> f64 {
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// Contrast ratio between two CSS colors, from 1.0 to 21.0.
pub fn contrast_ratio(color1: &str, color2: &str) -> QrStyleResult<f64> {
    let lum1 = relative_luminance(parse_color(color1)?);
    let lum2 = relative_luminance(parse_color(color2)?);
    let brightest = lum1.max(lum2);
    let darkest = lum1.min(lum2);
    Ok((brightest + 0.05) / (darkest + 0.05))
}

/// Whether the pair meets the WCAG AA ratio.
pub fn has_good_contrast(foreground: &str, background: &str) -> QrStyleResult<bool> {
    Ok(contrast_ratio(foreground, background)? >= WCAG_AA_CONTRAST)
}

/// Normalize a color to upper-case `#RRGGBB`.
///
/// Accepts anything `parse_color` does, including `abc` without the leading `#`.
pub fn normalize_hex_color(color: &str) -> QrStyleResult<String> {
    let trimmed = color.trim();
    let parsed = match parse_color(trimmed) {
        Ok(c) => c,
        Err(err) => {
            if trimmed.starts_with('#') {
                return Err(err.into());
            }
            parse_color(&format!("#{trimmed}"))?
        }
    };
    Ok(format!("#{:02X}{:02X}{:02X}", parsed.r, parsed.g, parsed.b))
}
