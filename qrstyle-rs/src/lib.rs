#![doc = include_str!("../README.md")]

pub mod color;
pub mod error;
pub mod export;
pub mod generator;
pub mod logo;
pub mod matrix;
pub mod matrix_cache;
pub mod render;
pub mod settings;
pub mod structure;

pub use error::{QrStyleError, QrStyleResult};
pub use export::{clipboard_image, default_file_name, serialize, ClipboardImage, ExportFormat};
pub use generator::{QrGenerator, RenderOutcome};
pub use logo::{embed_logo, LogoImage};
pub use matrix::{encode, QrMatrix};
pub use matrix_cache::MatrixCache;
pub use qrstyle_canvas;
pub use render::{render_matrix, DotShape};
pub use settings::{DotStyle, ErrorCorrection, LogoSettings, SettingsFile, StyleSettings};
pub use structure::is_structural_pattern;
