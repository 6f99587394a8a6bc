//! Editor configuration.
//!
//! Defaults mirror the constants the editor was built around: an 800x500 canvas and
//! a short list of web-safe fonts. A JSON file may override any subset of the keys.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use textcanvas_canvas2d::FontConfig;
use thiserror::Error;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 500;
/// Default selectable font families.
pub const DEFAULT_FONTS: &[&str] = &[
    "Arial",
    "Verdana",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Tahoma",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },

    #[error("Font list must not be empty")]
    NoFonts,
}

/// Canvas pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasSize,
    /// Font families offered by the form, in display order.
    pub fonts: Vec<String>,
    /// Directory the downloaded image is written to.
    pub output_dir: PathBuf,
    /// Extra directories scanned for font files.
    pub font_dirs: Vec<PathBuf>,
    pub load_system_fonts: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            fonts: DEFAULT_FONTS.iter().map(|f| f.to_string()).collect(),
            output_dir: PathBuf::from("."),
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

impl EditorConfig {
    /// Load a configuration file. Keys missing from the file keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let CanvasSize { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidCanvasSize { width, height });
        }
        if self.fonts.is_empty() {
            return Err(ConfigError::NoFonts);
        }
        Ok(())
    }

    /// Font preselected in a fresh form: the second entry when there is one.
    pub fn default_font(&self) -> &str {
        self.fonts
            .get(1)
            .or_else(|| self.fonts.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Font configuration for the canvas.
    pub fn font_config(&self) -> FontConfig {
        FontConfig {
            load_system_fonts: self.load_system_fonts,
            font_dirs: self.font_dirs.clone(),
            ..FontConfig::default()
        }
    }
}
