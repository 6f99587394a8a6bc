//! Canvas 2D rendering context implementation.

mod image_ops;
mod text_rendering;

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::{font_config_to_fontdb, FontConfig};
use crate::font_parser::ParsedFont;
use crate::style::{TextAlign, TextBaseline};
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::Pixmap;

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// Text drawing state of the context.
#[derive(Debug, Clone)]
pub(crate) struct DrawingState {
    pub(crate) fill_style: tiny_skia::Color,
    pub(crate) font: ParsedFont,
    pub(crate) text_align: TextAlign,
    pub(crate) text_baseline: TextBaseline,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: tiny_skia::Color::BLACK,
            font: ParsedFont::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
        }
    }
}

/// Canvas 2D rendering context.
pub struct Canvas2dContext {
    /// Width of the canvas in pixels.
    pub(crate) width: u32,
    /// Height of the canvas in pixels.
    pub(crate) height: u32,
    /// Pixel buffer (premultiplied RGBA).
    pub(crate) pixmap: Pixmap,
    /// Font system for text shaping.
    pub(crate) font_system: FontSystem,
    /// Swash cache for glyph outlines.
    pub(crate) swash_cache: SwashCache,
    /// Current drawing state.
    pub(crate) state: DrawingState,
}

impl Canvas2dContext {
    /// Create a new Canvas2dContext with the specified dimensions.
    ///
    /// Uses `FontConfig::default()`, which loads system fonts.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Self::with_config(width, height, FontConfig::default())
    }

    /// Create a new Canvas2dContext with the specified dimensions and font configuration.
    pub fn with_config(width: u32, height: u32, config: FontConfig) -> Canvas2dResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;
        let font_system =
            FontSystem::new_with_locale_and_db("en".to_string(), font_config_to_fontdb(&config));

        Ok(Self {
            width,
            height,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
        })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of font faces available for text rendering.
    pub fn font_face_count(&self) -> usize {
        self.font_system.db().len()
    }

    /// Set the fill style from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> Canvas2dResult<()> {
        self.state.fill_style = parse_color(style)?;
        log::debug!(target: "canvas", "fillStyle {}", style);
        Ok(())
    }
}

/// Parse a CSS color string into a tiny_skia::Color.
pub(crate) fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    Ok(tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::BLACK))
}
