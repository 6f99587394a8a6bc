//! Pure Rust subset of the Canvas 2D API, focused on drawing text.
//!
//! The context owns a fixed-size RGBA raster and supports the parts of the
//! browser canvas needed to paint styled text and export the result:
//! - `tiny-skia` for rasterizing glyph outlines
//! - `cosmic-text` for shaping and glyph outlines
//! - `fontdb` for font discovery
//! - `png` for encoding
//!
//! # Example
//!
//! ```rust,ignore
//! use textcanvas_canvas2d::Canvas2dContext;
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_font("16px Arial")?;
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_text("Hi", 10.0, 20.0);
//! let png_data = ctx.to_png(None)?;
//! ```

mod context;
mod error;
mod font_config;
mod font_parser;
mod snapshot;
mod style;
mod text;

pub use context::Canvas2dContext;
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{font_config_to_fontdb, FontConfig, GenericFamilyMap};
pub use font_parser::{parse_font, ParsedFont};
pub use snapshot::CanvasSnapshot;
pub use style::{TextAlign, TextBaseline};
pub use text::TextMetrics;
