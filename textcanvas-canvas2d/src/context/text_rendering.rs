//! Text rendering operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::font_parser::parse_font;
use crate::style::{TextAlign, TextBaseline};
use crate::text::TextMetrics;
use cosmic_text::Command;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Set the font from a CSS font string.
    pub fn set_font(&mut self, font: &str) -> Canvas2dResult<()> {
        self.state.font = parse_font(font)?;
        log::debug!(target: "canvas", "font {}", font);
        Ok(())
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    /// Set the text baseline.
    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    /// Measure text with the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        crate::text::measure_text(&mut self.font_system, text, &self.state.font)
    }

    /// Fill text at the specified position with the current font and fill style.
    ///
    /// `(x, y)` is the anchor point; with the default alphabetic baseline the glyph
    /// baseline sits on `y`. Existing pixels are blended over, never cleared.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        if text.is_empty() || self.state.font.size_px <= 0.0 {
            return;
        }
        if self.font_system.db().is_empty() {
            log::warn!(target: "canvas", "no font faces loaded, fillText draws nothing");
            return;
        }

        let buffer = crate::text::shape_line(&mut self.font_system, text, &self.state.font);

        let mut text_width: f32 = 0.0;
        let mut text_ascent: f32 = 0.0;
        let mut text_descent: f32 = 0.0;
        for run in buffer.layout_runs() {
            text_width = text_width.max(run.line_w);
            text_ascent = text_ascent.max(run.line_y - run.line_top);
            text_descent = text_descent.max((run.line_top + run.line_height) - run.line_y);
        }
        if text_ascent == 0.0 && text_descent == 0.0 {
            text_ascent = self.state.font.size_px * 0.8;
            text_descent = self.state.font.size_px * 0.2;
        }

        let base_x = x + self.state.text_align.offset(text_width);
        let base_y = y + self.state.text_baseline.offset(text_ascent, text_descent);

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(self.state.fill_style);
        paint.anti_alias = true;

        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical_glyph = glyph.physical((base_x, base_y), 1.0);

                // Floating-point glyph origin keeps sub-pixel positioning
                let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, physical_glyph.cache_key)
                else {
                    continue;
                };

                // Font outlines are y-up, the raster is y-down
                let mut path_builder = tiny_skia::PathBuilder::new();
                for cmd in commands {
                    match cmd {
                        Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                        Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                        Command::QuadTo(ctrl, end) => {
                            path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                        }
                        Command::CurveTo(c1, c2, end) => {
                            path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                        }
                        Command::Close => path_builder.close(),
                    }
                }

                if let Some(path) = path_builder.finish() {
                    self.pixmap.fill_path(
                        &path,
                        &paint,
                        tiny_skia::FillRule::Winding,
                        Transform::from_translate(glyph_x, glyph_y),
                        None,
                    );
                }
            }
        }
    }
}
