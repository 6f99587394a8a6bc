//! Text measurement and font family resolution using cosmic-text.

use crate::font_parser::ParsedFont;
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};

/// Text metrics returned by measureText().
#[derive(Debug, Clone, Default)]
pub struct TextMetrics {
    /// Advance width of the text in pixels.
    pub width: f32,
    /// Distance from the baseline to the top of the line box.
    pub font_bounding_box_ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub font_bounding_box_descent: f32,
}

/// Family to shape with, resolved against the font database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolvedFamily {
    Named(String),
    Serif,
    SansSerif,
    Monospace,
}

impl ResolvedFamily {
    pub(crate) fn as_family(&self) -> Family<'_> {
        match self {
            ResolvedFamily::Named(name) => Family::Name(name),
            ResolvedFamily::Serif => Family::Serif,
            ResolvedFamily::SansSerif => Family::SansSerif,
            ResolvedFamily::Monospace => Family::Monospace,
        }
    }
}

/// Pick the first family of the font list that the database can serve.
///
/// Generic names map to the generic families. Unknown names fall through to the
/// next entry, and finally to sans-serif, like a browser does.
pub(crate) fn resolve_family(font_system: &FontSystem, font: &ParsedFont) -> ResolvedFamily {
    for family in &font.families {
        match family.to_ascii_lowercase().as_str() {
            "serif" => return ResolvedFamily::Serif,
            "sans-serif" => return ResolvedFamily::SansSerif,
            "monospace" => return ResolvedFamily::Monospace,
            _ => {}
        }

        let installed = font_system.db().faces().find_map(|face| {
            face.families
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(family))
                .map(|(name, _)| name.clone())
        });
        if let Some(name) = installed {
            return ResolvedFamily::Named(name);
        }
        log::debug!(target: "canvas", "font family {:?} not installed", family);
    }
    ResolvedFamily::SansSerif
}

/// Shape `text` into a single-line buffer.
pub(crate) fn shape_line(font_system: &mut FontSystem, text: &str, font: &ParsedFont) -> Buffer {
    let family = resolve_family(font_system, font);
    // A zero-sized font still needs valid metrics for cosmic-text
    let size = font.size_px.max(f32::EPSILON);
    let mut buffer = Buffer::new(font_system, Metrics::new(size, size * 1.2));
    let attrs = Attrs::new()
        .family(family.as_family())
        .weight(font.weight)
        .style(font.style);
    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

/// Measure text using cosmic-text.
pub fn measure_text(font_system: &mut FontSystem, text: &str, font: &ParsedFont) -> TextMetrics {
    let buffer = shape_line(font_system, text, font);
    let width = buffer
        .layout_runs()
        .map(|run| run.line_w)
        .fold(0.0_f32, f32::max);

    TextMetrics {
        width,
        font_bounding_box_ascent: font.size_px * 0.8,
        font_bounding_box_descent: font.size_px * 0.2,
    }
}
