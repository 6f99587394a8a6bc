//! CSS font string parsing for Canvas 2D.
//!
//! Parses CSS font shorthands like "16px Arial" or "bold italic 12pt 'Times New Roman'"
//! into components usable with cosmic-text.

use crate::error::{Canvas2dError, Canvas2dResult};
use cosmic_text::{Style, Weight};

/// Components of a CSS font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFont {
    /// Font style (normal, italic, oblique).
    pub style: Style,
    /// Font weight (100-900 or keywords like bold).
    pub weight: Weight,
    /// Font size in pixels.
    pub size_px: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for ParsedFont {
    fn default() -> Self {
        // Browser default for a fresh 2D context is "10px sans-serif"
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            size_px: 10.0,
            families: vec!["sans-serif".to_string()],
        }
    }
}

/// Parse a CSS font string into components.
///
/// Supports format: `[style] [variant] [weight] size[/line-height] family[, family]*`
pub fn parse_font(font_str: &str) -> Canvas2dResult<ParsedFont> {
    let font_str = font_str.trim();
    if font_str.is_empty() {
        return Ok(ParsedFont::default());
    }

    let mut result = ParsedFont::default();
    let mut remaining = font_str;

    // Style, variant and weight may appear in any order before the size
    loop {
        let trimmed = remaining.trim_start();
        if let Some(rest) = strip_keyword(trimmed, "italic") {
            result.style = Style::Italic;
            remaining = rest;
        } else if let Some(rest) = strip_keyword(trimmed, "oblique") {
            result.style = Style::Oblique;
            remaining = rest;
        } else if let Some(rest) = strip_keyword(trimmed, "normal")
            .or_else(|| strip_keyword(trimmed, "small-caps"))
        {
            remaining = rest;
        } else if let Some(rest) = strip_keyword(trimmed, "bold") {
            result.weight = Weight::BOLD;
            remaining = rest;
        } else if let Some(rest) = strip_keyword(trimmed, "bolder") {
            result.weight = Weight::EXTRA_BOLD;
            remaining = rest;
        } else if let Some(rest) = strip_keyword(trimmed, "lighter") {
            result.weight = Weight::LIGHT;
            remaining = rest;
        } else if let Some((weight, rest)) = parse_numeric_weight(trimmed) {
            result.weight = weight;
            remaining = rest;
        } else {
            break;
        }
    }

    let (size, rest) = parse_font_size(remaining.trim_start())?;
    result.size_px = size;
    remaining = rest;

    // Line height has no effect on single-line fillText
    if let Some(rest) = remaining.trim_start().strip_prefix('/') {
        remaining = skip_token(rest);
    }

    let families = remaining.trim();
    if !families.is_empty() {
        result.families = parse_font_families(families);
    }

    Ok(result)
}

/// Strip a whole-word keyword from the start of `s`.
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// Try to parse a numeric weight (100-900) at the start of the string.
fn parse_numeric_weight(s: &str) -> Option<(Weight, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let rest = &s[end..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        // Digits followed by a unit are the font size, not a weight
        return None;
    }

    let weight: u16 = s[..end].parse().ok()?;
    if !(100..=900).contains(&weight) || weight % 100 != 0 {
        return None;
    }
    Some((Weight(weight), rest))
}

/// Parse font size and unit, returning the size in pixels.
fn parse_font_size(s: &str) -> Canvas2dResult<(f32, &str)> {
    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());

    if num_end == 0 {
        return Err(Canvas2dError::FontParseError(format!(
            "Expected font size, got: {}",
            s
        )));
    }

    let num_str = &s[..num_end];
    let size: f32 = num_str.parse().map_err(|_| {
        Canvas2dError::FontParseError(format!("Invalid font size number: {}", num_str))
    })?;

    let rest = &s[num_end..];
    let (multiplier, unit_len) = if rest.starts_with("px") {
        (1.0, 2)
    } else if rest.starts_with("pt") {
        (4.0 / 3.0, 2)
    } else if rest.starts_with("rem") {
        (16.0, 3)
    } else if rest.starts_with("em") {
        (16.0, 2)
    } else if rest.starts_with('%') {
        (16.0 / 100.0, 1)
    } else {
        (1.0, 0)
    };

    Ok((size * multiplier, &rest[unit_len..]))
}

fn skip_token(s: &str) -> &str {
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    &s[end..]
}

/// Parse a comma separated family list, unquoting quoted names.
fn parse_font_families(s: &str) -> Vec<String> {
    let families: Vec<String> = s
        .split(',')
        .map(|family| {
            family
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .to_string()
        })
        .filter(|family| !family.is_empty())
        .collect();

    if families.is_empty() {
        vec!["sans-serif".to_string()]
    } else {
        families
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_simple_font() {
        let font = parse_font("16px Arial").unwrap();
        assert_eq!(font.size_px, 16.0);
        assert_eq!(font.families, vec!["Arial"]);
        assert_eq!(font.weight, Weight::NORMAL);
        assert_eq!(font.style, Style::Normal);
    }

    #[test]
    fn test_zero_size_font() {
        let font = parse_font("0px Verdana").unwrap();
        assert_eq!(font.size_px, 0.0);
        assert_eq!(font.families, vec!["Verdana"]);
    }

    #[test]
    fn test_multi_word_family() {
        let font = parse_font("12px Times New Roman").unwrap();
        assert_eq!(font.families, vec!["Times New Roman"]);
    }

    #[test]
    fn test_style_and_weight() {
        let font = parse_font("italic bold 14px 'Courier New', monospace").unwrap();
        assert_eq!(font.style, Style::Italic);
        assert_eq!(font.weight, Weight::BOLD);
        assert_eq!(font.families, vec!["Courier New", "monospace"]);
    }

    #[test]
    fn test_numeric_weight_and_line_height() {
        let font = parse_font("600 16px/20px Georgia").unwrap();
        assert_eq!(font.weight, Weight(600));
        assert_eq!(font.size_px, 16.0);
        assert_eq!(font.families, vec!["Georgia"]);
    }

    #[rstest]
    #[case("12pt serif", 16.0)]
    #[case("1em serif", 16.0)]
    #[case("2rem serif", 32.0)]
    #[case("50% serif", 8.0)]
    #[case("9 serif", 9.0)]
    fn test_size_units(#[case] font: &str, #[case] expected_px: f32) {
        let parsed = parse_font(font).unwrap();
        assert!((parsed.size_px - expected_px).abs() < 0.01);
    }

    #[test]
    fn test_missing_size_is_error() {
        assert!(matches!(
            parse_font("bold Arial"),
            Err(Canvas2dError::FontParseError(_))
        ));
    }

    #[test]
    fn test_empty_string_is_default() {
        assert_eq!(parse_font("   ").unwrap(), ParsedFont::default());
    }
}
