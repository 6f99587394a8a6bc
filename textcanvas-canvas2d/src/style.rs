//! Where `fill_text` places a line relative to its anchor point.

/// Horizontal anchoring. Text is always laid out left-to-right, so `Start`
/// behaves as `Left` and `End` as `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Start,
    End,
}

impl TextAlign {
    /// Shift to add to the anchor x for a line `width` pixels wide.
    pub fn offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left | TextAlign::Start => 0.0,
            TextAlign::Right | TextAlign::End => -width,
            TextAlign::Center => -width / 2.0,
        }
    }
}

/// Which horizontal line of the glyph box sits on the anchor y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    /// Shift to add to the anchor y so this line lands on it, given the font's
    /// ascent and descent measured from the alphabetic baseline.
    pub fn offset(self, ascent: f32, descent: f32) -> f32 {
        match self {
            TextBaseline::Top => ascent,
            // Hanging and ideographic lines are approximated from the em box
            TextBaseline::Hanging => ascent * 0.8,
            TextBaseline::Middle => (ascent - descent) / 2.0,
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Ideographic => -descent * 0.5,
            TextBaseline::Bottom => -descent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TextAlign::Left, 0.0)]
    #[case(TextAlign::Start, 0.0)]
    #[case(TextAlign::Center, -20.0)]
    #[case(TextAlign::Right, -40.0)]
    #[case(TextAlign::End, -40.0)]
    fn test_align_offset(#[case] align: TextAlign, #[case] expected: f32) {
        assert_eq!(align.offset(40.0), expected);
    }

    #[rstest]
    #[case(TextBaseline::Alphabetic, 0.0)]
    #[case(TextBaseline::Top, 8.0)]
    #[case(TextBaseline::Middle, 3.0)]
    #[case(TextBaseline::Bottom, -2.0)]
    fn test_baseline_offset(#[case] baseline: TextBaseline, #[case] expected: f32) {
        assert_eq!(baseline.offset(8.0, 2.0), expected);
    }
}
