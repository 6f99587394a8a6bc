use serde::Serialize;

/// A validated text insertion, ready to be painted.
///
/// Built fresh by [`InputForm::submit`](crate::InputForm::submit) and consumed by
/// [`DrawingSurface::insert_text`](crate::DrawingSurface::insert_text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDrawRequest {
    pub text: String,
    pub font: String,
    pub font_size: u32,
    /// Canonical `#`-prefixed hex color.
    pub color: String,
    pub x: u32,
    pub y: u32,
}

impl TextDrawRequest {
    /// CSS font shorthand for the canvas, e.g. `16px Arial`.
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.font_size, self.font)
    }
}
