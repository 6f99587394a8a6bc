//! Input form for text insertions.
//!
//! The form keeps raw field values exactly as typed and validates them with one
//! predicate per field. Edits revalidate only the edited field; submission
//! revalidates everything and either produces a [`TextDrawRequest`] or the map of
//! violations. Violations are only reported for fields the user has touched, and a
//! submission attempt touches every field.

use crate::config::EditorConfig;
use crate::request::TextDrawRequest;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum number of characters accepted by the text field.
pub const TEXT_MAX_CHARS: usize = 50;
/// Maximum number of characters accepted by the color field.
pub const COLOR_MAX_CHARS: usize = 6;
/// Largest accepted font size in pixels.
pub const FONT_SIZE_MAX: u32 = 32;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap();
}

/// Form field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Text,
    Font,
    Color,
    X,
    Y,
    FontSize,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Text,
        Field::Font,
        Field::Color,
        Field::X,
        Field::Y,
        Field::FontSize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Text => "text",
            Field::Font => "font",
            Field::Color => "color",
            Field::X => "x",
            Field::Y => "y",
            Field::FontSize => "fontSize",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

/// Why a field value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("is required")]
    Required,

    #[error("must be at most {max} characters")]
    TooLong { max: usize },

    #[error("is not one of the available fonts")]
    UnknownFont,

    #[error("must be a 3 or 6 digit hex color")]
    InvalidHexColor,

    #[error("must be a whole number")]
    NotAnInteger,

    #[error("must be between {min} and {max}")]
    OutOfRange { min: u32, max: u32 },
}

/// Violations keyed by field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, Violation>);

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&Violation> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &Violation)> {
        self.0.iter().map(|(field, violation)| (*field, violation))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, violation)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw field values, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub text: String,
    pub font: String,
    pub color: String,
    pub x: String,
    pub y: String,
    pub font_size: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Text => &self.text,
            Field::Font => &self.font,
            Field::Color => &self.color,
            Field::X => &self.x,
            Field::Y => &self.y,
            Field::FontSize => &self.font_size,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Text => &mut self.text,
            Field::Font => &mut self.font,
            Field::Color => &mut self.color,
            Field::X => &mut self.x,
            Field::Y => &mut self.y,
            Field::FontSize => &mut self.font_size,
        }
    }
}

/// Outcome of a single field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: Field,
    /// False when an input cap rejected the edit and the previous value was kept.
    pub accepted: bool,
    /// Violation of the field's current value, if any.
    pub violation: Option<Violation>,
}

/// Character counter shown next to the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCounter {
    pub count: usize,
    pub max: usize,
}

impl TextCounter {
    pub fn is_full(&self) -> bool {
        self.count >= self.max
    }
}

impl fmt::Display for TextCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.count, self.max)
    }
}

/// Form collecting the parameters of one text insertion.
#[derive(Debug, Clone)]
pub struct InputForm {
    values: FormValues,
    fonts: Vec<String>,
    max_x: u32,
    max_y: u32,
    violations: BTreeMap<Field, Violation>,
    touched: BTreeSet<Field>,
}

impl InputForm {
    pub fn new(config: &EditorConfig) -> Self {
        let values = FormValues {
            font: config.default_font().to_string(),
            ..FormValues::default()
        };
        let mut form = Self {
            values,
            fonts: config.fonts.clone(),
            max_x: config.canvas.width,
            max_y: config.canvas.height,
            violations: BTreeMap::new(),
            touched: BTreeSet::new(),
        };
        for field in Field::ALL {
            form.revalidate(field);
        }
        form
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    pub fn text_counter(&self) -> TextCounter {
        TextCounter {
            count: self.values.text.chars().count(),
            max: TEXT_MAX_CHARS,
        }
    }

    /// Apply one user edit to `field` and revalidate that field only.
    pub fn set_field(&mut self, field: Field, value: &str) -> FieldUpdate {
        let accepted = match input_cap(field) {
            Some(max) => value.chars().count() <= max,
            None => true,
        };
        if accepted {
            *self.values.slot_mut(field) = value.to_string();
        } else {
            log::debug!("rejected {} edit beyond input cap", field);
        }

        self.touched.insert(field);
        self.revalidate(field);
        FieldUpdate {
            field,
            accepted,
            violation: self.violations.get(&field).cloned(),
        }
    }

    /// Violations of touched fields.
    pub fn errors(&self) -> ValidationErrors {
        ValidationErrors(
            self.violations
                .iter()
                .filter(|(field, _)| self.touched.contains(*field))
                .map(|(field, violation)| (*field, violation.clone()))
                .collect(),
        )
    }

    /// Evaluate every rule without touching any field.
    pub fn validate(&self) -> Result<TextDrawRequest, ValidationErrors> {
        let text = self.check_text();
        let font = self.check_font();
        let color = self.check_color();
        let x = check_integer(&self.values.x, self.max_x);
        let y = check_integer(&self.values.y, self.max_y);
        let font_size = check_integer(&self.values.font_size, FONT_SIZE_MAX);

        match (text, font, color, x, y, font_size) {
            (Ok(text), Ok(font), Ok(color), Ok(x), Ok(y), Ok(font_size)) => Ok(TextDrawRequest {
                text,
                font,
                font_size,
                color,
                x,
                y,
            }),
            (text, font, color, x, y, font_size) => {
                let errors = [
                    (Field::Text, text.err()),
                    (Field::Font, font.err()),
                    (Field::Color, color.err()),
                    (Field::X, x.err()),
                    (Field::Y, y.err()),
                    (Field::FontSize, font_size.err()),
                ]
                .into_iter()
                .filter_map(|(field, violation)| violation.map(|v| (field, v)))
                .collect();
                Err(ValidationErrors(errors))
            }
        }
    }

    /// Submit the form.
    ///
    /// Touches every field so all violations are reported. Field values are kept
    /// after a successful submission.
    pub fn submit(&mut self) -> Result<TextDrawRequest, ValidationErrors> {
        self.touched.extend(Field::ALL);
        for field in Field::ALL {
            self.revalidate(field);
        }
        let result = self.validate();
        match &result {
            Ok(request) => log::info!("form submitted: {:?}", request),
            Err(errors) => log::debug!("form submission rejected: {} invalid fields", errors.len()),
        }
        result
    }

    fn revalidate(&mut self, field: Field) {
        match self.check_field(field) {
            Ok(()) => {
                self.violations.remove(&field);
            }
            Err(violation) => {
                self.violations.insert(field, violation);
            }
        }
    }

    fn check_field(&self, field: Field) -> Result<(), Violation> {
        match field {
            Field::Text => self.check_text().map(drop),
            Field::Font => self.check_font().map(drop),
            Field::Color => self.check_color().map(drop),
            Field::X => check_integer(&self.values.x, self.max_x).map(drop),
            Field::Y => check_integer(&self.values.y, self.max_y).map(drop),
            Field::FontSize => check_integer(&self.values.font_size, FONT_SIZE_MAX).map(drop),
        }
    }

    fn check_text(&self) -> Result<String, Violation> {
        let text = &self.values.text;
        if text.is_empty() {
            Err(Violation::Required)
        } else if text.chars().count() > TEXT_MAX_CHARS {
            Err(Violation::TooLong {
                max: TEXT_MAX_CHARS,
            })
        } else {
            Ok(text.clone())
        }
    }

    fn check_font(&self) -> Result<String, Violation> {
        let font = &self.values.font;
        if font.is_empty() {
            Err(Violation::Required)
        } else if !self.fonts.contains(font) {
            Err(Violation::UnknownFont)
        } else {
            Ok(font.clone())
        }
    }

    /// Valid colors come back in canonical `#`-prefixed form.
    fn check_color(&self) -> Result<String, Violation> {
        let color = &self.values.color;
        if color.is_empty() {
            Err(Violation::Required)
        } else if !HEX_COLOR.is_match(color) {
            Err(Violation::InvalidHexColor)
        } else {
            Ok(format!("#{}", color))
        }
    }
}

fn input_cap(field: Field) -> Option<usize> {
    match field {
        Field::Text => Some(TEXT_MAX_CHARS),
        Field::Color => Some(COLOR_MAX_CHARS),
        _ => None,
    }
}

/// Parse a non-negative integer in `[0, max]`.
fn check_integer(raw: &str, max: u32) -> Result<u32, Violation> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Violation::Required);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Violation::NotAnInteger);
    }
    let out_of_range = Violation::OutOfRange { min: 0, max };
    // Digit strings too long for u32 are out of range, not malformed
    let value: u32 = raw.parse().map_err(|_| out_of_range.clone())?;
    if value > max {
        return Err(out_of_range);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasSize;
    use rstest::rstest;

    fn form() -> InputForm {
        let config = EditorConfig {
            canvas: CanvasSize {
                width: 400,
                height: 300,
            },
            ..EditorConfig::default()
        };
        InputForm::new(&config)
    }

    fn filled() -> InputForm {
        let mut form = form();
        form.set_field(Field::Text, "Hi");
        form.set_field(Field::Font, "Arial");
        form.set_field(Field::FontSize, "16");
        form.set_field(Field::Color, "ff0000");
        form.set_field(Field::X, "10");
        form.set_field(Field::Y, "20");
        form
    }

    #[test]
    fn test_initial_state() {
        let form = form();
        assert_eq!(form.values().font, "Verdana");
        assert_eq!(form.values().text, "");
        // Nothing touched yet, so nothing is reported
        assert!(form.errors().is_empty());
        assert_eq!(form.text_counter().to_string(), "0/50");
    }

    #[test]
    fn test_valid_submission_normalizes_color() {
        let mut form = filled();
        let request = form.submit().unwrap();
        assert_eq!(
            request,
            TextDrawRequest {
                text: "Hi".to_string(),
                font: "Arial".to_string(),
                font_size: 16,
                color: "#ff0000".to_string(),
                x: 10,
                y: 20,
            }
        );
        // Values are retained for iterative edits
        assert_eq!(form.values().color, "ff0000");
        assert_eq!(form.values().text, "Hi");
    }

    #[test]
    fn test_three_digit_color() {
        let mut form = filled();
        form.set_field(Field::Color, "AbC");
        assert_eq!(form.submit().unwrap().color, "#AbC");
    }

    #[test]
    fn test_text_cap_rejects_whole_update() {
        let mut form = form();
        let update = form.set_field(Field::Text, &"a".repeat(50));
        assert!(update.accepted);
        assert!(form.text_counter().is_full());

        let update = form.set_field(Field::Text, &"b".repeat(51));
        assert!(!update.accepted);
        assert_eq!(form.values().text, "a".repeat(50));

        let update = form.set_field(Field::Text, &"c".repeat(500));
        assert!(!update.accepted);
        assert_eq!(form.values().text.chars().count(), 50);
    }

    #[test]
    fn test_text_cap_counts_characters_not_bytes() {
        let mut form = form();
        let update = form.set_field(Field::Text, &"é".repeat(50));
        assert!(update.accepted);
        assert_eq!(form.text_counter().count, 50);
    }

    #[test]
    fn test_color_cap() {
        let mut form = form();
        form.set_field(Field::Color, "abcdef");
        let update = form.set_field(Field::Color, "abcdef0");
        assert!(!update.accepted);
        assert_eq!(form.values().color, "abcdef");
    }

    #[test]
    fn test_edit_revalidates_only_that_field() {
        let mut form = form();
        let update = form.set_field(Field::X, "abc");
        assert_eq!(update.violation, Some(Violation::NotAnInteger));

        let errors = form.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::X));

        form.set_field(Field::X, "5");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_failed_submit_flags_every_invalid_field() {
        let mut form = form();
        form.set_field(Field::Text, "Hello");
        let errors = form.submit().unwrap_err();

        assert!(!errors.contains(Field::Text));
        assert!(!errors.contains(Field::Font));
        assert_eq!(errors.get(Field::Color), Some(&Violation::Required));
        assert_eq!(errors.get(Field::X), Some(&Violation::Required));
        assert_eq!(errors.get(Field::Y), Some(&Violation::Required));
        assert_eq!(errors.get(Field::FontSize), Some(&Violation::Required));
        assert_eq!(form.errors(), errors);
    }

    #[rstest]
    #[case(Field::Text, "", Violation::Required)]
    #[case(Field::Font, "", Violation::Required)]
    #[case(Field::Font, "Comic Sans MS", Violation::UnknownFont)]
    #[case(Field::Color, "", Violation::Required)]
    #[case(Field::Color, "ff00", Violation::InvalidHexColor)]
    #[case(Field::Color, "gg0000", Violation::InvalidHexColor)]
    #[case(Field::Color, "#f00", Violation::InvalidHexColor)]
    #[case(Field::X, "401", Violation::OutOfRange { min: 0, max: 400 })]
    #[case(Field::X, "-1", Violation::NotAnInteger)]
    #[case(Field::Y, "301", Violation::OutOfRange { min: 0, max: 300 })]
    #[case(Field::Y, "2.5", Violation::NotAnInteger)]
    #[case(Field::FontSize, "33", Violation::OutOfRange { min: 0, max: 32 })]
    #[case(Field::FontSize, "99999999999", Violation::OutOfRange { min: 0, max: 32 })]
    #[case(Field::FontSize, "  ", Violation::Required)]
    fn test_invalid_value_blocks_submission(
        #[case] field: Field,
        #[case] value: &str,
        #[case] expected: Violation,
    ) {
        let mut form = filled();
        form.set_field(field, value);
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(field), Some(&expected));
    }

    #[rstest]
    #[case(Field::X, "0")]
    #[case(Field::X, "400")]
    #[case(Field::Y, "300")]
    #[case(Field::FontSize, "0")]
    #[case(Field::FontSize, "32")]
    #[case(Field::FontSize, " 12 ")]
    fn test_bounds_are_inclusive(#[case] field: Field, #[case] value: &str) {
        let mut form = filled();
        form.set_field(field, value);
        assert!(form.submit().is_ok());
    }

    #[test]
    fn test_validate_does_not_touch() {
        let form = form();
        assert!(form.validate().is_err());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        assert!("size".parse::<Field>().is_err());
    }

    #[test]
    fn test_errors_display() {
        let mut form = form();
        form.set_field(Field::Color, "xyz");
        form.set_field(Field::FontSize, "40");
        assert_eq!(
            form.errors().to_string(),
            "color: must be a 3 or 6 digit hex color\nfontSize: must be between 0 and 32"
        );
    }
}
