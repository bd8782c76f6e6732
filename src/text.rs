//! Styled input text: a plain string plus per-span run attributes.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Font selection passed through to the shaping engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    /// Point size.
    pub size: f64,
    /// CSS-style weight (400 = regular, 700 = bold).
    #[serde(default = "FontSpec::regular")]
    pub weight: u16,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: Self::regular(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = 700;
        self
    }

    fn regular() -> u16 {
        400
    }
}

/// Straight RGBA color, 0.0..=1.0 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
}

/// Paragraph alignment. Only meaningful to the shaping engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

/// Resolved attributes of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAttributes {
    pub font: FontSpec,
    pub color: Color,
    /// Strikethrough style. Only `Some(1)` draws a bar.
    #[serde(default)]
    pub strikethrough: Option<i64>,
    /// Underline style. Only `Some(1)` draws a bar.
    #[serde(default)]
    pub underline: Option<i64>,
    #[serde(default)]
    pub alignment: Alignment,
}

impl RunAttributes {
    pub fn new(font: FontSpec) -> Self {
        Self {
            font,
            color: Color::BLACK,
            strikethrough: None,
            underline: None,
            alignment: Alignment::Left,
        }
    }

    pub fn has_strikethrough(&self) -> bool {
        self.strikethrough == Some(1)
    }

    pub fn has_underline(&self) -> bool {
        self.underline == Some(1)
    }
}

impl Default for RunAttributes {
    /// System font at 14pt, black.
    fn default() -> Self {
        Self::new(FontSpec::new("system-ui", 14.0))
    }
}

/// Attributes applied to a char range of an [`AttributedText`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Unicode-scalar range, end exclusive.
    pub range: Range<usize>,
    pub attributes: RunAttributes,
}

/// A string with attribute spans addressed in Unicode-scalar indices.
///
/// Spans are kept sorted and must not overlap. Ranges not covered by any
/// span fall back to the caller's default attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributedText {
    text: String,
    #[serde(default)]
    spans: Vec<Span>,
}

impl AttributedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Text with a single span covering all of it.
    pub fn styled(text: impl Into<String>, attributes: RunAttributes) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self::new(text).with_span(0..len, attributes)
    }

    /// Add a span. Overlapped portions of earlier spans are cut away.
    pub fn with_span(mut self, range: Range<usize>, attributes: RunAttributes) -> Self {
        let end = range.end.min(self.char_len());
        let range = range.start.min(end)..end;
        if range.is_empty() {
            return self;
        }

        let mut spans = Vec::with_capacity(self.spans.len() + 2);
        for span in self.spans.drain(..) {
            if span.range.end <= range.start || span.range.start >= range.end {
                spans.push(span);
                continue;
            }
            if span.range.start < range.start {
                spans.push(Span {
                    range: span.range.start..range.start,
                    attributes: span.attributes.clone(),
                });
            }
            if span.range.end > range.end {
                spans.push(Span {
                    range: range.end..span.range.end,
                    attributes: span.attributes,
                });
            }
        }
        spans.push(Span { range, attributes });
        spans.sort_by_key(|span| span.range.start);
        self.spans = spans;
        self
    }

    /// Append text carrying its own attributes.
    pub fn push(mut self, text: &str, attributes: RunAttributes) -> Self {
        let start = self.char_len();
        self.text.push_str(text);
        let end = self.char_len();
        self.with_span(start..end, attributes)
    }

    pub fn plain(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in Unicode scalars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Attributes in effect at char `index`.
    pub fn attributes_at<'a>(
        &'a self,
        index: usize,
        defaults: &'a RunAttributes,
    ) -> &'a RunAttributes {
        self.spans
            .iter()
            .find(|span| span.range.contains(&index))
            .map(|span| &span.attributes)
            .unwrap_or(defaults)
    }
}
