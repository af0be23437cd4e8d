//! Text layout
//!
//! Greedy word wrapping against a pixel budget. Width measurement is an
//! injected capability so layout runs without any font or display surface.

use serde::{Deserialize, Serialize};

/// Typeface families used on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFace {
    Serif,
    SerifItalic,
    Sans,
}

/// A face at a pixel size, e.g. `italic 36px serif`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub face: FontFace,
    pub size_px: f32,
}

impl FontSpec {
    pub const fn new(face: FontFace, size_px: f32) -> Self {
        Self { face, size_px }
    }

    /// Same face at `scale` times the size
    pub fn scaled(self, scale: f32) -> Self {
        Self {
            size_px: self.size_px * scale,
            ..self
        }
    }
}

/// Measures the advance width of a run of text
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: FontSpec) -> f32;
}

/// Measurer that gives every character the same advance
///
/// `advance_ratio` is the advance as a fraction of the font size. Used where
/// no fonts are available and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasurer {
    pub advance_ratio: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        // Roughly the average advance of a proportional serif
        Self { advance_ratio: 0.5 }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, font: FontSpec) -> f32 {
        text.chars().count() as f32 * font.size_px * self.advance_ratio
    }
}

/// Wrap `text` into lines no wider than `max_width`
///
/// Words are whitespace separated and never split: a word wider than the
/// budget gets a line of its own. A line only breaks once the candidate is
/// strictly wider than `max_width`. Always returns at least one line; empty
/// input gives a single empty line.
pub fn wrap<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", line, word);
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    lines.push(line);
    lines
}

/// [`wrap`] using a [`TextMeasurer`] at a given font
pub fn wrap_with(
    text: &str,
    max_width: f32,
    measurer: &dyn TextMeasurer,
    font: FontSpec,
) -> Vec<String> {
    wrap(text, max_width, |s| measurer.measure(s, font))
}
