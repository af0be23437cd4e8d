//! Card geometry
//!
//! Positions every element of a quote card from measured line counts. The
//! result depends only on the texts, the mood label and the measurer, never
//! on colors, so two quotes that differ only in mood share their geometry.

use serde::{Deserialize, Serialize};

use crate::layout::{wrap, FontFace, FontSpec, TextMeasurer};
use crate::quote::Quote;

pub const ICON_FONT: FontSpec = FontSpec::new(FontFace::Serif, 60.0);
pub const START_FONT: FontSpec = FontSpec::new(FontFace::SerifItalic, 36.0);
pub const COMPLETION_FONT: FontSpec = FontSpec::new(FontFace::Serif, 32.0);
pub const BADGE_FONT: FontSpec = FontSpec::new(FontFace::Sans, 24.0);
pub const TITLE_FONT: FontSpec = FontSpec::new(FontFace::Serif, 20.0);
pub const TAGLINE_FONT: FontSpec = FontSpec::new(FontFace::Sans, 16.0);

const ICON: &str = "\u{201C}";
const OPEN_QUOTE: char = '\u{201C}';
const CLOSE_QUOTE: char = '\u{201D}';
const BRAND_TITLE: &str = "Unfinished Sentences";
const BRAND_TAGLINE: &str = "Complete the Unsaid";

/// Output canvas shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardFormat {
    /// 1080x1080, for downloads and social posts
    #[default]
    Square,
    /// 1200x630, for link previews
    OpenGraph,
}

impl CardFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" => Some(CardFormat::Square),
            "open-graph" | "opengraph" | "og" => Some(CardFormat::OpenGraph),
            _ => None,
        }
    }

    pub fn metrics(self) -> CardMetrics {
        match self {
            CardFormat::Square => CardMetrics {
                width: 1080,
                height: 1080,
                text_width: 800.0,
                icon_y: 200.0,
                start_y: 320.0,
                start_step: 50.0,
                completion_gap: 100.0,
                completion_step: 45.0,
                badge_gap: 80.0,
                title_offset: 60.0,
                tagline_offset: 30.0,
            },
            CardFormat::OpenGraph => CardMetrics {
                width: 1200,
                height: 630,
                text_width: 900.0,
                icon_y: 80.0,
                start_y: 170.0,
                start_step: 47.0,
                completion_gap: 80.0,
                completion_step: 42.0,
                badge_gap: 60.0,
                title_offset: 55.0,
                tagline_offset: 28.0,
            },
        }
    }
}

/// Fixed positions and spacing for one format, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub width: u32,
    pub height: u32,
    /// Wrap budget for start and completion text
    pub text_width: f32,
    pub icon_y: f32,
    /// Middle of the first start line
    pub start_y: f32,
    pub start_step: f32,
    /// From the last start line to the first completion line
    pub completion_gap: f32,
    pub completion_step: f32,
    /// From the last completion line to the top of the badge
    pub badge_gap: f32,
    /// Branding lines, measured up from the bottom edge
    pub title_offset: f32,
    pub tagline_offset: f32,
}

/// Badge padding and shape
pub const BADGE_PADDING: f32 = 40.0;
pub const BADGE_HEIGHT: f32 = 40.0;

/// One horizontally centred line of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub font: FontSpec,
    pub center_x: f32,
    /// Vertical middle of the line
    pub middle_y: f32,
    pub opacity: f32,
}

/// Capsule badge holding the mood label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub label: TextRun,
}

/// Positioned elements of a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    pub icon: TextRun,
    pub start_lines: Vec<TextRun>,
    pub completion_lines: Vec<TextRun>,
    pub badge: Badge,
    pub branding: [TextRun; 2],
}

impl CardLayout {
    /// Lay out a quote
    ///
    /// Start and completion text shrink in steps down to
    /// [`MIN_TEXT_SCALE`] until the badge clears the branding. Lines that
    /// still do not fit are dropped from the end of the completion, then the
    /// start, and the last kept line ends in an ellipsis.
    pub fn compute<M>(quote: &Quote, format: CardFormat, measurer: &M) -> Self
    where
        M: TextMeasurer + ?Sized,
    {
        let m = format.metrics();
        let center_x = m.width as f32 / 2.0;
        let run = |text: String, font: FontSpec, middle_y: f32, opacity: f32| TextRun {
            text,
            font,
            center_x,
            middle_y,
            opacity,
        };

        let icon = run(ICON.to_string(), ICON_FONT, m.icon_y, 0.9);

        let block = fit_text(quote, &m, measurer);
        let mut y = m.start_y;
        let start_lines = stack_lines(block.start, block.start_step, &mut y, |text, y| {
            run(text, block.start_font, y, 1.0)
        });
        y += m.completion_gap;
        let completion_lines =
            stack_lines(block.completion, block.completion_step, &mut y, |text, y| {
                run(text, block.completion_font, y, 0.9)
            });

        let label = quote.mood.label();
        let badge_width = measurer.measure(label, BADGE_FONT) + BADGE_PADDING;
        let badge_y = y + m.badge_gap;
        let badge = Badge {
            x: (m.width as f32 - badge_width) / 2.0,
            y: badge_y,
            width: badge_width,
            height: BADGE_HEIGHT,
            radius: BADGE_HEIGHT / 2.0,
            label: run(label.to_string(), BADGE_FONT, badge_y + BADGE_HEIGHT / 2.0, 1.0),
        };

        let height = m.height as f32;
        let branding = [
            run(
                BRAND_TITLE.to_string(),
                TITLE_FONT,
                height - m.title_offset,
                0.6,
            ),
            run(
                BRAND_TAGLINE.to_string(),
                TAGLINE_FONT,
                height - m.tagline_offset,
                0.6,
            ),
        ];

        log::debug!(
            "Card layout: {} start lines, {} completion lines, text scale {}, badge at y={}",
            start_lines.len(),
            completion_lines.len(),
            block.scale,
            badge_y
        );

        Self {
            width: m.width,
            height: m.height,
            icon,
            start_lines,
            completion_lines,
            badge,
            branding,
        }
    }

    /// Every text run in paint order
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        std::iter::once(&self.icon)
            .chain(&self.start_lines)
            .chain(&self.completion_lines)
            .chain(std::iter::once(&self.badge.label))
            .chain(&self.branding)
    }
}

/// Smallest text scale tried before lines are dropped
pub const MIN_TEXT_SCALE: f32 = 0.6;
const SCALE_STEPS: u32 = 8;
const ELLIPSIS: char = '\u{2026}';

/// Wrapped start and completion text at the scale that fits
struct TextBlock {
    scale: f32,
    start_font: FontSpec,
    completion_font: FontSpec,
    start_step: f32,
    completion_step: f32,
    start: Vec<String>,
    completion: Vec<String>,
}

impl TextBlock {
    fn wrap<M>(quote: &Quote, m: &CardMetrics, scale: f32, measurer: &M) -> Self
    where
        M: TextMeasurer + ?Sized,
    {
        let start_font = START_FONT.scaled(scale);
        let completion_font = COMPLETION_FONT.scaled(scale);
        Self {
            scale,
            start_font,
            completion_font,
            start_step: m.start_step * scale,
            completion_step: m.completion_step * scale,
            start: wrap_quoted(&quote.start_text, m.text_width, start_font, measurer),
            completion: wrap_quoted(&quote.completion_text, m.text_width, completion_font, measurer),
        }
    }

    /// Bottom edge of the badge below this block
    fn badge_bottom(&self, m: &CardMetrics) -> f32 {
        let start_rows = self.start.len().saturating_sub(1) as f32;
        let completion_rows = self.completion.len().saturating_sub(1) as f32;
        m.start_y
            + start_rows * self.start_step
            + m.completion_gap
            + completion_rows * self.completion_step
            + m.badge_gap
            + BADGE_HEIGHT
    }

    fn fits(&self, m: &CardMetrics) -> bool {
        self.badge_bottom(m) <= content_limit(m)
    }
}

/// Lowest y the badge may reach: the top of the branding title
pub fn content_limit(m: &CardMetrics) -> f32 {
    m.height as f32 - m.title_offset - TITLE_FONT.size_px / 2.0
}

fn fit_text<M>(quote: &Quote, m: &CardMetrics, measurer: &M) -> TextBlock
where
    M: TextMeasurer + ?Sized,
{
    let mut block = TextBlock::wrap(quote, m, 1.0, measurer);
    for i in 1..=SCALE_STEPS {
        if block.fits(m) {
            return block;
        }
        let scale = if i == SCALE_STEPS {
            MIN_TEXT_SCALE
        } else {
            1.0 - (1.0 - MIN_TEXT_SCALE) * i as f32 / SCALE_STEPS as f32
        };
        block = TextBlock::wrap(quote, m, scale, measurer);
    }

    if block.fits(m) {
        return block;
    }

    log::warn!("Quote too long for the card, truncating text");
    let mut truncated = false;
    while !block.fits(m) && block.completion.len() > 1 {
        block.completion.pop();
        truncated = true;
    }
    if truncated {
        mark_truncated(&mut block.completion, m.text_width, block.completion_font, measurer);
        truncated = false;
    }
    while !block.fits(m) && block.start.len() > 1 {
        block.start.pop();
        truncated = true;
    }
    if truncated {
        mark_truncated(&mut block.start, m.text_width, block.start_font, measurer);
    }
    block
}

/// End the last line in an ellipsis, dropping words until it fits
fn mark_truncated<M>(lines: &mut [String], max_width: f32, font: FontSpec, measurer: &M)
where
    M: TextMeasurer + ?Sized,
{
    let Some(last) = lines.last_mut() else {
        return;
    };
    let too_wide = |s: &str| {
        let marked = format!("{}{}{}{}", OPEN_QUOTE, s, ELLIPSIS, CLOSE_QUOTE);
        measurer.measure(&marked, font) > max_width
    };
    while too_wide(last.as_str()) {
        match last.rfind(' ') {
            Some(i) => last.truncate(i),
            None => break,
        }
    }
    last.push(ELLIPSIS);
}

/// Wrap with room left for the quotation marks on the first and last line
fn wrap_quoted<M>(text: &str, max_width: f32, font: FontSpec, measurer: &M) -> Vec<String>
where
    M: TextMeasurer + ?Sized,
{
    wrap(text, max_width, |s| {
        measurer.measure(&format!("{}{}{}", OPEN_QUOTE, s, CLOSE_QUOTE), font)
    })
}

/// Quote-mark the block and assign each line a position
///
/// `y` ends on the middle of the last line.
fn stack_lines<F>(lines: Vec<String>, step: f32, y: &mut f32, mut make: F) -> Vec<TextRun>
where
    F: FnMut(String, f32) -> TextRun,
{
    let last = lines.len().saturating_sub(1);
    let mut runs = Vec::with_capacity(lines.len());
    for (i, line) in lines.into_iter().enumerate() {
        let mut text = String::with_capacity(line.len() + 8);
        if i == 0 {
            text.push(OPEN_QUOTE);
        }
        text.push_str(&line);
        if i == last {
            text.push(CLOSE_QUOTE);
        }
        if i > 0 {
            *y += step;
        }
        runs.push(make(text, *y));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedAdvanceMeasurer;
    use crate::mood::Mood;

    fn layout(quote: &Quote) -> CardLayout {
        CardLayout::compute(quote, CardFormat::Square, &FixedAdvanceMeasurer::default())
    }

    #[test]
    fn test_single_line_positions() {
        let l = layout(&Quote::new("I wish", "you stayed", Mood::Hopeful));
        assert_eq!(l.start_lines.len(), 1);
        assert_eq!(l.start_lines[0].middle_y, 320.0);
        assert_eq!(l.start_lines[0].text, "\u{201C}I wish\u{201D}");
        assert_eq!(l.completion_lines[0].middle_y, 420.0);
        assert_eq!(l.badge.y, 500.0);
        assert_eq!(l.badge.label.middle_y, 520.0);
        assert_eq!(l.branding[0].middle_y, 1020.0);
        assert_eq!(l.branding[1].middle_y, 1050.0);
    }

    #[test]
    fn test_positions_follow_line_counts() {
        let long = "I never got to tell you that I loved you more than words could say";
        let l = layout(&Quote::new(long, long, Mood::Sad));
        let n = l.start_lines.len();
        assert!(n > 1);

        let last_start = l.start_lines[n - 1].middle_y;
        assert_eq!(last_start, 320.0 + 50.0 * (n - 1) as f32);
        assert_eq!(l.completion_lines[0].middle_y, last_start + 100.0);

        let c = l.completion_lines.len();
        let last_completion = l.completion_lines[c - 1].middle_y;
        assert_eq!(l.badge.y, last_completion + 80.0);

        assert!(l.start_lines[0].text.starts_with('\u{201C}'));
        assert!(!l.start_lines[0].text.ends_with('\u{201D}'));
        assert!(l.start_lines[n - 1].text.ends_with('\u{201D}'));
    }

    #[test]
    fn test_long_completion_clears_branding() {
        let quote = Quote::new("Start", "word ".repeat(120), Mood::Hopeful);
        let l = layout(&quote);
        let title_top = l.branding[0].middle_y - TITLE_FONT.size_px / 2.0;
        assert!(l.badge.y + l.badge.height <= title_top);
        assert!(l.completion_lines[0].font.size_px < COMPLETION_FONT.size_px);
        // Every word is still there
        let words: usize = l
            .completion_lines
            .iter()
            .map(|r| r.text.split_whitespace().count())
            .sum();
        assert_eq!(words, 120);
    }

    #[test]
    fn test_overlong_quote_is_truncated() {
        let long = "word ".repeat(2000);
        let l = layout(&Quote::new(long.clone(), long, Mood::Sad));
        let title_top = l.branding[0].middle_y - TITLE_FONT.size_px / 2.0;
        assert!(l.badge.y + l.badge.height <= title_top);
        assert_eq!(l.completion_lines[0].font, COMPLETION_FONT.scaled(MIN_TEXT_SCALE));
        let last = &l.completion_lines.last().unwrap().text;
        assert!(last.ends_with("\u{2026}\u{201D}"));
    }

    #[test]
    fn test_quoted_lines_fit_text_width() {
        let measurer = FixedAdvanceMeasurer::default();
        // Nine words fit 800px only without the quotation marks
        let l = layout(&Quote::new("word ".repeat(30), "b", Mood::Hopeful));
        for run in &l.start_lines {
            assert!(measurer.measure(&run.text, run.font) <= 800.0, "{}", run.text);
        }
        assert_eq!(l.start_lines[0].text.split_whitespace().count(), 8);
    }

    #[test]
    fn test_badge_sized_to_label() {
        let measurer = FixedAdvanceMeasurer::default();
        let l = layout(&Quote::new("a", "b", Mood::Nostalgic));
        let expected = measurer.measure("Nostalgic", BADGE_FONT) + BADGE_PADDING;
        assert_eq!(l.badge.width, expected);
        assert_eq!(l.badge.x, (1080.0 - expected) / 2.0);
        assert_eq!(l.badge.radius, 20.0);
    }

    #[test]
    fn test_empty_completion() {
        let l = layout(&Quote::new("Start", "", Mood::Hopeful));
        assert_eq!(l.completion_lines.len(), 1);
        assert_eq!(l.completion_lines[0].text, "\u{201C}\u{201D}");
    }

    #[test]
    fn test_open_graph_format() {
        let l = CardLayout::compute(
            &Quote::new("a", "b", Mood::Joyful),
            CardFormat::OpenGraph,
            &FixedAdvanceMeasurer::default(),
        );
        assert_eq!((l.width, l.height), (1200, 630));
        assert_eq!(l.icon.center_x, 600.0);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(CardFormat::from_str("og"), Some(CardFormat::OpenGraph));
        assert_eq!(CardFormat::from_str("Square"), Some(CardFormat::Square));
        assert_eq!(CardFormat::from_str("round"), None);
    }

    #[test]
    fn test_runs_order() {
        let l = layout(&Quote::new("a", "b", Mood::Joyful));
        let texts: Vec<&str> = l.runs().map(|r| r.text.as_str()).collect();
        assert_eq!(texts.first(), Some(&ICON));
        assert_eq!(texts.last(), Some(&BRAND_TAGLINE));
        assert!(texts.contains(&"Joyful"));
    }
}
