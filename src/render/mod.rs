//! Quote card renderer
//!
//! Composes a card onto a software canvas and encodes it:
//!
//! 1. diagonal gradient in the mood's colors
//! 2. low-opacity dot grid
//! 3. icon glyph, wrapped start and completion text
//! 4. capsule mood badge
//! 5. branding lines near the bottom edge
//!
//! Glyphs come from a [`Typesetter`] and bytes from an [`ImageEncoder`]. When
//! either capability is missing, [`QuoteRenderer::render`] returns a
//! placeholder image instead of failing.

pub mod canvas;
pub mod card;
pub mod encode;
pub mod font;

use base64::Engine;

use crate::app::Config;
use crate::mood::{color_scheme_for, ColorScheme, Rgb};
use crate::quote::Quote;

pub use canvas::Canvas;
pub use card::{Badge, CardFormat, CardLayout, CardMetrics, TextRun};
pub use encode::{ImageEncoder, NullEncoder, PngEncoder};
pub use font::{Glyph, LineMetrics, Typesetter};

#[cfg(feature = "fonts")]
pub use font::FontBook;

const DOT_PITCH: f32 = 54.0;
const DOT_RADIUS: f32 = 2.0;
const DOT_OPACITY: f32 = 0.1;
const DOT_COLOR: Rgb = (255, 255, 255);

/// An encoded card, or a placeholder when rendering was unavailable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    /// PNG bytes; empty for a placeholder
    pub png: Vec<u8>,
}

impl RenderedImage {
    pub fn placeholder(format: CardFormat) -> Self {
        let m = format.metrics();
        Self {
            width: m.width,
            height: m.height,
            png: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.png.is_empty()
    }

    /// `data:image/png;base64,...`, or an empty string for a placeholder
    pub fn to_data_uri(&self) -> String {
        if self.is_placeholder() {
            return String::new();
        }
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Renders quotes to images
pub struct QuoteRenderer {
    typesetter: Option<Box<dyn Typesetter>>,
    encoder: Box<dyn ImageEncoder>,
    format: CardFormat,
}

impl QuoteRenderer {
    pub fn new(
        typesetter: Box<dyn Typesetter>,
        encoder: Box<dyn ImageEncoder>,
        format: CardFormat,
    ) -> Self {
        Self {
            typesetter: Some(typesetter),
            encoder,
            format,
        }
    }

    /// Renderer for environments without fonts or image support
    ///
    /// Every render returns a placeholder.
    pub fn unavailable(format: CardFormat) -> Self {
        Self {
            typesetter: None,
            encoder: Box::new(NullEncoder),
            format,
        }
    }

    /// Build a PNG renderer from configured or system fonts
    pub fn from_config(config: &Config) -> Self {
        let format = config.card.format;
        match discover_typesetter(config) {
            Some(typesetter) => Self::new(typesetter, Box::new(PngEncoder), format),
            None => {
                log::warn!("No fonts available, quote images will be placeholders");
                Self::unavailable(format)
            }
        }
    }

    pub fn format(&self) -> CardFormat {
        self.format
    }

    pub fn with_format(mut self, format: CardFormat) -> Self {
        self.format = format;
        self
    }

    pub fn is_available(&self) -> bool {
        self.typesetter.is_some()
    }

    /// Geometry for a quote, `None` without a typesetter
    pub fn layout(&self, quote: &Quote) -> Option<CardLayout> {
        let typesetter = self.typesetter.as_deref()?;
        Some(CardLayout::compute(quote, self.format, typesetter))
    }

    /// Paint a quote without encoding it
    pub fn paint(&self, quote: &Quote) -> Option<Canvas> {
        let typesetter = self.typesetter.as_deref()?;
        let layout = CardLayout::compute(quote, self.format, typesetter);
        Some(paint_card(&layout, color_scheme_for(quote.mood), typesetter))
    }

    /// Render a quote to an encoded image
    ///
    /// Never fails: missing capabilities and encoder errors are logged and
    /// produce a placeholder.
    pub fn render(&self, quote: &Quote) -> RenderedImage {
        let Some(canvas) = self.paint(quote) else {
            log::debug!("Rendering unavailable, returning placeholder");
            return RenderedImage::placeholder(self.format);
        };

        match self.encoder.encode(&canvas) {
            Ok(png) => {
                log::debug!(
                    "Rendered {}x{} card ({} bytes)",
                    canvas.width(),
                    canvas.height(),
                    png.len()
                );
                RenderedImage {
                    width: canvas.width(),
                    height: canvas.height(),
                    png,
                }
            }
            Err(e) => {
                log::warn!("Failed to encode quote image: {}", e);
                RenderedImage::placeholder(self.format)
            }
        }
    }
}

#[cfg(feature = "fonts")]
fn discover_typesetter(config: &Config) -> Option<Box<dyn Typesetter>> {
    match FontBook::discover(&config.fonts) {
        Ok(book) => Some(Box::new(book)),
        Err(e) => {
            log::warn!("Font discovery failed: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "fonts"))]
fn discover_typesetter(_config: &Config) -> Option<Box<dyn Typesetter>> {
    log::warn!("Built without font support");
    None
}

/// Paint a laid-out card
pub fn paint_card(layout: &CardLayout, scheme: ColorScheme, typesetter: &dyn Typesetter) -> Canvas {
    let mut canvas = Canvas::new(layout.width, layout.height);

    canvas.fill_diagonal_gradient(scheme.primary, scheme.secondary);
    paint_dot_grid(&mut canvas);

    draw_run(&mut canvas, &layout.icon, scheme.text, typesetter);
    for run in layout.start_lines.iter().chain(&layout.completion_lines) {
        draw_run(&mut canvas, run, scheme.text, typesetter);
    }

    let badge = &layout.badge;
    canvas.fill_rounded_rect(
        badge.x,
        badge.y,
        badge.width,
        badge.height,
        badge.radius,
        scheme.primary,
        1.0,
    );
    draw_run(&mut canvas, &badge.label, scheme.text, typesetter);

    for run in &layout.branding {
        draw_run(&mut canvas, run, scheme.text, typesetter);
    }

    canvas
}

/// White dots on a fixed lattice
fn paint_dot_grid(canvas: &mut Canvas) {
    let cols = (canvas.width() as f32 / DOT_PITCH) as u32;
    let rows = (canvas.height() as f32 / DOT_PITCH) as u32;
    let offset = DOT_PITCH / 2.0;

    for i in 0..cols {
        for j in 0..rows {
            canvas.fill_circle(
                i as f32 * DOT_PITCH + offset,
                j as f32 * DOT_PITCH + offset,
                DOT_RADIUS,
                DOT_COLOR,
                DOT_OPACITY,
            );
        }
    }
}

/// Draw a run centred on its anchor
fn draw_run(canvas: &mut Canvas, run: &TextRun, color: Rgb, typesetter: &dyn Typesetter) {
    let width = typesetter.measure(&run.text, run.font);
    let baseline = typesetter
        .line_metrics(run.font)
        .baseline_for_middle(run.middle_y)
        .round() as i32;

    let mut pen = run.center_x - width / 2.0;
    let mut chars = run.text.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(glyph) = typesetter.glyph(c, run.font) {
            canvas.draw_glyph(pen.round() as i32, baseline, &glyph, color, run.opacity);
        }
        pen += typesetter.advance(c, chars.peek().copied(), run.font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FixedAdvanceMeasurer, FontSpec, TextMeasurer};
    use crate::mood::Mood;

    const WHITE: Rgb = (255, 255, 255);

    /// Every visible char is a solid 10x20 block on a 10px advance
    struct SolidTypesetter {
        draw: bool,
    }

    impl TextMeasurer for SolidTypesetter {
        fn measure(&self, text: &str, _font: FontSpec) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    impl Typesetter for SolidTypesetter {
        fn glyph(&self, c: char, _font: FontSpec) -> Option<Glyph> {
            if !self.draw || c.is_whitespace() {
                return None;
            }
            Some(Glyph {
                width: 10,
                height: 20,
                xmin: 0,
                ymin: 0,
                bitmap: vec![255; 200],
            })
        }

        fn advance(&self, _c: char, _next: Option<char>, _font: FontSpec) -> f32 {
            10.0
        }

        fn line_metrics(&self, _font: FontSpec) -> LineMetrics {
            LineMetrics {
                ascent: 20.0,
                descent: 0.0,
            }
        }
    }

    fn solid(draw: bool) -> QuoteRenderer {
        QuoteRenderer::new(
            Box::new(SolidTypesetter { draw }),
            Box::new(PngEncoder),
            CardFormat::Square,
        )
    }

    /// Columns and rows holding exactly `color`
    fn painted_bounds(canvas: &Canvas, color: Rgb) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y) == Some(color) {
                    let b = bounds.get_or_insert((x, x, y, y));
                    b.0 = b.0.min(x);
                    b.1 = b.1.max(x);
                    b.2 = b.2.min(y);
                    b.3 = b.3.max(y);
                }
            }
        }
        bounds
    }

    fn renderer() -> QuoteRenderer {
        QuoteRenderer::new(
            Box::new(FixedAdvanceMeasurer::default()),
            Box::new(PngEncoder),
            CardFormat::Square,
        )
    }

    #[test]
    fn test_render_produces_png() {
        let image = renderer().render(&Quote::new("Hello", "world", Mood::Hopeful));
        assert!(!image.is_placeholder());
        assert_eq!((image.width, image.height), (1080, 1080));
        assert!(image.to_data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_unavailable_renderer_returns_placeholder() {
        let r = QuoteRenderer::unavailable(CardFormat::Square);
        let image = r.render(&Quote::new("Hello", "world", Mood::Hopeful));
        assert!(image.is_placeholder());
        assert_eq!(image.to_data_uri(), "");
        assert!(r.layout(&Quote::new("a", "b", Mood::Sad)).is_none());
    }

    #[test]
    fn test_encoder_failure_returns_placeholder() {
        let r = QuoteRenderer::new(
            Box::new(FixedAdvanceMeasurer::default()),
            Box::new(NullEncoder),
            CardFormat::OpenGraph,
        );
        let image = r.render(&Quote::new("a", "b", Mood::Sad));
        assert!(image.is_placeholder());
        assert_eq!((image.width, image.height), (1200, 630));
    }

    #[test]
    fn test_mood_changes_gradient_not_geometry() {
        let r = renderer();
        let sad = Quote::new("I wanted to say", "thank you", Mood::Sad);
        let grateful = Quote {
            mood: Mood::Grateful,
            ..sad.clone()
        };

        let a = r.paint(&sad).unwrap();
        let b = r.paint(&grateful).unwrap();
        assert_ne!(a.pixel(0, 0), b.pixel(0, 0));

        let la = r.layout(&sad).unwrap();
        let lb = r.layout(&grateful).unwrap();
        assert_eq!(la.start_lines, lb.start_lines);
        assert_eq!(la.completion_lines, lb.completion_lines);
    }

    #[test]
    fn test_render_is_deterministic() {
        let r = renderer();
        let q = Quote::new("Same", "input", Mood::Anxious);
        assert_eq!(r.render(&q), r.render(&q));
    }

    #[test]
    fn test_draw_run_centres_on_anchor() {
        let mut canvas = Canvas::new(100, 60);
        let run = TextRun {
            text: "abcd".to_string(),
            font: card::START_FONT,
            center_x: 50.0,
            middle_y: 30.0,
            opacity: 1.0,
        };
        draw_run(&mut canvas, &run, WHITE, &SolidTypesetter { draw: true });

        let (x0, x1, y0, y1) = painted_bounds(&canvas, WHITE).unwrap();
        assert_eq!((x0, x1), (30, 69));
        assert_eq!((y0, y1), (20, 39));
        assert_eq!((x0 + x1 + 1) as f32 / 2.0, run.center_x);
        assert_eq!((y0 + y1 + 1) as f32 / 2.0, run.middle_y);
    }

    #[test]
    fn test_draw_run_blends_opacity() {
        let mut canvas = Canvas::new(40, 40);
        let run = TextRun {
            text: "x".to_string(),
            font: card::COMPLETION_FONT,
            center_x: 20.0,
            middle_y: 20.0,
            opacity: 0.9,
        };
        draw_run(&mut canvas, &run, WHITE, &SolidTypesetter { draw: true });
        assert_eq!(canvas.pixel(20, 20), Some(canvas::blend_color((0, 0, 0), WHITE, 0.9)));
        assert_eq!(canvas.pixel(5, 20), Some((0, 0, 0)));
    }

    #[test]
    fn test_card_text_painted_at_layout_positions() {
        let quote = Quote::new("Hello", "world", Mood::Hopeful);
        let renderer = solid(true);
        let layout = renderer.layout(&quote).unwrap();
        let with_text = renderer.paint(&quote).unwrap();
        let background = solid(false).paint(&quote).unwrap();

        // Start line at full opacity, centred on the card
        let start = &layout.start_lines[0];
        let half = start.text.chars().count() as u32 * 10 / 2;
        let (left, right) = (start.center_x as u32 - half, start.center_x as u32 + half - 1);
        let y = start.middle_y as u32;
        assert_eq!(with_text.pixel(left, y), Some(WHITE));
        assert_eq!(with_text.pixel(right, y), Some(WHITE));
        assert_ne!(with_text.pixel(left - 1, y), Some(WHITE));
        assert_ne!(with_text.pixel(right + 1, y), Some(WHITE));

        // Completion blended over the background at 90%
        let completion = &layout.completion_lines[0];
        assert_eq!(completion.opacity, 0.9);
        let (x, y) = (completion.center_x as u32, completion.middle_y as u32);
        let bg = background.pixel(x, y).unwrap();
        assert_eq!(with_text.pixel(x, y), Some(canvas::blend_color(bg, WHITE, 0.9)));
    }

    #[test]
    fn test_dot_grid_lightens_background() {
        let mut canvas = Canvas::new(108, 108);
        paint_dot_grid(&mut canvas);
        let (r, g, b) = canvas.pixel(27, 27).unwrap();
        assert!(r > 0 && g > 0 && b > 0);
        assert_eq!(canvas.pixel(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_badge_filled_with_primary() {
        let r = renderer();
        let q = Quote::new("a", "b", Mood::Angry);
        let layout = r.layout(&q).unwrap();
        let canvas = r.paint(&q).unwrap();
        let cx = (layout.badge.x + layout.badge.width / 2.0) as u32;
        let cy = (layout.badge.y + 2.0) as u32;
        assert_eq!(canvas.pixel(cx, cy), Some(color_scheme_for(Mood::Angry).primary));
    }
}
