//! Font Rendering
//!
//! Glyph rasterization behind the [`Typesetter`] capability. [`FontBook`]
//! loads one fontdue font per [`FontFace`] from configured or system paths.

use crate::layout::{FixedAdvanceMeasurer, FontSpec, TextMeasurer};

/// A rasterized glyph: coverage bitmap plus placement relative to the pen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Bitmap width in pixels
    pub width: usize,
    /// Bitmap height in pixels
    pub height: usize,
    /// X offset from pen position
    pub xmin: i32,
    /// Y offset of the bitmap bottom from the baseline
    pub ymin: i32,
    /// Coverage values, 1 byte per pixel
    pub bitmap: Vec<u8>,
}

/// Vertical font metrics in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from baseline to the top of the em box (positive)
    pub ascent: f32,
    /// Distance from baseline to the bottom (negative)
    pub descent: f32,
}

impl LineMetrics {
    /// Baseline that vertically centres a line on `middle_y`
    pub fn baseline_for_middle(&self, middle_y: f32) -> f32 {
        middle_y + (self.ascent + self.descent) / 2.0
    }
}

/// Measures and rasterizes text
pub trait Typesetter: TextMeasurer {
    /// Rasterize one character; `None` when the face has nothing to draw
    fn glyph(&self, c: char, font: FontSpec) -> Option<Glyph>;

    /// Advance from `c` to the next pen position, kerning against `next`
    fn advance(&self, c: char, next: Option<char>, font: FontSpec) -> f32;

    fn line_metrics(&self, font: FontSpec) -> LineMetrics;
}

/// Layout-only typesetter: fixed advances, no glyph bitmaps
impl Typesetter for FixedAdvanceMeasurer {
    fn glyph(&self, _c: char, _font: FontSpec) -> Option<Glyph> {
        None
    }

    fn advance(&self, _c: char, _next: Option<char>, font: FontSpec) -> f32 {
        font.size_px * self.advance_ratio
    }

    fn line_metrics(&self, font: FontSpec) -> LineMetrics {
        LineMetrics {
            ascent: font.size_px * 0.8,
            descent: -font.size_px * 0.2,
        }
    }
}

#[cfg(feature = "fonts")]
pub use book::FontBook;

#[cfg(feature = "fonts")]
mod book {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use fontdue::{Font, FontSettings};

    use super::{Glyph, LineMetrics, Typesetter};
    use crate::app::FontConfig;
    use crate::error::FontError;
    use crate::layout::{FontFace, FontSpec, TextMeasurer};

    /// Candidate file names per face, in order of preference
    fn candidate_files(face: FontFace) -> &'static [&'static str] {
        match face {
            FontFace::Serif => &[
                "DejaVuSerif.ttf",
                "LiberationSerif-Regular.ttf",
                "NotoSerif-Regular.ttf",
                "Georgia.ttf",
                "Times New Roman.ttf",
            ],
            FontFace::SerifItalic => &[
                "DejaVuSerif-Italic.ttf",
                "LiberationSerif-Italic.ttf",
                "NotoSerif-Italic.ttf",
                "Georgia Italic.ttf",
                "Times New Roman Italic.ttf",
            ],
            FontFace::Sans => &[
                "DejaVuSans.ttf",
                "LiberationSans-Regular.ttf",
                "NotoSans-Regular.ttf",
                "Arial.ttf",
            ],
        }
    }

    /// System font directories searched after the configured ones
    fn system_font_dirs() -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = if cfg!(target_os = "macos") {
            vec![
                "/System/Library/Fonts/Supplemental".into(),
                "/Library/Fonts".into(),
            ]
        } else if cfg!(target_os = "windows") {
            vec![r"C:\Windows\Fonts".into()]
        } else {
            vec![
                "/usr/share/fonts/truetype/dejavu".into(),
                "/usr/share/fonts/TTF".into(),
                "/usr/share/fonts/dejavu".into(),
                "/usr/share/fonts/truetype/liberation".into(),
                "/usr/share/fonts/liberation".into(),
                "/usr/share/fonts/truetype/noto".into(),
                "/usr/share/fonts/noto".into(),
            ]
        };
        if let Some(user) = dirs::font_dir() {
            dirs.push(user);
        }
        dirs
    }

    fn load_font(path: &Path) -> Result<Font, FontError> {
        let data = std::fs::read(path)?;
        Font::from_bytes(data, FontSettings::default()).map_err(|e| FontError::Parse(e.to_string()))
    }

    /// Key for the glyph cache: char, face, size bits
    type GlyphKey = (char, FontFace, u32);

    /// One loaded font per face
    pub struct FontBook {
        serif: Font,
        serif_italic: Font,
        sans: Font,
        glyph_cache: RefCell<HashMap<GlyphKey, Glyph>>,
    }

    impl FontBook {
        /// Locate fonts from the config, then the system font directories
        ///
        /// A missing face borrows another face's font; only finding no font
        /// at all is an error.
        pub fn discover(config: &FontConfig) -> Result<Self, FontError> {
            let mut search_dirs = config.search_dirs.clone();
            search_dirs.extend(system_font_dirs());

            let find = |face: FontFace, explicit: Option<&PathBuf>| -> Option<Font> {
                if let Some(path) = explicit {
                    match load_font(path) {
                        Ok(font) => {
                            log::info!("Loaded {:?} font: {}", face, path.display());
                            return Some(font);
                        }
                        Err(e) => log::warn!("Failed to load {}: {}", path.display(), e),
                    }
                }
                for dir in &search_dirs {
                    for name in candidate_files(face) {
                        let path = dir.join(name);
                        if let Ok(font) = load_font(&path) {
                            log::info!("Loaded {:?} font: {}", face, path.display());
                            return Some(font);
                        }
                    }
                }
                None
            };

            let serif = find(FontFace::Serif, config.serif.as_ref());
            let serif_italic = find(FontFace::SerifItalic, config.serif_italic.as_ref());
            let sans = find(FontFace::Sans, config.sans.as_ref());

            let any = serif
                .clone()
                .or_else(|| serif_italic.clone())
                .or_else(|| sans.clone())
                .ok_or(FontError::NoFontFound("serif or sans"))?;

            let serif = serif.unwrap_or_else(|| any.clone());
            let serif_italic = serif_italic.unwrap_or_else(|| {
                log::debug!("No italic serif found, using regular serif");
                serif.clone()
            });
            let sans = sans.unwrap_or_else(|| any.clone());

            Ok(Self::from_fonts(serif, serif_italic, sans))
        }

        /// Build from font file bytes, one per face
        pub fn from_bytes(serif: &[u8], serif_italic: &[u8], sans: &[u8]) -> Result<Self, FontError> {
            let parse = |data: &[u8]| {
                Font::from_bytes(data, FontSettings::default())
                    .map_err(|e| FontError::Parse(e.to_string()))
            };
            Ok(Self::from_fonts(parse(serif)?, parse(serif_italic)?, parse(sans)?))
        }

        fn from_fonts(serif: Font, serif_italic: Font, sans: Font) -> Self {
            Self {
                serif,
                serif_italic,
                sans,
                glyph_cache: RefCell::new(HashMap::new()),
            }
        }

        fn font(&self, face: FontFace) -> &Font {
            match face {
                FontFace::Serif => &self.serif,
                FontFace::SerifItalic => &self.serif_italic,
                FontFace::Sans => &self.sans,
            }
        }

        /// Clear the glyph cache
        pub fn clear_cache(&self) {
            self.glyph_cache.borrow_mut().clear();
        }
    }

    impl TextMeasurer for FontBook {
        fn measure(&self, text: &str, font: FontSpec) -> f32 {
            let mut chars = text.chars().peekable();
            let mut width = 0.0;
            while let Some(c) = chars.next() {
                width += self.advance(c, chars.peek().copied(), font);
            }
            width
        }
    }

    impl Typesetter for FontBook {
        fn glyph(&self, c: char, spec: FontSpec) -> Option<Glyph> {
            if c.is_whitespace() {
                return None;
            }
            let key = (c, spec.face, spec.size_px.to_bits());
            if let Some(glyph) = self.glyph_cache.borrow().get(&key) {
                return Some(glyph.clone());
            }

            let (metrics, bitmap) = self.font(spec.face).rasterize(c, spec.size_px);
            let glyph = Glyph {
                width: metrics.width,
                height: metrics.height,
                xmin: metrics.xmin,
                ymin: metrics.ymin,
                bitmap,
            };
            self.glyph_cache.borrow_mut().insert(key, glyph.clone());
            Some(glyph)
        }

        fn advance(&self, c: char, next: Option<char>, spec: FontSpec) -> f32 {
            let font = self.font(spec.face);
            let advance = font.metrics(c, spec.size_px).advance_width;
            let kern = next
                .and_then(|n| font.horizontal_kern(c, n, spec.size_px))
                .unwrap_or(0.0);
            advance + kern
        }

        fn line_metrics(&self, spec: FontSpec) -> LineMetrics {
            match self.font(spec.face).horizontal_line_metrics(spec.size_px) {
                Some(m) => LineMetrics {
                    ascent: m.ascent,
                    descent: m.descent,
                },
                None => LineMetrics {
                    ascent: spec.size_px * 0.8,
                    descent: -spec.size_px * 0.2,
                },
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FontFace;

    #[test]
    fn test_fixed_advance_typesetter() {
        let m = FixedAdvanceMeasurer::default();
        let spec = FontSpec::new(FontFace::Sans, 20.0);
        assert_eq!(m.advance('a', Some('b'), spec), 10.0);
        assert!(m.glyph('a', spec).is_none());
    }

    #[test]
    fn test_baseline_for_middle() {
        let metrics = LineMetrics {
            ascent: 30.0,
            descent: -10.0,
        };
        assert_eq!(metrics.baseline_for_middle(100.0), 110.0);
    }
}
