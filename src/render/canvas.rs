//! Software raster canvas
//!
//! A packed `0xAARRGGBB` pixel buffer with the handful of primitives a quote
//! card needs: gradients, discs, capsules and alpha-blended glyph coverage.

use crate::mood::Rgb;
use crate::render::font::Glyph;

/// Owned pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Canvas {
    /// Create a canvas filled with opaque black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb_to_pixel((0, 0, 0)); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at a pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y * self.width + x) as usize)
            .map(|p| pixel_to_rgb(*p))
    }

    /// Fill with a linear gradient from the top-left to the bottom-right corner
    pub fn fill_diagonal_gradient(&mut self, from: Rgb, to: Rgb) {
        let w = self.width as f32;
        let h = self.height as f32;
        let len_sq = w * w + h * h;
        if len_sq == 0.0 {
            return;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                // Project the pixel centre onto the diagonal
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let t = ((px * w + py * h) / len_sq).clamp(0.0, 1.0);
                let idx = (y * self.width + x) as usize;
                self.pixels[idx] = rgb_to_pixel(blend_color(from, to, t));
            }
        }
    }

    /// Blend a color into one pixel; out-of-bounds writes are dropped
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        if alpha >= 1.0 {
            self.pixels[idx] = rgb_to_pixel(color);
        } else if alpha > 0.0 {
            let existing = pixel_to_rgb(self.pixels[idx]);
            self.pixels[idx] = rgb_to_pixel(blend_color(existing, color, alpha));
        }
    }

    /// Fill a disc centred on `(cx, cy)`
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        let r_sq = radius * radius;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Fill a rectangle with rounded corners
    ///
    /// A radius of half the height gives a capsule.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: Rgb,
        alpha: f32,
    ) {
        let radius = radius.min(w / 2.0).min(h / 2.0).max(0.0);

        for py in y.floor() as i32..(y + h).ceil() as i32 {
            for px in x.floor() as i32..(x + w).ceil() as i32 {
                let sx = px as f32 + 0.5;
                let sy = py as f32 + 0.5;
                if sx < x || sx > x + w || sy < y || sy > y + h {
                    continue;
                }

                // Distance from the nearest corner centre, only inside corner boxes
                let cx = sx.clamp(x + radius, x + w - radius);
                let cy = sy.clamp(y + radius, y + h - radius);
                let dx = sx - cx;
                let dy = sy - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.blend_pixel(px, py, color, alpha);
                }
            }
        }
    }

    /// Draw a glyph's coverage bitmap with its origin at `(x, baseline)`
    pub fn draw_glyph(&mut self, x: i32, baseline: i32, glyph: &Glyph, color: Rgb, opacity: f32) {
        if glyph.width == 0 || glyph.height == 0 {
            return;
        }

        let gx = x + glyph.xmin;
        let gy = baseline - glyph.ymin - glyph.height as i32;

        for dy in 0..glyph.height {
            for dx in 0..glyph.width {
                let coverage = glyph.bitmap[dy * glyph.width + dx];
                if coverage == 0 {
                    continue;
                }
                let alpha = coverage as f32 / 255.0 * opacity;
                self.blend_pixel(gx + dx as i32, gy + dy as i32, color, alpha);
            }
        }
    }

    /// Pixels as tightly packed RGBA bytes
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            let (r, g, b) = pixel_to_rgb(*p);
            out.extend_from_slice(&[r, g, b, 0xFF]);
        }
        out
    }
}

/// Convert RGB to pixel value (ARGB format)
fn rgb_to_pixel((r, g, b): Rgb) -> u32 {
    0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

fn pixel_to_rgb(pixel: u32) -> Rgb {
    (
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    )
}

/// Linear interpolation between two colors, `t` in `0.0..=1.0`
pub fn blend_color(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let mut canvas = Canvas::new(100, 100);
        canvas.fill_diagonal_gradient((255, 0, 0), (0, 0, 255));

        let (r, _, b) = canvas.pixel(0, 0).unwrap();
        assert!(r > 250 && b < 5);
        let (r, _, b) = canvas.pixel(99, 99).unwrap();
        assert!(r < 5 && b > 250);
        let (r, _, b) = canvas.pixel(50, 50).unwrap();
        assert!((120..=135).contains(&r) && (120..=135).contains(&b));
    }

    #[test]
    fn test_blend_pixel_clips() {
        let mut canvas = Canvas::new(4, 4);
        canvas.blend_pixel(-1, 0, (255, 255, 255), 1.0);
        canvas.blend_pixel(4, 4, (255, 255, 255), 1.0);
        assert!(canvas.to_rgba().chunks(4).all(|p| p == [0, 0, 0, 255]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_blend_pixel_alpha() {
        let mut canvas = Canvas::new(1, 1);
        canvas.blend_pixel(0, 0, (200, 100, 0), 0.5);
        assert_eq!(canvas.pixel(0, 0), Some((100, 50, 0)));
    }

    #[test]
    fn test_capsule_corners_untouched() {
        let mut canvas = Canvas::new(100, 40);
        canvas.fill_rounded_rect(0.0, 0.0, 100.0, 40.0, 20.0, (255, 255, 255), 1.0);

        assert_eq!(canvas.pixel(0, 0), Some((0, 0, 0)));
        assert_eq!(canvas.pixel(99, 39), Some((0, 0, 0)));
        assert_eq!(canvas.pixel(50, 20), Some((255, 255, 255)));
        assert_eq!(canvas.pixel(20, 1), Some((255, 255, 255)));
    }

    #[test]
    fn test_fill_circle() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(5.0, 5.0, 2.0, (255, 255, 255), 1.0);
        assert_eq!(canvas.pixel(5, 5), Some((255, 255, 255)));
        assert_eq!(canvas.pixel(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_draw_glyph_coverage() {
        let mut canvas = Canvas::new(8, 8);
        let glyph = Glyph {
            width: 2,
            height: 2,
            xmin: 0,
            ymin: 0,
            bitmap: vec![255, 0, 0, 255],
        };
        canvas.draw_glyph(1, 4, &glyph, (255, 255, 255), 1.0);
        assert_eq!(canvas.pixel(1, 2), Some((255, 255, 255)));
        assert_eq!(canvas.pixel(2, 2), Some((0, 0, 0)));
        assert_eq!(canvas.pixel(2, 3), Some((255, 255, 255)));
    }

    #[test]
    fn test_to_rgba_len() {
        let canvas = Canvas::new(3, 2);
        assert_eq!(canvas.to_rgba().len(), 3 * 2 * 4);
    }
}
