//! Raster encoding

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::RenderError;
use crate::render::canvas::Canvas;

/// Turns a painted canvas into encoded image bytes
pub trait ImageEncoder {
    fn encode(&self, canvas: &Canvas) -> Result<Vec<u8>, RenderError>;
}

/// PNG encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn encode(&self, canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
        let (width, height) = (canvas.width(), canvas.height());
        let image = RgbaImage::from_raw(width, height, canvas.to_rgba())
            .ok_or(RenderError::BadCanvas { width, height })?;

        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

/// Encoder for environments that cannot produce images
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEncoder;

impl ImageEncoder for NullEncoder {
    fn encode(&self, _canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Unsupported("no image encoder"))
    }
}
