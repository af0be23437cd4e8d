//! Error types for rendering, sharing and link parsing

/// Rendering and encoding errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The environment has no rendering surface (no fonts, no encoder)
    #[error("rendering is not supported here: {0}")]
    Unsupported(&'static str),
    /// The canvas could not be turned into an image buffer
    #[error("canvas of {width}x{height} does not match its pixel buffer")]
    BadCanvas { width: u32, height: u32 },
    /// PNG encoding failed
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors reported by a [`ShareSurface`](crate::share::ShareSurface)
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// The platform does not offer this capability
    #[error("not supported on this platform: {0}")]
    Unsupported(&'static str),
    /// The user dismissed the share sheet
    #[error("share cancelled by user")]
    Cancelled,
    #[error("clipboard error: {0}")]
    Clipboard(String),
    /// The system URL opener ran but reported failure
    #[error("URL opener failed: {0}")]
    Opener(std::process::ExitStatus),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors parsing a shared quote link
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("missing required parameter '{0}'")]
    MissingParam(&'static str),
    #[error("invalid link: {0}")]
    InvalidUrl(String),
}

/// Font loading errors
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("font IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("font parse error: {0}")]
    Parse(String),
    #[error("no suitable {0} font found")]
    NoFontFound(&'static str),
}
