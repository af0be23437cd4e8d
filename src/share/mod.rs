//! Sharing
//!
//! One-shot share actions for a quote. Nothing here keeps state between
//! calls, and nothing returns an error to the caller: unsupported
//! capabilities fall back, cancellation is absorbed and other failures are
//! logged and reported in the outcome.

mod links;
mod surface;

use std::path::PathBuf;

use crate::app::ShareConfig;
use crate::error::ShareError;
use crate::quote::Quote;
use crate::render::QuoteRenderer;

pub use links::{og_image_url, parse_shared_link, platform_url, shareable_link, Platform};
pub use surface::{
    DesktopSurface, MemorySurface, NativeShare, SharePayload, ShareSurface, SurfaceEvent,
    WindowFeatures,
};

/// Title shown on native share sheets
pub const SHARE_TITLE: &str = "Unfinished Sentences";

/// Message shown when sharing fell back to the clipboard
pub const COPIED_MESSAGE: &str = "Quote copied to clipboard!";

/// Result of [`ShareDispatcher::share_native`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The user dismissed the share sheet
    Cancelled,
    /// No share sheet; the text was copied instead
    CopiedToClipboard,
    Failed(String),
}

/// Result of [`ShareDispatcher::download_image`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub filename: String,
    /// Where the image was written; `None` if nothing was saved
    pub saved_to: Option<PathBuf>,
}

/// File name for a downloaded card
pub fn download_filename(epoch_ms: i64) -> String {
    format!("unfinished-sentence-{}.png", epoch_ms)
}

/// Runs share actions against a surface
pub struct ShareDispatcher<S: ShareSurface> {
    surface: S,
    renderer: QuoteRenderer,
    origin: String,
    attribution: String,
    popup: WindowFeatures,
}

impl<S: ShareSurface> ShareDispatcher<S> {
    pub fn new(surface: S, renderer: QuoteRenderer, config: &ShareConfig) -> Self {
        Self {
            surface,
            renderer,
            origin: config.origin.trim_end_matches('/').to_string(),
            attribution: config.attribution.clone(),
            popup: WindowFeatures {
                width: config.popup_width,
                height: config.popup_height,
            },
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn renderer(&self) -> &QuoteRenderer {
        &self.renderer
    }

    /// Share through the native sheet, or copy to the clipboard without one
    pub fn share_native(&mut self, quote: &Quote) -> ShareOutcome {
        let text = quote.share_text(&self.attribution);
        let payload = SharePayload {
            title: SHARE_TITLE.to_string(),
            text: text.clone(),
            url: self.origin.clone(),
        };

        match self.surface.native_share(&payload) {
            Ok(()) => ShareOutcome::Shared,
            Err(ShareError::Cancelled) => {
                log::debug!("Share cancelled by user");
                ShareOutcome::Cancelled
            }
            Err(ShareError::Unsupported(what)) => {
                log::debug!("No {}, copying to clipboard", what);
                match self.surface.write_clipboard(&text) {
                    Ok(()) => {
                        self.surface.notify(COPIED_MESSAGE);
                        ShareOutcome::CopiedToClipboard
                    }
                    Err(e) => {
                        log::warn!("Clipboard fallback failed: {}", e);
                        ShareOutcome::Failed(e.to_string())
                    }
                }
            }
            Err(e) => {
                log::warn!("Native share failed: {}", e);
                ShareOutcome::Failed(e.to_string())
            }
        }
    }

    /// Render the quote and save it as `unfinished-sentence-<epoch-ms>.png`
    pub fn download_image(&mut self, quote: &Quote) -> DownloadOutcome {
        let image = self.renderer.render(quote);
        let filename = download_filename(chrono::Utc::now().timestamp_millis());

        if image.is_placeholder() {
            log::warn!("No image to save for {}", filename);
            return DownloadOutcome {
                filename,
                saved_to: None,
            };
        }

        let saved_to = match self.surface.save_file(&filename, &image.png) {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Failed to save {}: {}", filename, e);
                None
            }
        };
        DownloadOutcome { filename, saved_to }
    }

    /// Open the platform's share page in a popup and return its URL
    pub fn share_to_platform(&mut self, quote: &Quote, platform: Platform) -> String {
        let url = platform_url(platform, quote, &self.origin, &self.attribution);
        if let Err(e) = self.surface.open_url(&url, self.popup) {
            log::warn!("Failed to open {} share page: {}", platform, e);
        }
        url
    }

    /// Link to the shared-quote page
    pub fn build_shareable_link(&self, quote: &Quote) -> String {
        shareable_link(&self.origin, quote)
    }

    /// Link-preview image URL
    pub fn og_image_url(&self, quote: &Quote) -> String {
        og_image_url(&self.origin, quote)
    }
}
