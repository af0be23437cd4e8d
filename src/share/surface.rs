//! Platform share surfaces
//!
//! [`ShareSurface`] is everything sharing needs from the host: a native share
//! sheet, the clipboard, user notifications, a browser and file saving.
//! [`DesktopSurface`] talks to the real system, [`MemorySurface`] records
//! actions for dry runs and tests.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ShareError;

/// Content handed to a native share sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Size of a popup browsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFeatures {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowFeatures {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}

/// Host capabilities used by the share dispatcher
pub trait ShareSurface {
    /// Show the platform share sheet
    ///
    /// Returns [`ShareError::Unsupported`] when there is none and
    /// [`ShareError::Cancelled`] when the user dismisses it.
    fn native_share(&mut self, payload: &SharePayload) -> Result<(), ShareError>;

    fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError>;

    /// Tell the user something happened
    fn notify(&mut self, message: &str);

    /// Open a URL in a new browsing context
    fn open_url(&mut self, url: &str, window: WindowFeatures) -> Result<(), ShareError>;

    /// Save bytes under a file name, returning where they went
    fn save_file(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ShareError>;
}

/// The local desktop: system clipboard, default browser, downloads folder
///
/// Desktops have no share sheet, so native sharing always falls back to the
/// clipboard.
pub struct DesktopSurface {
    #[cfg(feature = "clipboard")]
    clipboard: Option<arboard::Clipboard>,
    download_dir: PathBuf,
}

impl DesktopSurface {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            #[cfg(feature = "clipboard")]
            clipboard: arboard::Clipboard::new()
                .map_err(|e| log::warn!("Clipboard not available: {}", e))
                .ok(),
            download_dir,
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    fn opener(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }

    /// Run an opener to completion so the child is reaped
    fn run_opener(mut cmd: Command) -> Result<(), ShareError> {
        let status = cmd.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(ShareError::Opener(status))
        }
    }
}

impl ShareSurface for DesktopSurface {
    fn native_share(&mut self, _payload: &SharePayload) -> Result<(), ShareError> {
        Err(ShareError::Unsupported("native share sheet"))
    }

    #[cfg(feature = "clipboard")]
    fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
        let Some(clipboard) = self.clipboard.as_mut() else {
            return Err(ShareError::Unsupported("clipboard"));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }

    #[cfg(not(feature = "clipboard"))]
    fn write_clipboard(&mut self, _text: &str) -> Result<(), ShareError> {
        Err(ShareError::Unsupported("clipboard"))
    }

    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
        eprintln!("{}", message);
    }

    fn open_url(&mut self, url: &str, window: WindowFeatures) -> Result<(), ShareError> {
        // The system browser decides its own window size
        log::debug!(
            "Opening {} (requested {}x{})",
            url,
            window.width,
            window.height
        );
        Self::run_opener(Self::opener(url))
    }

    fn save_file(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ShareError> {
        std::fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(filename);
        std::fs::write(&path, bytes)?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }
}

/// How a [`MemorySurface`] answers native share requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NativeShare {
    /// No share sheet on this platform
    #[default]
    Unsupported,
    /// The user completes the share
    Accept,
    /// The user dismisses the sheet
    Cancel,
}

/// One recorded surface action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    NativeShare(SharePayload),
    Clipboard(String),
    Notify(String),
    OpenUrl { url: String, window: WindowFeatures },
    SaveFile { filename: String, len: usize },
}

/// Surface that records actions instead of performing them
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub native: NativeShare,
    /// Make clipboard writes fail
    pub clipboard_broken: bool,
    pub events: Vec<SurfaceEvent>,
}

impl MemorySurface {
    pub fn new(native: NativeShare) -> Self {
        Self {
            native,
            ..Self::default()
        }
    }

    /// Clipboard contents, if anything was copied
    pub fn clipboard(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Clipboard(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn opened_urls(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::OpenUrl { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ShareSurface for MemorySurface {
    fn native_share(&mut self, payload: &SharePayload) -> Result<(), ShareError> {
        match self.native {
            NativeShare::Unsupported => Err(ShareError::Unsupported("native share sheet")),
            NativeShare::Cancel => Err(ShareError::Cancelled),
            NativeShare::Accept => {
                self.events.push(SurfaceEvent::NativeShare(payload.clone()));
                Ok(())
            }
        }
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
        if self.clipboard_broken {
            return Err(ShareError::Clipboard("clipboard unavailable".to_string()));
        }
        self.events.push(SurfaceEvent::Clipboard(text.to_string()));
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.events.push(SurfaceEvent::Notify(message.to_string()));
    }

    fn open_url(&mut self, url: &str, window: WindowFeatures) -> Result<(), ShareError> {
        self.events.push(SurfaceEvent::OpenUrl {
            url: url.to_string(),
            window,
        });
        Ok(())
    }

    fn save_file(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ShareError> {
        self.events.push(SurfaceEvent::SaveFile {
            filename: filename.to_string(),
            len: bytes.len(),
        });
        Ok(PathBuf::from(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_has_no_share_sheet() {
        let mut surface = DesktopSurface::new(std::env::temp_dir());
        let payload = SharePayload {
            title: "t".into(),
            text: "x".into(),
            url: "https://example.com".into(),
        };
        assert!(matches!(
            surface.native_share(&payload),
            Err(ShareError::Unsupported(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_opener_waits_for_exit_status() {
        assert!(DesktopSurface::run_opener(Command::new("true")).is_ok());
        assert!(matches!(
            DesktopSurface::run_opener(Command::new("false")),
            Err(ShareError::Opener(status)) if !status.success()
        ));
        assert!(matches!(
            DesktopSurface::run_opener(Command::new("/nonexistent/opener")),
            Err(ShareError::Io(_))
        ));
    }

    #[test]
    fn test_desktop_save_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = DesktopSurface::new(dir.path().join("downloads"));
        let path = surface.save_file("card.png", b"png").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png");
        assert_eq!(path.parent(), Some(surface.download_dir()));
    }

    #[test]
    fn test_memory_surface_records() {
        let mut surface = MemorySurface::new(NativeShare::Cancel);
        assert!(matches!(
            surface.native_share(&SharePayload {
                title: String::new(),
                text: String::new(),
                url: String::new(),
            }),
            Err(ShareError::Cancelled)
        ));
        surface.write_clipboard("hello").unwrap();
        surface
            .open_url("https://example.com", WindowFeatures::default())
            .unwrap();
        assert_eq!(surface.clipboard(), Some("hello"));
        assert_eq!(surface.opened_urls(), vec!["https://example.com"]);
    }

    #[test]
    fn test_broken_clipboard() {
        let mut surface = MemorySurface {
            clipboard_broken: true,
            ..MemorySurface::default()
        };
        assert!(surface.write_clipboard("x").is_err());
        assert!(surface.events.is_empty());
    }
}
