//! Configuration for Unfinished Cards
//!
//! Sources, highest priority first:
//! - CLI arguments
//! - `UNFINISHED_*` environment variables
//! - `<config dir>/unfinished-cards/config.toml`
//! - built-in defaults

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::quote::DEFAULT_ATTRIBUTION;
use crate::render::CardFormat;
use crate::rotation::DEFAULT_INTERVAL_SECS;

/// CLI arguments for Unfinished Cards
#[derive(Parser, Debug, Clone)]
#[command(name = "unfinished-cards")]
#[command(version)]
#[command(about = "Render and share Unfinished Sentences quote cards", long_about = None)]
pub struct CliArgs {
    /// Path to custom config file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Site origin used in share links
    #[arg(long, value_name = "URL", global = true)]
    pub origin: Option<String>,

    /// Extra directory to search for fonts
    #[arg(long, value_name = "DIR", global = true)]
    pub font_dir: Option<PathBuf>,

    /// Card format (square, open-graph)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Directory downloaded cards are saved to
    #[arg(long, value_name = "DIR", global = true)]
    pub download_dir: Option<PathBuf>,

    /// Record share actions instead of performing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// The quote a command acts on
#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Sentence start
    #[arg(long)]
    pub start: String,

    /// Sentence completion
    #[arg(long)]
    pub completion: String,

    /// Mood (sad, nostalgic, hopeful, grateful, frustrated, angry, anxious, joyful)
    #[arg(long, default_value = "hopeful")]
    pub mood: String,

    /// Theme the quote was written for
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a quote card to a PNG file
    Render {
        #[command(flatten)]
        quote: QuoteArgs,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the card layout as JSON instead of rendering
        #[arg(long)]
        layout: bool,
    },
    /// Print the shareable link and preview image URL
    Link {
        #[command(flatten)]
        quote: QuoteArgs,
    },
    /// Open a platform's share page
    Share {
        #[command(flatten)]
        quote: QuoteArgs,

        /// twitter, facebook or linkedin
        #[arg(short, long)]
        platform: String,
    },
    /// Share through the system share sheet or the clipboard
    Native {
        #[command(flatten)]
        quote: QuoteArgs,
    },
    /// Save the card to the download directory
    Download {
        #[command(flatten)]
        quote: QuoteArgs,
    },
    /// Suggest a mood for a completion
    Suggest {
        text: String,
    },
    /// Decode a shared link back into a quote
    Parse {
        link: String,
    },
    /// Show the featured theme for a day
    Theme {
        /// Day to look up, defaults to today
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<chrono::NaiveDate>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fonts: FontConfig,
    pub card: CardConfig,
    pub share: ShareConfig,
    pub rotation: RotationConfig,
}

/// Where to find fonts
///
/// Explicit paths win; otherwise `search_dirs` and then the system font
/// directories are scanned for well-known file names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub serif: Option<PathBuf>,
    pub serif_italic: Option<PathBuf>,
    pub sans: Option<PathBuf>,
    pub search_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub format: CardFormat,
}

/// Sharing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Site origin for shared links and platform URLs
    pub origin: String,
    /// Line appended to shared text
    pub attribution: String,
    /// Defaults to the user's download directory
    pub download_dir: Option<PathBuf>,
    pub popup_width: u32,
    pub popup_height: u32,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: "https://unfinished-sentences.vercel.app".to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            download_dir: None,
            popup_width: 600,
            popup_height: 400,
        }
    }
}

impl ShareConfig {
    /// Configured download directory, else the platform one, else `.`
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub enabled: bool,
    pub prompt_interval_secs: u64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prompt_interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl RotationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.prompt_interval_secs)
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config error in '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

const POPUP_RANGE: std::ops::RangeInclusive<u32> = 100..=4000;

impl Config {
    /// Load configuration with full precedence:
    /// CLI args > environment variables > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            // An explicitly requested file must load
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_default_file(),
        };

        config.apply_env_vars();
        config.apply_cli_args(args);
        config.validate()?;

        Ok(config)
    }

    fn load_default_file() -> Self {
        let Some(path) = Self::default_config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config from {:?}: {}", path, e);
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env_vars(&mut self) {
        self.apply_env(|key| env::var(key).ok());
    }

    /// Apply `UNFINISHED_*` variables from a lookup
    fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("UNFINISHED_ORIGIN") {
            self.share.origin = val;
        }
        if let Some(val) = var("UNFINISHED_FONT_DIR") {
            self.fonts.search_dirs.insert(0, PathBuf::from(val));
        }
        if let Some(val) = var("UNFINISHED_DOWNLOAD_DIR") {
            self.share.download_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = var("UNFINISHED_CARD_FORMAT") {
            match CardFormat::from_str(&val) {
                Some(format) => self.card.format = format,
                None => log::warn!("Ignoring unknown UNFINISHED_CARD_FORMAT '{}'", val),
            }
        }
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(origin) = &args.origin {
            self.share.origin = origin.clone();
        }
        if let Some(dir) = &args.font_dir {
            self.fonts.search_dirs.insert(0, dir.clone());
        }
        if let Some(dir) = &args.download_dir {
            self.share.download_dir = Some(dir.clone());
        }
        if let Some(format) = &args.format {
            match CardFormat::from_str(format) {
                Some(format) => self.card.format = format,
                None => log::warn!("Ignoring unknown card format '{}'", format),
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.share.origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    field: "share.origin",
                    message: format!("Origin must be http or https, got '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid {
                    field: "share.origin",
                    message: format!("Invalid origin '{}': {}", self.share.origin, e),
                });
            }
        }

        if self.share.attribution.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "share.attribution",
                message: "Attribution must not be empty".to_string(),
            });
        }

        if !POPUP_RANGE.contains(&self.share.popup_width) {
            return Err(ConfigError::Invalid {
                field: "share.popup_width",
                message: format!("Popup width must be within {:?}", POPUP_RANGE),
            });
        }
        if !POPUP_RANGE.contains(&self.share.popup_height) {
            return Err(ConfigError::Invalid {
                field: "share.popup_height",
                message: format!("Popup height must be within {:?}", POPUP_RANGE),
            });
        }

        if self.rotation.prompt_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "rotation.prompt_interval_secs",
                message: "Rotation interval must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("unfinished-cards").join("config.toml"))
    }
}
