//! Unfinished Sentences quote cards
//!
//! Renders completed sentence pairs as shareable quote images and dispatches
//! them to share targets.
//!
//! - `mood`: mood tags, colour schemes and mood suggestion
//! - `quote`: the quote value and its share text
//! - `layout`: greedy word wrap against a text measurer
//! - `render`: card layout, software painting and PNG encoding
//! - `share`: native share, download, platform links, shareable links
//! - `rotation`: prompt rotation schedule
//! - `themes`: the daily featured theme
//! - `app`: configuration and CLI arguments

pub mod app;
pub mod error;
pub mod layout;
pub mod mood;
pub mod quote;
pub mod render;
pub mod rotation;
pub mod share;
pub mod themes;

pub use error::{FontError, LinkError, RenderError, ShareError};
pub use layout::{wrap, wrap_with, FixedAdvanceMeasurer, FontFace, FontSpec, TextMeasurer};
pub use mood::{color_scheme_for, color_scheme_for_token, suggest_mood, ColorScheme, Mood};
pub use quote::Quote;
pub use render::{CardFormat, QuoteRenderer, RenderedImage};
pub use rotation::{RotationSchedule, Tab};
pub use share::{DownloadOutcome, Platform, ShareDispatcher, ShareOutcome, ShareSurface};
pub use themes::{todays_theme, DailyTheme};
