//! The quote value shared between rendering and sharing

use serde::{Deserialize, Serialize};

use crate::mood::Mood;

/// Signature appended to shared text
pub const DEFAULT_ATTRIBUTION: &str = "✨ Created on Unfinished Sentences";

/// A completed sentence: the unfinished start, a stranger's completion and a mood
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub start_text: String,
    pub completion_text: String,
    pub mood: Mood,
    /// Daily theme the sentence was written under, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Caption styles for copy-paste posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionStyle {
    Twitter,
    Instagram,
    LinkedIn,
}

impl Quote {
    pub fn new(start: impl Into<String>, completion: impl Into<String>, mood: Mood) -> Self {
        Self {
            start_text: start.into(),
            completion_text: completion.into(),
            mood,
            theme: None,
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Text block for share sheets and the clipboard:
    /// start, blank line, completion, blank line, attribution
    pub fn share_text(&self, attribution: &str) -> String {
        format!(
            "\"{}\"\n\n\"{}\"\n\n{}",
            self.start_text, self.completion_text, attribution
        )
    }

    /// Both halves quoted on one line
    pub fn quoted_pair(&self) -> String {
        format!("\"{}\" \"{}\"", self.start_text, self.completion_text)
    }

    /// Ready-to-post caption with hashtags for a platform
    pub fn caption(&self, style: CaptionStyle) -> String {
        let base = format!("{}\n\n{}", self.start_text, self.completion_text);
        match style {
            CaptionStyle::Twitter => format!(
                "{base}\n\n✨ #UnfinishedSentences #Poetry #Vulnerability #Connection"
            ),
            CaptionStyle::Instagram => format!(
                "{base}\n\n✨ Sometimes the most beautiful words are completed by strangers.\n\n\
                 #UnfinishedSentences #Poetry #Community #Vulnerability #Connection #Words #Healing #Love"
            ),
            CaptionStyle::LinkedIn => format!(
                "{base}\n\nSometimes vulnerability creates the most authentic connections. \
                 This completion came from the Unfinished Sentences community, a place where \
                 strangers help finish each other's thoughts.\n\n\
                 #Community #Vulnerability #Connection #Creativity"
            ),
        }
    }
}
