//! Mood tags and their color schemes
//!
//! Every completion carries one [`Mood`]. The mood decides the card's
//! gradient and badge colors through [`color_scheme_for`], an exhaustive
//! mapping with no lookup failure path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An RGB color
pub type Rgb = (u8, u8, u8);

const fn hex(value: u32) -> Rgb {
    ((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Emotional tag attached to a completed sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[serde(alias = "melancholy")]
    Sad,
    Nostalgic,
    #[default]
    Hopeful,
    Grateful,
    Frustrated,
    Angry,
    Anxious,
    Joyful,
}

impl Mood {
    /// All moods in picker order
    pub const ALL: [Mood; 8] = [
        Mood::Sad,
        Mood::Nostalgic,
        Mood::Hopeful,
        Mood::Grateful,
        Mood::Frustrated,
        Mood::Angry,
        Mood::Anxious,
        Mood::Joyful,
    ];

    /// Lowercase token used in links and storage
    pub fn token(self) -> &'static str {
        match self {
            Mood::Sad => "sad",
            Mood::Nostalgic => "nostalgic",
            Mood::Hopeful => "hopeful",
            Mood::Grateful => "grateful",
            Mood::Frustrated => "frustrated",
            Mood::Angry => "angry",
            Mood::Anxious => "anxious",
            Mood::Joyful => "joyful",
        }
    }

    /// Capitalized label shown on the card badge
    pub fn label(self) -> &'static str {
        match self {
            Mood::Sad => "Sad",
            Mood::Nostalgic => "Nostalgic",
            Mood::Hopeful => "Hopeful",
            Mood::Grateful => "Grateful",
            Mood::Frustrated => "Frustrated",
            Mood::Angry => "Angry",
            Mood::Anxious => "Anxious",
            Mood::Joyful => "Joyful",
        }
    }

    /// Parse a token, falling back to the default mood when unrecognized
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_else(|_| {
            log::debug!("Unknown mood token {:?}, using default", token);
            Mood::default()
        })
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Returned by [`Mood::from_str`] for tokens outside the mood set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood '{0}'")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sad" | "melancholy" => Ok(Mood::Sad),
            "nostalgic" => Ok(Mood::Nostalgic),
            "hopeful" => Ok(Mood::Hopeful),
            "grateful" => Ok(Mood::Grateful),
            "frustrated" => Ok(Mood::Frustrated),
            "angry" => Ok(Mood::Angry),
            "anxious" => Ok(Mood::Anxious),
            "joyful" => Ok(Mood::Joyful),
            _ => Err(UnknownMood(s.to_string())),
        }
    }
}

/// Card colors for one mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Gradient start, badge fill
    pub primary: Rgb,
    /// Gradient end
    pub secondary: Rgb,
    /// Text and badge label color
    pub text: Rgb,
}

const WHITE: Rgb = (255, 255, 255);

const SAD: ColorScheme = ColorScheme {
    primary: hex(0x667eea),
    secondary: hex(0x764ba2),
    text: WHITE,
};
const NOSTALGIC: ColorScheme = ColorScheme {
    primary: hex(0xf093fb),
    secondary: hex(0xf5576c),
    text: WHITE,
};
const HOPEFUL: ColorScheme = ColorScheme {
    primary: hex(0x4facfe),
    secondary: hex(0x00f2fe),
    text: WHITE,
};
const GRATEFUL: ColorScheme = ColorScheme {
    primary: hex(0x43e97b),
    secondary: hex(0x38f9d7),
    text: WHITE,
};
const FRUSTRATED: ColorScheme = ColorScheme {
    primary: hex(0xf6d365),
    secondary: hex(0xfda085),
    text: WHITE,
};
const ANGRY: ColorScheme = ColorScheme {
    primary: hex(0xff416c),
    secondary: hex(0xff4b2b),
    text: WHITE,
};
const ANXIOUS: ColorScheme = ColorScheme {
    primary: hex(0xa18cd1),
    secondary: hex(0xfbc2eb),
    text: WHITE,
};
const JOYFUL: ColorScheme = ColorScheme {
    primary: hex(0xf7971e),
    secondary: hex(0xffd200),
    text: WHITE,
};

/// Color scheme for a mood
pub fn color_scheme_for(mood: Mood) -> ColorScheme {
    match mood {
        Mood::Sad => SAD,
        Mood::Nostalgic => NOSTALGIC,
        Mood::Hopeful => HOPEFUL,
        Mood::Grateful => GRATEFUL,
        Mood::Frustrated => FRUSTRATED,
        Mood::Angry => ANGRY,
        Mood::Anxious => ANXIOUS,
        Mood::Joyful => JOYFUL,
    }
}

/// Color scheme for a raw mood token; unknown tokens get the default scheme
pub fn color_scheme_for_token(token: &str) -> ColorScheme {
    color_scheme_for(Mood::from_token(token))
}

/// Keyword groups checked in order by [`suggest_mood`]
const MOOD_KEYWORDS: &[(Mood, &[&str])] = &[
    (Mood::Grateful, &["thank", "grateful", "appreciate"]),
    (Mood::Hopeful, &["hope", "dream", "future"]),
    (Mood::Nostalgic, &["remember", "used to", "back then"]),
    (Mood::Angry, &["angry", "hate", "furious"]),
    (Mood::Anxious, &["anxious", "worried", "scared", "afraid"]),
    (Mood::Frustrated, &["frustrat", "annoy", "tired of"]),
    (Mood::Joyful, &["happy", "joy", "laugh", "excited"]),
];

/// Suggest a mood for a sentence from simple keyword matching
///
/// First matching group wins. Text with no recognizable keywords is tagged
/// [`Mood::Sad`], the tone most unfinished sentences carry.
pub fn suggest_mood(text: &str) -> Mood {
    let lower = text.to_lowercase();
    MOOD_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(mood, _)| *mood)
        .unwrap_or(Mood::Sad)
}
