//! Daily writing themes
//!
//! One theme is featured per day, chosen by day of year.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::mood::Mood;
use crate::quote::Quote;

/// A featured theme with its prompt and sample sentence starters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTheme {
    pub title: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
    pub examples: [&'static str; 3],
}

impl DailyTheme {
    /// Example starters as blank quotes tagged with this theme
    pub fn suggestions(&self) -> Vec<Quote> {
        self.examples
            .iter()
            .map(|start| Quote::new(*start, "", Mood::Hopeful).with_theme(self.title))
            .collect()
    }
}

pub const DAILY_THEMES: [DailyTheme; 7] = [
    DailyTheme {
        title: "Messages to Lost Connections",
        description: "Write to someone who disappeared from your life",
        prompt: "Start a sentence for someone you lost touch with...",
        examples: [
            "I hope you're happy wherever...",
            "I still wonder if you remember...",
            "That day you left, I...",
        ],
    },
    DailyTheme {
        title: "Letters to Your Younger Self",
        description: "Share wisdom with who you used to be",
        prompt: "What would you tell your younger self?",
        examples: [
            "Dear younger me, you don't need to...",
            "I wish I could tell you that...",
            "The thing I learned too late was...",
        ],
    },
    DailyTheme {
        title: "Unspoken Gratitude",
        description: "Express appreciation you never shared",
        prompt: "Thank someone you never properly thanked...",
        examples: [
            "I never thanked you for...",
            "Your kindness when I...",
            "You'll never know how much...",
        ],
    },
    DailyTheme {
        title: "Dreams and Hopes",
        description: "Share your deepest aspirations",
        prompt: "Express a dream you've kept secret...",
        examples: [
            "Someday I want to...",
            "My biggest dream is to...",
            "If I wasn't afraid, I would...",
        ],
    },
    DailyTheme {
        title: "Moments in Time",
        description: "Capture a fleeting moment you treasure",
        prompt: "Describe a moment you want to preserve forever...",
        examples: [
            "There was this moment when...",
            "I want to remember how...",
            "Time stopped when you...",
        ],
    },
    DailyTheme {
        title: "Forgiveness and Healing",
        description: "Release what you've been carrying",
        prompt: "Let go of something that's been weighing on you...",
        examples: [
            "I forgive myself for...",
            "I'm ready to release...",
            "It's time to let go of...",
        ],
    },
    DailyTheme {
        title: "Love in All Forms",
        description: "Celebrate the love in your life",
        prompt: "Express love you feel but rarely say...",
        examples: [
            "I love how you...",
            "The way you love me by...",
            "Love means to me...",
        ],
    },
];

/// Theme featured on `date`; January 1st is day 1
pub fn todays_theme(date: NaiveDate) -> &'static DailyTheme {
    &DAILY_THEMES[date.ordinal() as usize % DAILY_THEMES.len()]
}

/// Theme featured today in local time
pub fn current_theme() -> &'static DailyTheme {
    todays_theme(Local::now().date_naive())
}

/// Look a theme up by title, ignoring case
pub fn find_theme(title: &str) -> Option<&'static DailyTheme> {
    DAILY_THEMES
        .iter()
        .find(|t| t.title.eq_ignore_ascii_case(title.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_theme_by_day_of_year() {
        assert_eq!(todays_theme(date(2024, 1, 1)).title, "Letters to Your Younger Self");
        assert_eq!(todays_theme(date(2024, 1, 7)).title, "Messages to Lost Connections");
        assert_eq!(todays_theme(date(2025, 1, 6)).title, "Love in All Forms");
        // Day 366 of a leap year
        assert_eq!(todays_theme(date(2024, 12, 31)).title, "Unspoken Gratitude");
    }

    #[test]
    fn test_consecutive_days_cycle_all_themes() {
        let start = date(2026, 3, 1);
        let titles: std::collections::HashSet<&str> = (0..7)
            .map(|i| todays_theme(start + chrono::Days::new(i)).title)
            .collect();
        assert_eq!(titles.len(), DAILY_THEMES.len());
    }

    #[test]
    fn test_suggestions_carry_theme() {
        let theme = &DAILY_THEMES[3];
        let quotes = theme.suggestions();
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].start_text, "Someday I want to...");
        assert!(quotes.iter().all(|q| q.theme.as_deref() == Some("Dreams and Hopes")));
    }

    #[test]
    fn test_find_theme() {
        assert_eq!(find_theme("moments in time"), Some(&DAILY_THEMES[4]));
        assert_eq!(find_theme("Nope"), None);
    }
}
