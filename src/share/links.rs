//! Outbound share URLs and the shared-quote link format
//!
//! A shared link is `<origin>/shared?start=..&completion=..&mood=..` with
//! form-urlencoded values, plus `&theme=..` when the quote has a theme.
//! [`parse_shared_link`] is its exact inverse.

use std::fmt;

use url::form_urlencoded::{self, Serializer};
use url::Url;

use crate::error::LinkError;
use crate::mood::Mood;
use crate::quote::Quote;

const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";
const LINKEDIN_SHARE: &str = "https://www.linkedin.com/sharing/share-offsite/";

/// Social platforms with a web share endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Twitter,
    Facebook,
    LinkedIn,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Facebook, Platform::LinkedIn];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "twitter" | "x" => Some(Platform::Twitter),
            "facebook" | "fb" => Some(Platform::Facebook),
            "linkedin" => Some(Platform::LinkedIn),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::LinkedIn => "linkedin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn query(pairs: &[(&str, &str)]) -> String {
    let mut serializer = Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Share endpoint URL for a platform
pub fn platform_url(platform: Platform, quote: &Quote, origin: &str, attribution: &str) -> String {
    match platform {
        Platform::Twitter => {
            let text = quote.share_text(attribution);
            format!(
                "{}?{}",
                TWITTER_INTENT,
                query(&[("text", text.as_str()), ("url", origin)])
            )
        }
        Platform::Facebook => {
            let pair = quote.quoted_pair();
            format!(
                "{}?{}",
                FACEBOOK_SHARER,
                query(&[("u", origin), ("quote", pair.as_str())])
            )
        }
        Platform::LinkedIn => {
            let summary = format!(
                "{} - {}",
                quote.quoted_pair(),
                attribution.trim_start_matches(|c: char| !c.is_alphanumeric())
            );
            format!(
                "{}?{}",
                LINKEDIN_SHARE,
                query(&[("url", origin), ("summary", summary.as_str())])
            )
        }
    }
}

fn quote_query(quote: &Quote) -> String {
    let mut pairs = vec![
        ("start", quote.start_text.as_str()),
        ("completion", quote.completion_text.as_str()),
        ("mood", quote.mood.token()),
    ];
    if let Some(theme) = quote.theme.as_deref().filter(|t| !t.is_empty()) {
        pairs.push(("theme", theme));
    }
    query(&pairs)
}

/// Link to the shared-quote page for a quote
pub fn shareable_link(origin: &str, quote: &Quote) -> String {
    format!("{}/shared?{}", origin.trim_end_matches('/'), quote_query(quote))
}

/// Link-preview image URL for a quote
pub fn og_image_url(origin: &str, quote: &Quote) -> String {
    format!("{}/api/og?{}", origin.trim_end_matches('/'), quote_query(quote))
}

/// Recover a quote from a shared link or its bare query string
///
/// `start`, `completion` and `mood` are all required; an empty value counts
/// as missing. Unknown mood tokens fall back to the default mood. `theme` is
/// optional and an empty one is dropped.
pub fn parse_shared_link(input: &str) -> Result<Quote, LinkError> {
    let input = input.trim();
    let pairs: Vec<(String, String)> = if input.starts_with("http://") || input.starts_with("https://") {
        let url = Url::parse(input).map_err(|e| LinkError::InvalidUrl(e.to_string()))?;
        url.query_pairs().into_owned().collect()
    } else {
        let query = input.split_once('?').map_or(input, |(_, q)| q);
        let query = query.split_once('#').map_or(query, |(q, _)| q);
        form_urlencoded::parse(query.as_bytes()).into_owned().collect()
    };

    let find = |key: &str| -> Option<String> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())
    };
    let get = |key: &'static str| find(key).ok_or(LinkError::MissingParam(key));

    let start = get("start")?;
    let completion = get("completion")?;
    let mood = Mood::from_token(&get("mood")?);

    let quote = Quote::new(start, completion, mood);
    Ok(match find("theme") {
        Some(theme) => quote.with_theme(theme),
        None => quote,
    })
}
