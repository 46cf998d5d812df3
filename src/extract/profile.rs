//! Per-platform selector profiles
//!
//! Streaming pages change markup often, so every field is read through an
//! ordered chain of selectors; the first one that yields text wins.

use crate::model::Platform;
use anyhow::{anyhow, Result};
use scraper::{ElementRef, Selector};

/// Ordered list of CSS selectors tried in sequence
#[derive(Debug, Clone)]
pub struct StrategyChain {
    selectors: Vec<Selector>,
}

impl StrategyChain {
    /// Parse a chain from CSS selector strings
    pub fn parse(css: &[&str]) -> Result<Self> {
        let selectors = css
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// Trimmed text of the first match of the first selector that has
    /// non-empty text
    pub fn first_text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            scope
                .select(selector)
                .next()
                .map(element_text)
                .filter(|text| !text.is_empty())
        })
    }

    /// Trimmed, non-empty texts of all matches of the first selector that
    /// produces any
    pub fn all_texts(&self, scope: ElementRef<'_>) -> Vec<String> {
        for selector in &self.selectors {
            let texts: Vec<String> = scope
                .select(selector)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect();
            if !texts.is_empty() {
                return texts;
            }
        }
        Vec::new()
    }
}

/// Everything needed to read a playlist page of one platform
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    pub platform: Platform,
    pub row_selector: Selector,
    pub title: StrategyChain,
    pub artists: StrategyChain,
    pub playlist_title: StrategyChain,
    pub fallback_playlist_title: String,
}

impl PlatformProfile {
    pub fn for_platform(platform: Platform) -> Result<Self> {
        let profile = match platform {
            Platform::Spotify => Self {
                platform,
                row_selector: parse_selector(
                    r#"[data-testid="tracklist-row"], [data-testid^="tracklist-row"]"#,
                )?,
                title: StrategyChain::parse(&[
                    r#"a[href*="/track/"]"#,
                    r#"[data-testid="internal-track-link"]"#,
                    r#"[data-testid="track-name"]"#,
                    r#"div[aria-colindex="2"] [dir="auto"]"#,
                    r#"div[dir="auto"]"#,
                    r#"[role="gridcell"] a"#,
                    "span",
                ])?,
                artists: StrategyChain::parse(&[
                    r#"a[href*="/artist/"]"#,
                    r#"[data-testid="artist-name"] a"#,
                ])?,
                playlist_title: StrategyChain::parse(&[
                    r#"h1[data-testid="entityTitle"]"#,
                    r#"h1[data-qa="now-playing-header"]"#,
                    "h1",
                ])?,
                fallback_playlist_title: "Spotify playlist".to_string(),
            },
            Platform::YouTubeMusic => Self {
                platform,
                row_selector: parse_selector("ytmusic-responsive-list-item-renderer")?,
                title: StrategyChain::parse(&["yt-formatted-string.title"])?,
                artists: StrategyChain::parse(&["yt-formatted-string.byline a"])?,
                playlist_title: StrategyChain::parse(&["h1.title", "yt-formatted-string.title"])?,
                fallback_playlist_title: "YouTube Music playlist".to_string(),
            },
            Platform::AppleMusic => Self {
                platform,
                row_selector: parse_selector(".songs-list-row")?,
                title: StrategyChain::parse(&[
                    ".songs-list-row__song-name",
                    ".songs-list-row__song-name-wrapper",
                ])?,
                artists: StrategyChain::parse(&[".songs-list-row__by-line a"])?,
                playlist_title: StrategyChain::parse(&[".product-header__title", "h1"])?,
                fallback_playlist_title: "Apple Music playlist".to_string(),
            },
        };
        Ok(profile)
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {:?}: {:?}", css, e))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
