//! Saved playlist pages and one-shot scraping

use super::profile::PlatformProfile;
use crate::capture::ExtractedRow;
use crate::model::{CapturedPlaylist, Platform, Track};
use anyhow::{Context, Result};
use scraper::Html;
use std::fs;
use std::path::Path;

/// Rows and title read from one playlist page
#[derive(Debug, Clone)]
pub struct PageDocument {
    pub platform: Platform,
    pub playlist_title: String,

    /// Every row the page rendered, in document order
    pub rows: Vec<ExtractedRow>,
}

impl PageDocument {
    /// Parse page HTML using the platform's selector profile
    pub fn parse(platform: Platform, html: &str) -> Result<Self> {
        let profile = PlatformProfile::for_platform(platform)?;
        let document = Html::parse_document(html);
        let root = document.root_element();

        let playlist_title = profile
            .playlist_title
            .first_text(root)
            .unwrap_or_else(|| profile.fallback_playlist_title.clone());

        let rows: Vec<ExtractedRow> = root
            .select(&profile.row_selector)
            .map(|row| ExtractedRow {
                title: profile.title.first_text(row),
                artists: profile.artists.all_texts(row),
            })
            .collect();

        log::debug!(
            "Parsed {} page {:?}: {} rows",
            platform,
            playlist_title,
            rows.len()
        );

        Ok(Self {
            platform,
            playlist_title,
            rows,
        })
    }

    /// Load a saved page from disk
    pub fn load(platform: Platform, path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page: {:?}", path))?;
        Self::parse(platform, &html)
    }

    /// Playlist made of the rows currently rendered, without scrolling
    pub fn scrape_visible(&self) -> CapturedPlaylist {
        let tracks = self
            .rows
            .iter()
            .filter_map(|row| {
                let track = Track::from_raw(row.title.as_deref(), &row.artists);
                if track.is_none() {
                    log::debug!("Skipped row: no title found");
                }
                track
            })
            .collect();

        CapturedPlaylist::new(self.platform, self.playlist_title.clone(), tracks)
    }
}

/// Cheap identity of a scrape: platform, count and the first three titles
pub fn fingerprint(playlist: &CapturedPlaylist) -> String {
    let head: Vec<&str> = playlist
        .tracks
        .iter()
        .take(3)
        .map(|t| t.title.as_str())
        .collect();
    format!("{}:{}:{}", playlist.platform, playlist.len(), head.join("|"))
}

/// Suppresses repeated persistence of unchanged scrapes
#[derive(Debug, Default)]
pub struct FingerprintGate {
    last: Option<String>,
}

impl FingerprintGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the scrape should be persisted
    pub fn admit(&mut self, playlist: &CapturedPlaylist) -> bool {
        if playlist.is_empty() {
            return false;
        }
        let print = fingerprint(playlist);
        if self.last.as_deref() == Some(print.as_str()) {
            return false;
        }
        self.last = Some(print);
        true
    }
}
