use super::Track;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Streaming service a playlist page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Spotify,
    #[serde(rename = "youtube-music")]
    YouTubeMusic,
    AppleMusic,
}

impl Platform {
    /// Detect the platform from a page URL
    ///
    /// Matching is done on the host, so paths and query strings never
    /// influence the result.
    pub fn detect(url: &str) -> Option<Self> {
        let host = url
            .split("://")
            .nth(1)
            .unwrap_or(url)
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();

        if host.contains("open.spotify.com") {
            Some(Platform::Spotify)
        } else if host.contains("music.youtube.com") {
            Some(Platform::YouTubeMusic)
        } else if host.contains("music.apple.com") {
            Some(Platform::AppleMusic)
        } else {
            None
        }
    }

    /// Whether a page URL belongs to one of the supported services
    pub fn is_supported_url(url: &str) -> bool {
        Self::detect(url).is_some()
    }

    /// Identifier used in persisted snapshots and fingerprints
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Spotify => "spotify",
            Platform::YouTubeMusic => "youtube-music",
            Platform::AppleMusic => "apple-music",
        }
    }

    /// Human-readable service name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Spotify => "Spotify",
            Platform::YouTubeMusic => "YouTube Music",
            Platform::AppleMusic => "Apple Music",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a captured playlist
///
/// This is the record persisted under the "latest captured playlist" key.
/// Incremental snapshots carry no `captured_at`; the final one does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedPlaylist {
    pub platform: Platform,

    pub playlist_title: String,

    /// Tracks in first-seen order
    pub tracks: Vec<Track>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl CapturedPlaylist {
    /// Create a snapshot without a capture timestamp
    pub fn new(platform: Platform, playlist_title: String, tracks: Vec<Track>) -> Self {
        Self {
            platform,
            playlist_title,
            tracks,
            captured_at: None,
        }
    }

    /// Stamp the snapshot with a capture time
    pub fn captured_at(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = Some(at);
        self
    }

    /// Number of tracks in this snapshot
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_platform() {
        assert_eq!(
            Platform::detect("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"),
            Some(Platform::Spotify)
        );
        assert_eq!(
            Platform::detect("https://music.youtube.com/playlist?list=PL123"),
            Some(Platform::YouTubeMusic)
        );
        assert_eq!(
            Platform::detect("https://music.apple.com/us/playlist/today/pl.f4d1"),
            Some(Platform::AppleMusic)
        );
        assert_eq!(Platform::detect("https://example.com/?q=open.spotify.com"), None);
        assert!(!Platform::is_supported_url("https://www.youtube.com/watch?v=x"));
    }

    #[test]
    fn test_snapshot_json_layout() {
        let playlist = CapturedPlaylist::new(
            Platform::YouTubeMusic,
            "Road Trip".to_string(),
            vec![Track {
                title: "Song".to_string(),
                artists: vec!["Band".to_string()],
            }],
        );

        let json = serde_json::to_value(&playlist).unwrap();
        assert_eq!(json["platform"], "youtube-music");
        assert_eq!(json["playlistTitle"], "Road Trip");
        assert_eq!(json["tracks"][0]["title"], "Song");
        assert_eq!(json["tracks"][0]["artists"][0], "Band");
        assert!(json.get("capturedAt").is_none());
    }
}
