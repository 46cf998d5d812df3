use serde::{Deserialize, Serialize};

/// A single captured track as it appeared in the source list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title, trimmed and non-empty. Also the dedup key.
    pub title: String,

    /// Artist names in display order (possibly empty)
    #[serde(default)]
    pub artists: Vec<String>,
}

impl Track {
    /// Build a track from raw extracted text.
    ///
    /// Returns `None` when the title is missing or blank after trimming.
    /// Artist names are trimmed and blank entries dropped.
    pub fn from_raw(title: Option<&str>, artists: &[String]) -> Option<Self> {
        let title = title.map(str::trim).filter(|t| !t.is_empty())?;

        let artists = artists
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();

        Some(Self {
            title: title.to_string(),
            artists,
        })
    }

    /// Key used to decide whether a row was already recorded
    pub fn dedup_key(&self) -> &str {
        &self.title
    }

    /// Artists joined for display
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_trims_title_and_artists() {
        let artists = vec!["  Daft Punk ".to_string(), "".to_string(), "Pharrell".to_string()];
        let track = Track::from_raw(Some("  Get Lucky\n"), &artists).unwrap();

        assert_eq!(track.title, "Get Lucky");
        assert_eq!(track.artists, vec!["Daft Punk", "Pharrell"]);
        assert_eq!(track.dedup_key(), "Get Lucky");
        assert_eq!(track.artist_line(), "Daft Punk, Pharrell");
    }

    #[test]
    fn test_from_raw_rejects_blank_title() {
        assert!(Track::from_raw(None, &[]).is_none());
        assert!(Track::from_raw(Some("   "), &[]).is_none());
    }

    #[test]
    fn test_dedup_key_is_case_sensitive() {
        let a = Track::from_raw(Some("Intro"), &[]).unwrap();
        let b = Track::from_raw(Some("intro"), &[]).unwrap();
        assert_ne!(a.dedup_key(), b.dedup_key());
    }
}
