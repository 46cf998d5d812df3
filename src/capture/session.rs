//! Per-run capture state

use crate::model::{CapturedPlaylist, Platform, Track};
use std::collections::HashSet;
use tokio::time::Instant;

/// Mutable state of one capture run
///
/// Only the capture loop touches this; it is discarded once the final
/// snapshot has been reported.
#[derive(Debug)]
pub struct CaptureSession {
    pub platform: Platform,
    pub playlist_title: String,
    tracks: Vec<Track>,
    seen_keys: HashSet<String>,
    pub iteration: u32,
    pub no_new_rows_streak: u32,
    pub stagnant_scroll_streak: u32,
    reached_bottom_once: bool,
    pub started_at: Instant,
}

impl CaptureSession {
    pub fn new(platform: Platform, playlist_title: String) -> Self {
        Self {
            platform,
            playlist_title,
            tracks: Vec::new(),
            seen_keys: HashSet::new(),
            iteration: 0,
            no_new_rows_streak: 0,
            stagnant_scroll_streak: 0,
            reached_bottom_once: false,
            started_at: Instant::now(),
        }
    }

    /// Record a track unless its key was already seen.
    ///
    /// Returns true when the track was new.
    pub fn record(&mut self, track: Track) -> bool {
        if self.seen_keys.contains(track.dedup_key()) {
            return false;
        }
        self.seen_keys.insert(track.dedup_key().to_string());
        self.tracks.push(track);
        true
    }

    /// Update the no-new-rows streak after an iteration's rows were processed
    pub fn note_rows(&mut self, found_new: bool) {
        if found_new {
            self.no_new_rows_streak = 0;
        } else {
            self.no_new_rows_streak += 1;
        }
    }

    /// Update the stagnant-scroll streak after a scroll request
    pub fn note_scroll(&mut self, before: f64, after: f64) {
        if after == before {
            self.stagnant_scroll_streak += 1;
        } else {
            self.stagnant_scroll_streak = 0;
        }
    }

    /// Latch the bottom flag. Once set it stays set for the run.
    pub fn note_bottom(&mut self, at_bottom: bool) {
        self.reached_bottom_once |= at_bottom;
    }

    pub fn reached_bottom_once(&self) -> bool {
        self.reached_bottom_once
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Snapshot of everything accumulated so far
    pub fn snapshot(&self) -> CapturedPlaylist {
        CapturedPlaylist::new(self.platform, self.playlist_title.clone(), self.tracks.clone())
    }

    /// Consume the session, yielding the accumulated tracks
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str) -> Track {
        Track {
            title: title.to_string(),
            artists: Vec::new(),
        }
    }

    #[test]
    fn test_record_keeps_first_seen_order() {
        let mut session = CaptureSession::new(Platform::Spotify, "Mix".to_string());

        assert!(session.record(track("B")));
        assert!(session.record(track("A")));
        assert!(!session.record(track("B")));
        assert!(session.record(track("C")));

        let titles: Vec<_> = session.tracks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_bottom_flag_is_monotonic() {
        let mut session = CaptureSession::new(Platform::Spotify, "Mix".to_string());

        session.note_bottom(false);
        assert!(!session.reached_bottom_once());
        session.note_bottom(true);
        session.note_bottom(false);
        assert!(session.reached_bottom_once());
    }

    #[test]
    fn test_streaks() {
        let mut session = CaptureSession::new(Platform::AppleMusic, "Mix".to_string());

        session.note_rows(false);
        session.note_rows(false);
        assert_eq!(session.no_new_rows_streak, 2);
        session.note_rows(true);
        assert_eq!(session.no_new_rows_streak, 0);

        session.note_scroll(100.0, 100.0);
        session.note_scroll(100.0, 100.0);
        assert_eq!(session.stagnant_scroll_streak, 2);
        session.note_scroll(100.0, 450.0);
        assert_eq!(session.stagnant_scroll_streak, 0);
    }
}
