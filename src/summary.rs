//! Text rendering of a stored playlist

use crate::model::CapturedPlaylist;
use std::fmt;

/// How many tracks are listed before collapsing the rest
pub const PREVIEW_LIMIT: usize = 20;

/// Display summary of the latest capture
pub struct PlaylistSummary<'a> {
    playlist: Option<&'a CapturedPlaylist>,
    status: Option<&'a str>,
}

impl<'a> PlaylistSummary<'a> {
    pub fn new(playlist: Option<&'a CapturedPlaylist>, status: Option<&'a str>) -> Self {
        Self { playlist, status }
    }
}

impl fmt::Display for PlaylistSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.playlist.filter(|p| !p.is_empty()) {
            None => {
                writeln!(f, "[Waiting] No playlist detected")?;
                writeln!(f, "0 tracks")?;
            }
            Some(playlist) => {
                writeln!(
                    f,
                    "[{}] {}",
                    playlist.platform.display_name(),
                    playlist.playlist_title
                )?;
                writeln!(f, "{} tracks", playlist.len())?;
                if let Some(at) = playlist.captured_at {
                    writeln!(f, "Captured at {}", at.format("%Y-%m-%d %H:%M:%S UTC"))?;
                }

                for (i, track) in playlist.tracks.iter().take(PREVIEW_LIMIT).enumerate() {
                    if track.artists.is_empty() {
                        writeln!(f, "{:>3}. {}", i + 1, track.title)?;
                    } else {
                        writeln!(f, "{:>3}. {} — {}", i + 1, track.title, track.artist_line())?;
                    }
                }
                if playlist.len() > PREVIEW_LIMIT {
                    writeln!(f, "+ {} more…", playlist.len() - PREVIEW_LIMIT)?;
                }
            }
        }

        if let Some(status) = self.status {
            writeln!(f, "Status: {}", status)?;
        }
        Ok(())
    }
}
