//! Data model for captured playlists
//!
//! These types are independent of the page being scraped and of the
//! store the snapshots end up in.

mod playlist;
mod track;

pub use playlist::{CapturedPlaylist, Platform};
pub use track::Track;
