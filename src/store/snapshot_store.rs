//! Key-value snapshot storage on disk

use crate::model::CapturedPlaylist;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const LATEST_PLAYLIST_KEY: &str = "latest_playlist.json";
const LAST_STATUS_KEY: &str = "last_status.json";

/// Directory holding the latest captured playlist and the last status text
///
/// Each key is a separate JSON file replaced atomically on write, so a
/// reader sees either the old or the new value, never a partial one.
/// There is no history: every write overwrites the key in place.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create store directory: {:?}", root))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn save_playlist(&self, playlist: &CapturedPlaylist) -> Result<()> {
        log::debug!(
            "Saving {} playlist {:?} ({} tracks)",
            playlist.platform,
            playlist.playlist_title,
            playlist.len()
        );
        self.write_key(LATEST_PLAYLIST_KEY, playlist)
    }

    /// Latest playlist, or `None` if nothing was captured yet
    pub fn load_playlist(&self) -> Result<Option<CapturedPlaylist>> {
        self.read_key(LATEST_PLAYLIST_KEY)
    }

    /// Forget the latest playlist. Clearing an empty store is not an error.
    pub fn clear_playlist(&self) -> Result<()> {
        let path = self.root.join(LATEST_PLAYLIST_KEY);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
        }
    }

    pub fn save_status(&self, text: &str) -> Result<()> {
        self.write_key(LAST_STATUS_KEY, &text)
    }

    pub fn load_status(&self) -> Result<Option<String>> {
        self.read_key(LAST_STATUS_KEY)
    }

    fn write_key<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.root.join(key);
        let json = serde_json::to_vec_pretty(value)
            .with_context(|| format!("Failed to serialize {}", key))?;

        let mut tmp = NamedTempFile::new_in(&self.root)
            .with_context(|| format!("Failed to create temp file in {:?}", self.root))?;
        tmp.write_all(&json)
            .with_context(|| format!("Failed to write {}", key))?;
        tmp.persist(&path)
            .with_context(|| format!("Failed to replace {:?}", path))?;
        Ok(())
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.root.join(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {:?}", path)),
        };
        let value = serde_json::from_slice(&bytes)
            .with_context(|| format!("Corrupt snapshot key {:?}", path))?;
        Ok(Some(value))
    }
}
