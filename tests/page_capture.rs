use playlist_capture::capture::{CaptureLock, Termination};
use playlist_capture::extract::{ListGeometry, PageDocument, VirtualList};
use playlist_capture::model::Platform;
use playlist_capture::{CaptureConfig, CaptureEngine, CaptureRequest, SnapshotStore, StoreSink};
use std::time::Duration;
use tempfile::TempDir;

/// Build a saved Spotify playlist page with `count` rows
fn spotify_page(count: usize) -> String {
    let mut html = String::from(
        r#"<html><body><h1 data-testid="entityTitle">Sunday Morning</h1><div data-testid="playlist-tracklist">"#,
    );
    for i in 0..count {
        html.push_str(&format!(
            r#"<div data-testid="tracklist-row"><a href="/track/{i}">Track {i}</a><a href="/artist/{i}">Artist {i}</a></div>"#,
        ));
    }
    html.push_str("</div></body></html>");
    html
}

/// Engine with its own lock so parallel tests do not reject each other
fn engine(config: CaptureConfig) -> CaptureEngine {
    CaptureEngine::with_lock(config, CaptureLock::new())
}

fn fast_config() -> CaptureConfig {
    CaptureConfig::default()
        .with_delay(Duration::from_millis(1))
        .with_row_wait(3, Duration::from_millis(1))
}

#[tokio::test]
async fn test_capture_saved_page_into_store() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SnapshotStore::open(dir.path().to_path_buf()).unwrap();
    let sink = StoreSink::new(store.clone());

    let document = PageDocument::parse(Platform::Spotify, &spotify_page(60)).unwrap();
    let list = VirtualList::from_document(&document, ListGeometry::default());
    let request = CaptureRequest::new(document.platform, document.playlist_title.clone());
    let engine = engine(fast_config());

    let report = engine.capture(&request, &list, &list, Some(&sink)).await.unwrap();

    assert_eq!(report.termination, Termination::BottomReached);
    assert_eq!(report.tracks.len(), 60);
    assert_eq!(report.tracks[0].title, "Track 0");
    assert_eq!(report.tracks[59].title, "Track 59");
    assert_eq!(report.tracks[59].artists, vec!["Artist 59"]);

    let saved = store.load_playlist().unwrap().expect("snapshot saved");
    assert_eq!(saved.platform, Platform::Spotify);
    assert_eq!(saved.playlist_title, "Sunday Morning");
    assert_eq!(saved.tracks, report.tracks);
    assert!(saved.captured_at.is_some());
    assert_eq!(
        store.load_status().unwrap().as_deref(),
        Some("Capture complete. 60 songs saved.")
    );
}

#[tokio::test]
async fn test_empty_page_keeps_previous_snapshot() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = SnapshotStore::open(dir.path().to_path_buf()).unwrap();

    let previous = PageDocument::parse(Platform::Spotify, &spotify_page(3))
        .unwrap()
        .scrape_visible();
    store.save_playlist(&previous).unwrap();

    let document = PageDocument::parse(Platform::Spotify, &spotify_page(0)).unwrap();
    let list = VirtualList::from_document(&document, ListGeometry::default());
    let engine = engine(fast_config());
    let sink = StoreSink::new(store.clone());

    let report = engine
        .capture(
            &CaptureRequest::new(Platform::Spotify, "Empty"),
            &list,
            &list,
            Some(&sink),
        )
        .await
        .unwrap();

    assert_eq!(report.termination, Termination::NoRowsFound);
    assert_eq!(store.load_playlist().unwrap(), Some(previous));
    assert_eq!(
        store.load_status().unwrap().as_deref(),
        Some("No rows found. Stopping.")
    );
}
