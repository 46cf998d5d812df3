//! Playlist Capture - scroll-driven playlist scraping
//!
//! This library captures the complete track list of a playlist page on a
//! streaming service by walking its lazily-rendered list, and persists
//! the result as a single snapshot.

pub mod capture;
pub mod extract;
pub mod model;
pub mod store;
pub mod summary;

pub use capture::{CaptureConfig, CaptureEngine, CaptureReport, CaptureRequest};
pub use store::{SnapshotStore, StoreSink};
