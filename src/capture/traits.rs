//! Capabilities the capture engine is driven through

use crate::model::CapturedPlaylist;
use anyhow::Result;
use async_trait::async_trait;

/// Fields read from one rendered row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRow {
    /// `None` when no title strategy matched
    pub title: Option<String>,

    pub artists: Vec<String>,
}

impl ExtractedRow {
    pub fn new(title: impl Into<String>, artists: Vec<String>) -> Self {
        Self {
            title: Some(title.into()),
            artists,
        }
    }
}

/// Platform-specific access to the rows currently rendered in a list
///
/// Methods take `&self`: the extractor and the [`ScrollSurface`] usually
/// view the same live container, so one value may implement both.
pub trait RowExtractor {
    /// Opaque handle to one rendered row
    type Row;

    /// Query the rows rendered right now. Never cached between calls.
    fn list_rows(&self) -> Result<Vec<Self::Row>>;

    /// Read title and artists from a row
    fn extract_fields(&self, row: &Self::Row) -> ExtractedRow;
}

/// Scroll state of the list container
///
/// `set_offset` is a request; callers must re-read `offset` to learn
/// where the container actually ended up.
pub trait ScrollSurface {
    fn offset(&self) -> Result<f64>;

    fn content_height(&self) -> Result<f64>;

    fn viewport_height(&self) -> Result<f64>;

    fn set_offset(&self, offset: f64) -> Result<()>;
}

/// Destination for progress text and intermediate snapshots
///
/// Both writes are best effort; the engine logs failures and carries on.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn report_status(&self, text: &str) -> Result<()>;

    async fn report_snapshot(&self, snapshot: &CapturedPlaylist) -> Result<()>;
}

/// Sink that drops everything, used when no sink is supplied
pub struct NullSink;

#[async_trait]
impl ProgressSink for NullSink {
    async fn report_status(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn report_snapshot(&self, _snapshot: &CapturedPlaylist) -> Result<()> {
        Ok(())
    }
}
