//! Incremental list capture loop
//!
//! Walks a lazily-rendered list by repeatedly sampling the rendered rows,
//! deduplicating them by title and scrolling further down until one of
//! the termination guards fires.

use super::config::CaptureConfig;
use super::error::CaptureError;
use super::lock::CaptureLock;
use super::session::CaptureSession;
use super::termination::{self, Termination};
use super::traits::{NullSink, ProgressSink, RowExtractor, ScrollSurface};
use crate::model::{CapturedPlaylist, Platform, Track};
use chrono::Utc;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

pub const STATUS_CAPTURING: &str = "Capturing playlist...";
pub const STATUS_NO_ROWS: &str = "No rows found. Stopping.";
pub const STATUS_UNSUPPORTED: &str = "Unsupported page. Stopping.";

/// Status text written when a run finishes
pub fn completion_status(count: usize) -> String {
    format!("Capture complete. {} songs saved.", count)
}

/// What to capture
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// `None` when the page is not on a supported service
    pub platform: Option<Platform>,

    pub playlist_title: String,
}

impl CaptureRequest {
    pub fn new(platform: Platform, playlist_title: impl Into<String>) -> Self {
        Self {
            platform: Some(platform),
            playlist_title: playlist_title.into(),
        }
    }

    /// Build a request from the page URL, detecting the platform
    pub fn for_url(url: &str, playlist_title: impl Into<String>) -> Self {
        Self {
            platform: Platform::detect(url),
            playlist_title: playlist_title.into(),
        }
    }
}

/// Result of one capture call
#[derive(Debug, Clone)]
pub struct CaptureReport {
    /// Deduplicated tracks in first-seen order
    pub tracks: Vec<Track>,

    pub termination: Termination,

    /// Loop iterations executed
    pub iterations: u32,

    pub reached_bottom: bool,
}

impl CaptureReport {
    fn empty(termination: Termination) -> Self {
        Self {
            tracks: Vec::new(),
            termination,
            iterations: 0,
            reached_bottom: false,
        }
    }
}

/// Drives capture sessions, one at a time
pub struct CaptureEngine {
    config: CaptureConfig,
    lock: CaptureLock,
}

impl CaptureEngine {
    /// Create an engine guarded by the process-wide capture lock
    pub fn new(config: CaptureConfig) -> Self {
        Self::with_lock(config, CaptureLock::process())
    }

    /// Create an engine guarded by a specific lock
    pub fn with_lock(config: CaptureConfig, lock: CaptureLock) -> Self {
        Self { config, lock }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn lock(&self) -> &CaptureLock {
        &self.lock
    }

    /// Capture the full list behind `extractor` and `surface`.
    ///
    /// Returns immediately with [`Termination::AlreadyRunning`] and no
    /// tracks if another session holds the lock. On every other path the
    /// final status (and, once rows were seen, the final snapshot) is
    /// reported before the lock is released, including when a
    /// collaborator fails partway and an error is returned. A panic in a
    /// collaborator gets the same final writes and is then resumed.
    pub async fn capture<E, S>(
        &self,
        request: &CaptureRequest,
        extractor: &E,
        surface: &S,
        sink: Option<&dyn ProgressSink>,
    ) -> Result<CaptureReport, CaptureError>
    where
        E: RowExtractor,
        S: ScrollSurface,
    {
        let Some(permit) = self.lock.try_acquire() else {
            log::info!("Capture already in progress. Ignoring duplicate request.");
            return Ok(CaptureReport::empty(Termination::AlreadyRunning));
        };

        let sink = sink.unwrap_or(&NullSink);
        report_status(sink, STATUS_CAPTURING).await;

        let Some(platform) = request.platform else {
            log::info!("Unknown platform, stopping");
            report_status(sink, STATUS_UNSUPPORTED).await;
            drop(permit);
            return Ok(CaptureReport::empty(Termination::UnsupportedPage));
        };

        log::info!(
            "Starting capture for {} playlist {:?}",
            platform,
            request.playlist_title
        );

        let mut session = CaptureSession::new(platform, request.playlist_title.clone());
        let outcome = AssertUnwindSafe(self.run(&mut session, extractor, surface, sink))
            .catch_unwind()
            .await;

        match &outcome {
            Ok(Ok(Termination::NoRowsFound)) => {
                report_status(sink, STATUS_NO_ROWS).await;
            }
            _ => {
                let snapshot = session.snapshot().captured_at(Utc::now());
                report_snapshot(sink, &snapshot).await;
                report_status(sink, &completion_status(session.track_count())).await;
            }
        }
        drop(permit);

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(panic) => {
                log::warn!(
                    "Capture panicked after {} iterations with {} tracks",
                    session.iteration,
                    session.track_count()
                );
                std::panic::resume_unwind(panic);
            }
        };

        match &outcome {
            Ok(termination) => log::info!(
                "Capture finished ({}): {} tracks after {} iterations",
                termination,
                session.track_count(),
                session.iteration
            ),
            Err(e) => log::warn!(
                "Capture aborted after {} iterations with {} tracks: {}",
                session.iteration,
                session.track_count(),
                e
            ),
        }

        let termination = outcome?;
        Ok(CaptureReport {
            iterations: session.iteration,
            reached_bottom: session.reached_bottom_once(),
            tracks: session.into_tracks(),
            termination,
        })
    }

    /// Loop body; every early exit returns here so `capture` can clean up
    async fn run<E, S>(
        &self,
        session: &mut CaptureSession,
        extractor: &E,
        surface: &S,
        sink: &dyn ProgressSink,
    ) -> Result<Termination, CaptureError>
    where
        E: RowExtractor,
        S: ScrollSurface,
    {
        if !self.wait_for_rows(extractor).await? {
            log::info!("No rows found. Stopping.");
            return Ok(Termination::NoRowsFound);
        }

        while session.iteration < self.config.max_iterations {
            session.iteration += 1;

            let rows = extractor.list_rows().map_err(CaptureError::Extractor)?;
            log::debug!("Iteration {} - found {} rows", session.iteration, rows.len());

            let mut found_new = false;
            for row in &rows {
                let fields = extractor.extract_fields(row);
                match Track::from_raw(fields.title.as_deref(), &fields.artists) {
                    Some(track) => found_new |= session.record(track),
                    None => log::debug!("Skipped row: no title found"),
                }
            }
            session.note_rows(found_new);
            log::debug!(
                "Total unique tracks: {} (no-new streak {})",
                session.track_count(),
                session.no_new_rows_streak
            );

            // Once the bottom was seen only the final write may touch the snapshot
            if !session.reached_bottom_once() {
                report_snapshot(sink, &session.snapshot()).await;
            }

            let offset = surface.offset().map_err(CaptureError::Surface)?;
            let content_height = surface.content_height().map_err(CaptureError::Surface)?;
            let viewport_height = surface.viewport_height().map_err(CaptureError::Surface)?;
            let remaining = content_height - (offset + viewport_height);
            session.note_bottom(remaining <= self.config.bottom_proximity_tolerance);

            if termination::bottom_and_stable(&self.config, session) {
                log::info!("Reached bottom. Stopping capture now.");
                return Ok(Termination::BottomReached);
            }

            surface
                .set_offset(offset + self.config.scroll_step_pixels)
                .map_err(CaptureError::Surface)?;
            let new_offset = surface.offset().map_err(CaptureError::Surface)?;
            session.note_scroll(offset, new_offset);
            log::debug!("Scrolling... offset: {} remaining: {}", new_offset, remaining);

            if termination::scroll_stalled(&self.config, session) {
                log::info!("Scroll stalled. Stopping.");
                return Ok(Termination::Stalled);
            }

            if termination::timed_out(&self.config, session.started_at.elapsed()) {
                log::info!("Max capture duration reached. Stopping.");
                return Ok(Termination::TimedOut);
            }

            if termination::iteration_ceiling(&self.config, session) {
                break;
            }

            tokio::time::sleep(self.config.inter_iteration_delay).await;
        }

        log::info!("Iteration limit of {} reached. Stopping.", self.config.max_iterations);
        Ok(Termination::IterationLimit)
    }

    /// Poll for the first rows with a bounded retry
    async fn wait_for_rows<E: RowExtractor>(&self, extractor: &E) -> Result<bool, CaptureError> {
        for attempt in 0..self.config.row_wait_attempts {
            if !extractor.list_rows().map_err(CaptureError::Extractor)?.is_empty() {
                return Ok(true);
            }
            log::debug!("No rows yet (attempt {})", attempt + 1);
            tokio::time::sleep(self.config.row_wait_interval).await;
        }

        Ok(!extractor.list_rows().map_err(CaptureError::Extractor)?.is_empty())
    }
}

async fn report_status(sink: &dyn ProgressSink, text: &str) {
    if let Err(e) = sink.report_status(text).await {
        log::warn!("Status update error: {:#}", e);
    }
}

async fn report_snapshot(sink: &dyn ProgressSink, snapshot: &CapturedPlaylist) {
    if let Err(e) = sink.report_snapshot(snapshot).await {
        log::warn!("Snapshot write error: {:#}", e);
    }
}
