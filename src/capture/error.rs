use thiserror::Error;

/// Failures that end a capture run abnormally
///
/// These are only returned after the run's final status and snapshot
/// were written and the capture lock was released.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("row extractor failed: {0:#}")]
    Extractor(#[source] anyhow::Error),

    #[error("scroll surface failed: {0:#}")]
    Surface(#[source] anyhow::Error),
}
