//! Scroll-driven capture of lazily-rendered track lists
//!
//! The engine is polymorphic over the page it reads from: a
//! [`RowExtractor`] yields the rendered rows, a [`ScrollSurface`] moves
//! the list and a [`ProgressSink`] receives status text and snapshots.

pub mod config;
pub mod engine;
mod error;
mod lock;
mod session;
pub mod termination;
mod traits;

pub use config::CaptureConfig;
pub use engine::{CaptureEngine, CaptureReport, CaptureRequest};
pub use error::CaptureError;
pub use lock::{CaptureLock, CapturePermit};
pub use session::CaptureSession;
pub use termination::Termination;
pub use traits::{ExtractedRow, NullSink, ProgressSink, RowExtractor, ScrollSurface};
