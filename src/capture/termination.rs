//! Termination conditions of the capture loop
//!
//! Each guard is evaluated on its own every iteration so that every
//! threshold can be exercised independently.

use super::config::CaptureConfig;
use super::session::CaptureSession;
use std::fmt;
use std::time::Duration;

/// Why a capture run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The bottom was seen and no new rows arrived afterwards
    BottomReached,

    /// Scrolling stopped moving and no new rows arrived
    Stalled,

    /// The wall-clock budget ran out
    TimedOut,

    /// The iteration ceiling was hit
    IterationLimit,

    /// The list never rendered any rows
    NoRowsFound,

    /// The page does not belong to a supported service
    UnsupportedPage,

    /// Another capture was already running; nothing was done
    AlreadyRunning,
}

impl Termination {
    /// Whether the run walked the list to its end
    pub fn is_complete(&self) -> bool {
        matches!(self, Termination::BottomReached | Termination::Stalled)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Termination::BottomReached => "reached bottom",
            Termination::Stalled => "scroll stalled",
            Termination::TimedOut => "max capture duration reached",
            Termination::IterationLimit => "iteration limit reached",
            Termination::NoRowsFound => "no rows found",
            Termination::UnsupportedPage => "unsupported page",
            Termination::AlreadyRunning => "capture already in progress",
        };
        f.write_str(text)
    }
}

/// Guard A: bottom seen at least once and the list stopped growing
pub fn bottom_and_stable(config: &CaptureConfig, session: &CaptureSession) -> bool {
    session.reached_bottom_once()
        && session.no_new_rows_streak >= config.no_new_rows_threshold_at_bottom
}

/// Guard B: scroll offset stuck and no new rows either
pub fn scroll_stalled(config: &CaptureConfig, session: &CaptureSession) -> bool {
    session.stagnant_scroll_streak >= config.stagnant_scroll_threshold
        && session.no_new_rows_streak >= config.no_new_rows_threshold_when_stagnant
}

/// Guard C: wall-clock budget exceeded
pub fn timed_out(config: &CaptureConfig, elapsed: Duration) -> bool {
    elapsed > config.max_duration
}

/// Guard D: iteration ceiling
pub fn iteration_ceiling(config: &CaptureConfig, session: &CaptureSession) -> bool {
    session.iteration >= config.max_iterations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Platform;

    fn session() -> CaptureSession {
        CaptureSession::new(Platform::Spotify, "Mix".to_string())
    }

    #[test]
    fn test_bottom_guard_needs_both_signals() {
        let config = CaptureConfig::default();
        let mut s = session();

        s.note_rows(false);
        assert!(!bottom_and_stable(&config, &s));

        s.note_bottom(true);
        assert!(bottom_and_stable(&config, &s));

        s.note_rows(true);
        assert!(!bottom_and_stable(&config, &s));
    }

    #[test]
    fn test_stall_guard_thresholds_are_independent() {
        let config = CaptureConfig::default();
        let mut s = session();

        for _ in 0..3 {
            s.note_scroll(0.0, 0.0);
        }
        s.note_rows(false);
        assert!(!scroll_stalled(&config, &s), "only one no-new-rows tick");

        s.note_rows(false);
        assert!(scroll_stalled(&config, &s));

        let strict = config.with_stall_thresholds(4, 2);
        assert!(!scroll_stalled(&strict, &s));
    }

    #[test]
    fn test_timeout_guard_is_strict() {
        let config = CaptureConfig::default().with_max_duration(Duration::from_secs(10));
        assert!(!timed_out(&config, Duration::from_secs(10)));
        assert!(timed_out(&config, Duration::from_millis(10_001)));
    }

    #[test]
    fn test_iteration_ceiling() {
        let config = CaptureConfig::default().with_max_iterations(2);
        let mut s = session();
        s.iteration = 1;
        assert!(!iteration_ceiling(&config, &s));
        s.iteration = 2;
        assert!(iteration_ceiling(&config, &s));
    }
}
