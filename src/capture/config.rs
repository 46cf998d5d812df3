//! Capture configuration

use std::time::Duration;

/// Tunables for one capture run
///
/// The thresholds are empirically tuned against real streaming pages and
/// are kept as named defaults rather than derived values.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Hard ceiling on loop iterations
    pub max_iterations: u32,

    /// Pixels requested per scroll advance
    pub scroll_step_pixels: f64,

    /// Pause between iterations, giving the page time to render new rows
    pub inter_iteration_delay: Duration,

    /// Iterations without new rows needed to stop once the bottom was seen
    pub no_new_rows_threshold_at_bottom: u32,

    /// Consecutive scroll advances that left the offset unchanged
    pub stagnant_scroll_threshold: u32,

    /// Iterations without new rows needed to stop when scrolling is stuck
    pub no_new_rows_threshold_when_stagnant: u32,

    /// Wall-clock limit for a whole run
    pub max_duration: Duration,

    /// Distance from the bottom (pixels) still treated as "at bottom"
    pub bottom_proximity_tolerance: f64,

    /// How many times to poll for the first rows before giving up
    pub row_wait_attempts: u32,

    /// Pause between row polls
    pub row_wait_interval: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            scroll_step_pixels: 350.0,
            inter_iteration_delay: Duration::from_millis(1500),
            no_new_rows_threshold_at_bottom: 1,
            stagnant_scroll_threshold: 3,
            no_new_rows_threshold_when_stagnant: 2,
            max_duration: Duration::from_secs(5 * 60),
            bottom_proximity_tolerance: 2.0,
            row_wait_attempts: 12,
            row_wait_interval: Duration::from_millis(500),
        }
    }
}

impl CaptureConfig {
    /// Create a configuration with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_scroll_step(mut self, pixels: f64) -> Self {
        self.scroll_step_pixels = pixels;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inter_iteration_delay = delay;
        self
    }

    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// Set both stall thresholds at once
    pub fn with_stall_thresholds(mut self, stagnant_scrolls: u32, no_new_rows: u32) -> Self {
        self.stagnant_scroll_threshold = stagnant_scrolls;
        self.no_new_rows_threshold_when_stagnant = no_new_rows;
        self
    }

    pub fn with_bottom_threshold(mut self, no_new_rows: u32) -> Self {
        self.no_new_rows_threshold_at_bottom = no_new_rows;
        self
    }

    pub fn with_bottom_tolerance(mut self, pixels: f64) -> Self {
        self.bottom_proximity_tolerance = pixels;
        self
    }

    /// Set the bounded retry used while waiting for the first rows
    pub fn with_row_wait(mut self, attempts: u32, interval: Duration) -> Self {
        self.row_wait_attempts = attempts;
        self.row_wait_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CaptureConfig::default();
        assert_eq!(config.max_iterations, 200);
        assert_eq!(config.scroll_step_pixels, 350.0);
        assert_eq!(config.inter_iteration_delay, Duration::from_millis(1500));
        assert_eq!(config.no_new_rows_threshold_at_bottom, 1);
        assert_eq!(config.stagnant_scroll_threshold, 3);
        assert_eq!(config.no_new_rows_threshold_when_stagnant, 2);
        assert_eq!(config.max_duration, Duration::from_secs(300));
        assert_eq!(config.bottom_proximity_tolerance, 2.0);
        assert_eq!(config.row_wait_attempts, 12);
        assert_eq!(config.row_wait_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_builders_override_single_values() {
        let config = CaptureConfig::new()
            .with_max_iterations(5)
            .with_stall_thresholds(4, 3);

        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.stagnant_scroll_threshold, 4);
        assert_eq!(config.no_new_rows_threshold_when_stagnant, 3);
        assert_eq!(config.scroll_step_pixels, 350.0);
    }
}
