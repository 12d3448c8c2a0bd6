//! Constants for effect timings, thresholds and the markup contract.

/// Counter animation duration (ms) for regular metrics.
pub const COUNTER_DURATION_MS: f64 = 1500.0;

/// Counter animation duration (ms) for metrics flagged as large numbers.
pub const LARGE_COUNTER_DURATION_MS: f64 = 2000.0;

/// Fraction of a metric element that must be visible to start its counter.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Margin (px) added around the viewport when testing visibility.
pub const ROOT_MARGIN: f64 = 0.0;

/// Time (ms) each carousel tab stays active before auto-advancing.
pub const TAB_CYCLE_MS: f64 = 8000.0;

/// Default thousands separator for large-number formatting (en-US).
pub const THOUSANDS_SEPARATOR: char = ',';

/// Nominal frame interval (ms) used by simulated frame drivers (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Class names, data attributes and attribute values of the consumed markup.
pub mod markup {
    /// Metric counter elements.
    pub const METRIC_VALUE: &str = "metric-value";
    /// Tab controls.
    pub const TAB_ITEM: &str = "tab-item";
    /// Content panels, index-aligned with the tab controls.
    pub const CONTENT_ITEM: &str = "content-item";
    /// Progress indicators, index-aligned with the tab controls.
    pub const PROGRESS_BAR: &str = "progress-bar";
    /// Optional container that extends the hover-pause region.
    pub const CONTENT_DISPLAY: &str = "content-display";
    /// Caption under a metric value; not consumed by the effects.
    pub const METRIC_LABEL: &str = "metric-label";

    /// Transient class present while a counter runs.
    pub const ANIMATING: &str = "animating";
    /// Class marking the active tab and content panel.
    pub const ACTIVE: &str = "active";

    /// Target value attribute.
    pub const DATA_VALUE: &str = "data-value";
    /// Optional suffix attribute.
    pub const DATA_SUFFIX: &str = "data-suffix";
    /// Optional large-number flag attribute.
    pub const DATA_IS_LARGE: &str = "data-is-large";
    /// Selection state attribute on tab controls.
    pub const ARIA_SELECTED: &str = "aria-selected";
}

/// Exit codes for the `pagefx` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration or page description.
    pub const ERROR_CONFIG: i32 = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_counters_run_longer() {
        assert!(LARGE_COUNTER_DURATION_MS > COUNTER_DURATION_MS);
    }

    #[test]
    fn threshold_is_a_fraction() {
        assert!(VISIBILITY_THRESHOLD > 0.0 && VISIBILITY_THRESHOLD <= 1.0);
    }
}
