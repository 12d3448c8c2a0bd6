//! Effect timing and threshold options.

use serde::{Deserialize, Serialize};

use crate::constants::{
    COUNTER_DURATION_MS, LARGE_COUNTER_DURATION_MS, ROOT_MARGIN, TAB_CYCLE_MS,
    THOUSANDS_SEPARATOR, VISIBILITY_THRESHOLD,
};
use crate::error::EffectError;

/// Options for both effects.
///
/// All durations are milliseconds on the frame clock's time base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectOptions {
    /// Counter duration for regular metrics.
    pub counter_duration_ms: f64,
    /// Counter duration for large-number metrics.
    pub large_counter_duration_ms: f64,
    /// Visible fraction that triggers a counter.
    pub visibility_threshold: f64,
    /// Margin (px) grown around the viewport for visibility tests.
    pub root_margin: f64,
    /// Active time per carousel tab.
    pub tab_cycle_ms: f64,
    /// Digit group separator for large numbers.
    pub thousands_separator: char,
}

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            counter_duration_ms: COUNTER_DURATION_MS,
            large_counter_duration_ms: LARGE_COUNTER_DURATION_MS,
            visibility_threshold: VISIBILITY_THRESHOLD,
            root_margin: ROOT_MARGIN,
            tab_cycle_ms: TAB_CYCLE_MS,
            thousands_separator: THOUSANDS_SEPARATOR,
        }
    }
}

impl EffectOptions {
    /// Normalize options, applying defaults where values are zero or not finite.
    /// A threshold above 1 is clamped to full visibility.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if !positive(self.counter_duration_ms) {
            self.counter_duration_ms = COUNTER_DURATION_MS;
        }
        if !positive(self.large_counter_duration_ms) {
            self.large_counter_duration_ms = LARGE_COUNTER_DURATION_MS;
        }
        if !positive(self.visibility_threshold) {
            self.visibility_threshold = VISIBILITY_THRESHOLD;
        } else if self.visibility_threshold > 1.0 {
            self.visibility_threshold = 1.0;
        }
        if !self.root_margin.is_finite() {
            self.root_margin = ROOT_MARGIN;
        }
        if !positive(self.tab_cycle_ms) {
            self.tab_cycle_ms = TAB_CYCLE_MS;
        }
        self
    }

    /// Reject options that normalization cannot repair.
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.visibility_threshold > 1.0 {
            return Err(EffectError::InvalidOptions(format!(
                "visibility_threshold must be in (0, 1], got {}",
                self.visibility_threshold
            )));
        }
        if self.thousands_separator.is_ascii_digit() {
            return Err(EffectError::InvalidOptions(format!(
                "thousands_separator cannot be a digit, got '{}'",
                self.thousands_separator
            )));
        }
        Ok(())
    }

    /// Parse options from JSON, normalizing and validating the result.
    pub fn from_json(json: &str) -> Result<Self, EffectError> {
        let opts: Self =
            serde_json::from_str(json).map_err(|e| EffectError::InvalidOptions(e.to_string()))?;
        opts.validate()?;
        Ok(opts.normalize())
    }

    /// Counter duration for a metric with the given large-number flag.
    #[must_use]
    pub fn counter_duration(&self, is_large: bool) -> f64 {
        if is_large {
            self.large_counter_duration_ms
        } else {
            self.counter_duration_ms
        }
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = EffectOptions::default();
        assert!((opts.counter_duration_ms - 1500.0).abs() < f64::EPSILON);
        assert!((opts.large_counter_duration_ms - 2000.0).abs() < f64::EPSILON);
        assert!((opts.visibility_threshold - 0.5).abs() < f64::EPSILON);
        assert!((opts.tab_cycle_ms - 8000.0).abs() < f64::EPSILON);
        assert_eq!(opts.thousands_separator, ',');
    }

    #[test]
    fn normalize_zero_durations() {
        let opts = EffectOptions {
            counter_duration_ms: 0.0,
            large_counter_duration_ms: -5.0,
            tab_cycle_ms: f64::NAN,
            ..Default::default()
        };
        let normalized = opts.normalize();
        assert_eq!(normalized, EffectOptions::default());
    }

    #[test]
    fn normalize_clamps_threshold_to_full_visibility() {
        let opts = EffectOptions {
            visibility_threshold: 2.0,
            ..Default::default()
        };
        assert!((opts.normalize().visibility_threshold - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn counter_duration_by_flag() {
        let opts = EffectOptions::default();
        assert!((opts.counter_duration(true) - 2000.0).abs() < f64::EPSILON);
        assert!((opts.counter_duration(false) - 1500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let opts = EffectOptions::from_json(r#"{ "tab_cycle_ms": 4000 }"#).unwrap();
        assert!((opts.tab_cycle_ms - 4000.0).abs() < f64::EPSILON);
        assert!((opts.counter_duration_ms - 1500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_json_rejects_threshold_above_one() {
        let err = EffectOptions::from_json(r#"{ "visibility_threshold": 1.5 }"#).unwrap_err();
        assert!(matches!(err, EffectError::InvalidOptions(_)));
    }

    #[test]
    fn from_json_rejects_digit_separator() {
        let err = EffectOptions::from_json(r#"{ "thousands_separator": "7" }"#).unwrap_err();
        assert!(matches!(err, EffectError::InvalidOptions(_)));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(EffectOptions::from_json("not json").is_err());
    }
}
