//! Progress and easing curves.

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
///
/// A non-positive duration counts as already complete.
///
/// # Example
/// ```
/// use pagefx_core::easing::raw_progress;
///
/// assert_eq!(raw_progress(750.0, 1500.0), 0.5);
/// assert_eq!(raw_progress(9000.0, 1500.0), 1.0);
/// assert_eq!(raw_progress(-10.0, 1500.0), 0.0);
/// ```
#[must_use]
pub fn raw_progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    let t = elapsed / duration;
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}

/// Exponential ease-out: fast start, smooth deceleration into 1.
///
/// Exactly `1.0` at `t == 1.0`; otherwise `1 - 2^(-10 t)`.
#[inline]
#[must_use]
pub fn ease_out_expo(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}
