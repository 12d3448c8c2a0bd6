//! Frame time sources.
//!
//! Timestamps are milliseconds since an arbitrary origin, like a browser's
//! high-resolution frame time.

use std::cell::Cell;
use std::time::Instant;

/// Source of the current frame time.
pub trait FrameClock {
    /// Current time in milliseconds.
    fn now(&self) -> f64;
}

/// Wall clock measured from its creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to.
///
/// # Example
/// ```
/// use pagefx_core::clock::{FrameClock, ManualClock};
///
/// let clock = ManualClock::new(0.0);
/// clock.advance(16.0);
/// assert_eq!(clock.now(), 16.0);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move time forward by `ms` (negative values are ignored).
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.now.set(self.now.get() + ms);
        }
    }

    /// Jump to `t` if it is not in the past.
    pub fn set(&self, t: f64) {
        if t >= self.now.get() {
            self.now.set(t);
        }
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

impl<C: FrameClock + ?Sized> FrameClock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

impl<C: FrameClock + ?Sized> FrameClock for std::rc::Rc<C> {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_monotonic() {
        let clock = ManualClock::new(100.0);
        clock.advance(-50.0);
        clock.set(10.0);
        assert!((clock.now() - 100.0).abs() < f64::EPSILON);
        clock.set(250.0);
        assert!((clock.now() - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock::new();
        let a = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(clock.now() > a);
    }

    #[test]
    fn shared_clock_through_rc() {
        let clock = std::rc::Rc::new(ManualClock::new(0.0));
        let view = std::rc::Rc::clone(&clock);
        clock.advance(8.0);
        assert!((view.now() - 8.0).abs() < f64::EPSILON);
    }
}
