//! Viewport visibility watching.

use crate::surface::{ElementId, Rect, Surface};

/// Fraction of `target` inside `viewport` grown by `margin`.
///
/// Empty targets are never visible.
#[must_use]
pub fn intersection_ratio(target: Rect, viewport: Rect, margin: f64) -> f64 {
    let area = target.area();
    if area <= 0.0 {
        return 0.0;
    }
    let root = viewport.grow(margin);
    target
        .intersection(&root)
        .map_or(0.0, |i| (i.area() / area).clamp(0.0, 1.0))
}

/// A visibility state change reported by [`VisibilityWatcher::check`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub target: ElementId,
    pub ratio: f64,
    /// Whether the ratio is at or above the watcher's threshold.
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
struct Observed {
    id: ElementId,
    /// Last reported state; `None` until the first check.
    last: Option<bool>,
}

/// Reports elements crossing a visibility threshold.
///
/// Every newly observed element is reported on the first check, and after
/// that only when it crosses the threshold in either direction.
#[derive(Debug, Clone)]
pub struct VisibilityWatcher {
    threshold: f64,
    margin: f64,
    observed: Vec<Observed>,
}

impl VisibilityWatcher {
    #[must_use]
    pub fn new(threshold: f64, margin: f64) -> Self {
        Self {
            threshold,
            margin,
            observed: Vec::new(),
        }
    }

    /// Start watching `id`. Observing twice has no effect.
    pub fn observe(&mut self, id: ElementId) {
        if !self.is_observed(id) {
            self.observed.push(Observed { id, last: None });
        }
    }

    /// Stop watching `id`.
    pub fn unobserve(&mut self, id: ElementId) {
        self.observed.retain(|o| o.id != id);
    }

    #[must_use]
    pub fn is_observed(&self, id: ElementId) -> bool {
        self.observed.iter().any(|o| o.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Measure every observed element against the surface's viewport.
    ///
    /// Elements without layout are treated as invisible.
    pub fn check<S: Surface + ?Sized>(&mut self, surface: &S) -> Vec<VisibilityEntry> {
        let viewport = surface.viewport();
        let mut entries = Vec::new();
        for observed in &mut self.observed {
            let ratio = surface
                .bounding_rect(observed.id)
                .map_or(0.0, |rect| intersection_ratio(rect, viewport, self.margin));
            let is_intersecting = ratio >= self.threshold;
            if observed.last != Some(is_intersecting) {
                observed.last = Some(is_intersecting);
                entries.push(VisibilityEntry {
                    target: observed.id,
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }
}
