//! Hover regions that pause the carousel.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A region whose hover pauses the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HoverRegion {
    /// A tab control, by tab index.
    Tab(usize),
    /// The optional content-display container.
    ContentDisplay,
}

/// Set of currently hovered regions.
///
/// Paused while the set is non-empty, so the order in which overlapping
/// regions report enter and leave does not matter.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    hovered: BTreeSet<HoverRegion>,
}

impl HoverTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `region` hovered. Returns `true` if this pauses a running carousel.
    pub fn enter(&mut self, region: HoverRegion) -> bool {
        let was_paused = self.is_paused();
        self.hovered.insert(region);
        !was_paused
    }

    /// Unmark `region`. Returns `true` if this resumes a paused carousel.
    ///
    /// Leaving a region that was never entered is a no-op.
    pub fn leave(&mut self, region: HoverRegion) -> bool {
        let removed = self.hovered.remove(&region);
        removed && !self.is_paused()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        !self.hovered.is_empty()
    }

    #[must_use]
    pub fn is_hovered(&self, region: HoverRegion) -> bool {
        self.hovered.contains(&region)
    }

    /// Number of regions currently hovered.
    #[must_use]
    pub fn count(&self) -> usize {
        self.hovered.len()
    }

    pub fn clear(&mut self) {
        self.hovered.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_region_pauses_and_resumes() {
        let mut hover = HoverTracker::new();
        assert!(!hover.is_paused());
        assert!(hover.enter(HoverRegion::Tab(0)));
        assert!(hover.is_paused());
        assert!(hover.leave(HoverRegion::Tab(0)));
        assert!(!hover.is_paused());
    }

    #[test]
    fn moving_between_regions_stays_paused() {
        let mut hover = HoverTracker::new();
        hover.enter(HoverRegion::Tab(1));
        // Enter the content before the tab reports its leave.
        assert!(!hover.enter(HoverRegion::ContentDisplay));
        assert!(!hover.leave(HoverRegion::Tab(1)));
        assert!(hover.is_paused());
        assert!(hover.is_hovered(HoverRegion::ContentDisplay));
        assert!(!hover.is_hovered(HoverRegion::Tab(1)));
    }

    #[test]
    fn leaving_the_last_region_resumes() {
        let mut hover = HoverTracker::new();
        hover.enter(HoverRegion::ContentDisplay);
        hover.enter(HoverRegion::Tab(2));
        assert!(!hover.leave(HoverRegion::ContentDisplay));
        assert!(hover.leave(HoverRegion::Tab(2)));
        assert_eq!(hover.count(), 0);
    }

    #[test]
    fn stray_leave_is_ignored() {
        let mut hover = HoverTracker::new();
        assert!(!hover.leave(HoverRegion::ContentDisplay));
        hover.enter(HoverRegion::Tab(0));
        assert!(!hover.leave(HoverRegion::Tab(3)));
        assert!(hover.is_paused());
    }

    #[test]
    fn repeated_enter_counts_once() {
        let mut hover = HoverTracker::new();
        hover.enter(HoverRegion::Tab(0));
        hover.enter(HoverRegion::Tab(0));
        assert_eq!(hover.count(), 1);
        hover.leave(HoverRegion::Tab(0));
        assert!(!hover.is_paused());
    }
}
