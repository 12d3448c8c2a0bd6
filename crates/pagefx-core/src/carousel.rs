//! Auto-advancing tab carousel.
//!
//! One [`CarouselState`] record drives the whole component. The frame task
//! fills the active tab's progress bar over one cycle and advances to the
//! next tab when it is full. Hovering a tracked region freezes progress; on
//! resume the cycle start is rebuilt from the displayed proportion, so no
//! progress is lost or skipped.

use tracing::{debug, info, warn};

use crate::constants::markup::{
    ACTIVE, ARIA_SELECTED, CONTENT_DISPLAY, CONTENT_ITEM, PROGRESS_BAR, TAB_ITEM,
};
use crate::easing::raw_progress;
use crate::error::EffectError;
use crate::event::{EffectEvent, SwitchCause};
use crate::frame_loop::{FrameContext, FrameTask, TaskStatus};
use crate::hover::{HoverRegion, HoverTracker};
use crate::surface::{percent_width, ElementId, Surface};

/// Elements bound to one logical tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBinding {
    pub tab: ElementId,
    pub content: ElementId,
    pub bar: ElementId,
}

/// Mutable state of the carousel.
#[derive(Debug, Clone, Default)]
pub struct CarouselState {
    /// Index of the active tab; always in range.
    pub active: usize,
    /// Frame time the active cycle started; unset right after a switch.
    pub cycle_start: Option<f64>,
    /// Proportion last written to the active progress bar.
    pub displayed: f64,
    pub hover: HoverTracker,
}

impl CarouselState {
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.hover.is_paused()
    }
}

/// The tab carousel component.
#[derive(Debug, Clone)]
pub struct Carousel {
    tabs: Vec<TabBinding>,
    content_display: Option<ElementId>,
    cycle_ms: f64,
    state: CarouselState,
}

impl Carousel {
    /// Bind the carousel to the surface's tab markup.
    ///
    /// Returns `Ok(None)` when the page has no tabs. On success tab 0 is
    /// made the only active tab.
    pub fn from_surface<S: Surface + ?Sized>(
        surface: &mut S,
        cycle_ms: f64,
    ) -> Result<Option<Self>, EffectError> {
        let tabs = surface.query_class(TAB_ITEM);
        if tabs.is_empty() {
            debug!("no tabs on page, carousel disabled");
            return Ok(None);
        }
        let contents = surface.query_class(CONTENT_ITEM);
        let bars = surface.query_class(PROGRESS_BAR);
        if contents.len() != tabs.len() || bars.len() != tabs.len() {
            return Err(EffectError::MismatchedTabSet {
                tabs: tabs.len(),
                contents: contents.len(),
                bars: bars.len(),
            });
        }
        let content_display = surface.query_class(CONTENT_DISPLAY).first().copied();

        let tabs: Vec<TabBinding> = tabs
            .into_iter()
            .zip(contents)
            .zip(bars)
            .map(|((tab, content), bar)| TabBinding { tab, content, bar })
            .collect();

        let carousel = Self {
            tabs,
            content_display,
            cycle_ms,
            state: CarouselState::default(),
        };
        carousel.sync_markup(surface);
        info!(tabs = carousel.tabs.len(), cycle_ms, "carousel ready");
        Ok(Some(carousel))
    }

    /// Make the surface agree with the state: only the active tab is active.
    fn sync_markup<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (i, binding) in self.tabs.iter().enumerate() {
            if i == self.state.active {
                activate(surface, binding);
            } else {
                deactivate(surface, binding);
            }
        }
    }

    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabBinding] {
        &self.tabs
    }

    #[must_use]
    pub fn content_display(&self) -> Option<ElementId> {
        self.content_display
    }

    #[must_use]
    pub fn active(&self) -> usize {
        self.state.active
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Proportion shown by the active progress bar.
    #[must_use]
    pub fn displayed_progress(&self) -> f64 {
        self.state.displayed
    }

    #[must_use]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    #[must_use]
    pub fn cycle_ms(&self) -> f64 {
        self.cycle_ms
    }

    /// Deactivate the current tab and activate `index`. The cycle start is
    /// cleared, so it is taken from the next frame unless the caller sets it.
    fn switch_to<S: Surface + ?Sized>(&mut self, surface: &mut S, index: usize) {
        deactivate(surface, &self.tabs[self.state.active]);
        self.state.active = index;
        activate(surface, &self.tabs[index]);
        self.state.cycle_start = None;
        self.state.displayed = 0.0;
    }

    /// Click on tab `index`: switch to it and restart its cycle from zero,
    /// whether or not it was already active or the carousel is paused.
    pub fn select<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        index: usize,
        events: &mut Vec<EffectEvent>,
    ) -> Result<(), EffectError> {
        if index >= self.tabs.len() {
            return Err(EffectError::TabOutOfRange {
                index,
                count: self.tabs.len(),
            });
        }
        let from = self.state.active;
        self.switch_to(surface, index);
        surface.set_width(self.tabs[index].bar, &percent_width(0.0));
        info!(from, to = index, "tab selected");
        events.push(EffectEvent::TabSwitched {
            from,
            to: index,
            cause: SwitchCause::Manual,
        });
        Ok(())
    }

    /// Pointer entered a tracked region.
    pub fn pointer_enter(&mut self, region: HoverRegion, events: &mut Vec<EffectEvent>) {
        if !self.tracks(region) {
            warn!(?region, "hover on untracked region ignored");
            return;
        }
        if self.state.hover.enter(region) {
            debug!(?region, active = self.state.active, "carousel paused");
            events.push(EffectEvent::CarouselPaused {
                active: self.state.active,
            });
        }
    }

    /// Pointer left a tracked region.
    pub fn pointer_leave(&mut self, region: HoverRegion, events: &mut Vec<EffectEvent>) {
        if self.state.hover.leave(region) {
            debug!(?region, active = self.state.active, "carousel resumed");
            events.push(EffectEvent::CarouselResumed {
                active: self.state.active,
            });
        }
    }

    fn tracks(&self, region: HoverRegion) -> bool {
        match region {
            HoverRegion::Tab(i) => i < self.tabs.len(),
            HoverRegion::ContentDisplay => self.content_display.is_some(),
        }
    }

    /// One frame of the cycle timer.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, now: f64, events: &mut Vec<EffectEvent>) {
        let start = *self.state.cycle_start.get_or_insert(now);

        if self.state.is_paused() {
            // Slide the start forward so elapsed time stays at the frozen proportion.
            self.state.cycle_start = Some(now - self.state.displayed * self.cycle_ms);
            return;
        }

        let progress = raw_progress(now - start, self.cycle_ms);
        let bar = self.tabs[self.state.active].bar;
        surface.set_width(bar, &percent_width(progress));
        self.state.displayed = progress;

        if progress >= 1.0 {
            let from = self.state.active;
            let next = (from + 1) % self.tabs.len();
            self.switch_to(surface, next);
            self.state.cycle_start = Some(now);
            info!(from, to = next, "tab cycle elapsed");
            events.push(EffectEvent::TabSwitched {
                from,
                to: next,
                cause: SwitchCause::Auto,
            });
        }
    }
}

impl<S: Surface + ?Sized> FrameTask<S> for Carousel {
    fn name(&self) -> &str {
        "carousel"
    }

    /// Runs for the page's lifetime.
    fn on_frame(&mut self, ctx: &mut FrameContext<'_, S>) -> TaskStatus {
        let mut events = Vec::new();
        self.tick(&mut *ctx.surface, ctx.now, &mut events);
        for event in events {
            ctx.emit(event);
        }
        TaskStatus::Continue
    }
}

fn activate<S: Surface + ?Sized>(surface: &mut S, binding: &TabBinding) {
    surface.add_class(binding.tab, ACTIVE);
    surface.set_attribute(binding.tab, ARIA_SELECTED, "true");
    surface.add_class(binding.content, ACTIVE);
}

fn deactivate<S: Surface + ?Sized>(surface: &mut S, binding: &TabBinding) {
    surface.remove_class(binding.tab, ACTIVE);
    surface.set_attribute(binding.tab, ARIA_SELECTED, "false");
    surface.remove_class(binding.content, ACTIVE);
    surface.set_width(binding.bar, &percent_width(0.0));
}
