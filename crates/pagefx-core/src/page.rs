//! Page wiring: both effects, pointer listeners and the frame driver.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::carousel::Carousel;
use crate::clock::FrameClock;
use crate::counter::{CounterAnimator, CounterPhase};
use crate::error::EffectError;
use crate::event::EffectEvent;
use crate::frame_loop::{FrameContext, FrameLoop, FrameTask};
use crate::hover::HoverRegion;
use crate::observer::{EffectObserver, EffectSubject};
use crate::options::EffectOptions;
use crate::surface::{parse_percent, ElementId, Surface};

/// Kind of pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PointerKind {
    Enter,
    Leave,
    Click,
}

/// A pointer interaction delivered to an element between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub target: ElementId,
    pub kind: PointerKind,
}

impl PointerEvent {
    #[must_use]
    pub fn new(target: ElementId, kind: PointerKind) -> Self {
        Self { target, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listener {
    SelectTab(usize),
    Hover(HoverRegion),
}

/// Point-in-time view of the effects, for reports and previews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub time_ms: f64,
    pub frames: u64,
    pub metrics: Vec<MetricSnapshot>,
    pub carousel: Option<CarouselSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    pub element: ElementId,
    pub text: String,
    pub phase: CounterPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub active: usize,
    pub paused: bool,
    /// Indicator proportion per tab, read back from the surface.
    pub progress: Vec<f64>,
}

/// A loaded page running the counter animator and the tab carousel.
///
/// The page owns its surface and clock; callers drive it by calling
/// [`Page::frame`] once per display frame and [`Page::dispatch`] for pointer
/// input in between.
pub struct Page<S: Surface, C: FrameClock> {
    surface: S,
    clock: C,
    options: EffectOptions,
    counters: CounterAnimator,
    carousel: Option<Carousel>,
    runs: FrameLoop<S>,
    listeners: BTreeMap<(ElementId, PointerKind), Listener>,
    observers: EffectSubject,
}

impl<S: Surface, C: FrameClock> Page<S, C> {
    /// Wire both effects to `surface`.
    ///
    /// A broken tab set disables the carousel only; counters still run.
    pub fn load(mut surface: S, clock: C, options: EffectOptions) -> Self {
        let options = options.normalize();
        let counters = CounterAnimator::watch(&surface, &options);

        let carousel = match Carousel::from_surface(&mut surface, options.tab_cycle_ms) {
            Ok(carousel) => carousel,
            Err(e) => {
                warn!(error = %e, "carousel disabled");
                None
            }
        };

        let mut listeners = BTreeMap::new();
        if let Some(carousel) = &carousel {
            for (i, binding) in carousel.tabs().iter().enumerate() {
                listeners.insert((binding.tab, PointerKind::Click), Listener::SelectTab(i));
                listeners.insert((binding.tab, PointerKind::Enter), Listener::Hover(HoverRegion::Tab(i)));
                listeners.insert((binding.tab, PointerKind::Leave), Listener::Hover(HoverRegion::Tab(i)));
            }
            if let Some(display) = carousel.content_display() {
                listeners.insert((display, PointerKind::Enter), Listener::Hover(HoverRegion::ContentDisplay));
                listeners.insert((display, PointerKind::Leave), Listener::Hover(HoverRegion::ContentDisplay));
            }
        }

        info!(
            metrics = counters.elements().len(),
            tabs = carousel.as_ref().map_or(0, Carousel::tab_count),
            listeners = listeners.len(),
            "page loaded"
        );

        Self {
            surface,
            clock,
            options,
            counters,
            carousel,
            runs: FrameLoop::new(),
            listeners,
            observers: EffectSubject::new(),
        }
    }

    /// Run one frame at the clock's current time.
    ///
    /// The carousel ticks first, then live counter runs, then newly visible
    /// metrics get runs that first execute on the next frame. Returns the
    /// events the frame produced; observers have already seen them.
    pub fn frame(&mut self) -> Vec<EffectEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();

        if let Some(carousel) = self.carousel.as_mut() {
            let mut ctx = FrameContext::new(now, &mut self.surface, &mut events);
            carousel.on_frame(&mut ctx);
        }

        self.runs.run_frame(now, &mut self.surface, &mut events);

        for run in self.counters.poll(&mut self.surface, now, &mut events) {
            self.runs.schedule(Box::new(run));
        }

        self.publish(&events);
        events
    }

    /// Deliver a pointer interaction. Returns whether a listener handled it.
    pub fn dispatch(&mut self, event: PointerEvent) -> bool {
        let Some(&listener) = self.listeners.get(&(event.target, event.kind)) else {
            return false;
        };
        // Listeners only exist while the carousel does.
        let Some(carousel) = self.carousel.as_mut() else {
            return false;
        };
        debug!(target_element = %event.target, kind = ?event.kind, "pointer event");

        let mut events = Vec::new();
        match (listener, event.kind) {
            (Listener::SelectTab(i), _) => {
                if let Err(e) = carousel.select(&mut self.surface, i, &mut events) {
                    warn!(error = %e, "tab click ignored");
                }
            }
            (Listener::Hover(region), PointerKind::Enter) => carousel.pointer_enter(region, &mut events),
            (Listener::Hover(region), _) => carousel.pointer_leave(region, &mut events),
        }
        self.publish(&events);
        true
    }

    fn publish(&self, events: &[EffectEvent]) {
        for event in events {
            self.observers.notify(event);
        }
    }

    /// Register an observer for every event the page produces.
    pub fn register_observer(&mut self, observer: Box<dyn EffectObserver>) {
        self.observers.register(observer);
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for layout changes such as scrolling. Effects pick up
    /// the change on the next frame.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn options(&self) -> &EffectOptions {
        &self.options
    }

    #[must_use]
    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    #[must_use]
    pub fn counters(&self) -> &CounterAnimator {
        &self.counters
    }

    /// Counter runs currently animating.
    #[must_use]
    pub fn live_runs(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.runs.frame_count()
    }

    /// Number of registered pointer listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether `id` has a listener for `kind`.
    #[must_use]
    pub fn listens(&self, id: ElementId, kind: PointerKind) -> bool {
        self.listeners.contains_key(&(id, kind))
    }

    /// Element of tab control `index`.
    pub fn tab_element(&self, index: usize) -> Result<ElementId, EffectError> {
        let count = self.carousel.as_ref().map_or(0, Carousel::tab_count);
        self.carousel
            .as_ref()
            .and_then(|c| c.tabs().get(index))
            .map(|b| b.tab)
            .ok_or(EffectError::TabOutOfRange { index, count })
    }

    /// The content-display container, when the page has one and a carousel.
    #[must_use]
    pub fn content_display_element(&self) -> Option<ElementId> {
        self.carousel.as_ref().and_then(Carousel::content_display)
    }

    /// Phase of metric element `id`.
    pub fn counter_phase(&self, id: ElementId) -> Result<CounterPhase, EffectError> {
        if !self.counters.elements().contains(&id) {
            return Err(EffectError::UnknownElement(id));
        }
        Ok(self.counters.phase(&self.surface, id))
    }

    /// Capture the current state of both effects.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        let metrics = self
            .counters
            .elements()
            .iter()
            .map(|&id| MetricSnapshot {
                element: id,
                text: self.surface.text(id).unwrap_or_default().to_string(),
                phase: self.counters.phase(&self.surface, id),
            })
            .collect();
        let carousel = self.carousel.as_ref().map(|c| CarouselSnapshot {
            active: c.active(),
            paused: c.is_paused(),
            progress: c
                .tabs()
                .iter()
                .map(|b| self.surface.width(b.bar).and_then(parse_percent).unwrap_or(0.0))
                .collect(),
        });
        PageSnapshot {
            time_ms: self.clock.now(),
            frames: self.runs.frame_count(),
            metrics,
            carousel,
        }
    }
}

impl<S: Surface, C: FrameClock> std::fmt::Debug for Page<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("options", &self.options)
            .field("counters", &self.counters.elements().len())
            .field("carousel", &self.carousel.as_ref().map(Carousel::active))
            .field("runs", &self.runs)
            .field("listeners", &self.listeners.len())
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
