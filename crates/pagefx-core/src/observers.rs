//! Concrete observer implementations.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::event::EffectEvent;
use crate::observer::EffectObserver;

/// Observer that logs events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EffectObserver for TracingObserver {
    fn on_event(&self, event: &EffectEvent) {
        match event {
            EffectEvent::CounterStarted { .. } | EffectEvent::CounterSettled { .. } => {
                info!(target: "pagefx::counter", "{}", event.summary());
            }
            EffectEvent::TabSwitched { .. } => {
                info!(target: "pagefx::carousel", "{}", event.summary());
            }
            EffectEvent::CarouselPaused { .. } | EffectEvent::CarouselResumed { .. } => {
                debug!(target: "pagefx::carousel", "{}", event.summary());
            }
        }
    }
}

/// Observer that keeps every event; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<EffectEvent>>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    #[must_use]
    pub fn events(&self) -> Vec<EffectEvent> {
        self.events.borrow().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<EffectEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl EffectObserver for RecordingObserver {
    fn on_event(&self, event: &EffectEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Observer that ignores all events.
#[derive(Debug, Default)]
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EffectObserver for NoOpObserver {
    fn on_event(&self, _event: &EffectEvent) {}
}
