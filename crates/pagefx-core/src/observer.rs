//! Observer pattern for effect lifecycle events.

use crate::event::EffectEvent;

/// Observer trait for receiving effect events.
pub trait EffectObserver {
    /// Receive an event.
    fn on_event(&self, event: &EffectEvent);
}

/// Subject that manages a collection of observers.
///
/// Everything runs on the page's single thread, so observers are owned
/// directly rather than shared behind locks.
#[derive(Default)]
pub struct EffectSubject {
    observers: Vec<Box<dyn EffectObserver>>,
}

impl EffectSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn register(&mut self, observer: Box<dyn EffectObserver>) {
        self.observers.push(observer);
    }

    /// Unregister all observers.
    pub fn clear(&mut self) {
        self.observers.clear();
    }

    /// Notify all observers of an event, in registration order.
    pub fn notify(&self, event: &EffectEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.len()
    }
}

impl std::fmt::Debug for EffectSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectSubject")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observers::{NoOpObserver, RecordingObserver};
    use crate::surface::ElementId;

    fn settled() -> EffectEvent {
        EffectEvent::CounterSettled {
            element: ElementId(0),
            text: "42".into(),
        }
    }

    #[test]
    fn subject_register_increases_count() {
        let mut subject = EffectSubject::new();
        assert_eq!(subject.count(), 0);
        subject.register(Box::new(NoOpObserver::new()));
        subject.register(Box::new(NoOpObserver::new()));
        assert_eq!(subject.count(), 2);
    }

    #[test]
    fn subject_clear_removes_all() {
        let mut subject = EffectSubject::new();
        subject.register(Box::new(NoOpObserver::new()));
        subject.clear();
        assert_eq!(subject.count(), 0);
    }

    #[test]
    fn subject_notify_calls_all_observers() {
        let first = RecordingObserver::new();
        let second = RecordingObserver::new();
        let mut subject = EffectSubject::new();
        subject.register(Box::new(first.clone()));
        subject.register(Box::new(second.clone()));

        subject.notify(&settled());
        subject.notify(&settled());

        assert_eq!(first.events().len(), 2);
        assert_eq!(second.events(), vec![settled(), settled()]);
    }

    #[test]
    fn subject_notify_empty_does_not_panic() {
        let subject = EffectSubject::default();
        subject.notify(&settled());
    }
}
