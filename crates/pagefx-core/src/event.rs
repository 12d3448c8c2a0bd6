//! Lifecycle events emitted by the effects.

use serde::Serialize;

use crate::surface::ElementId;

/// Why the carousel changed tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwitchCause {
    /// The active tab's cycle elapsed.
    Auto,
    /// A tab control was clicked.
    Manual,
}

/// Event reported to [`EffectObserver`](crate::observer::EffectObserver)s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EffectEvent {
    /// A metric element became visible and its counter started.
    CounterStarted {
        element: ElementId,
        /// `None` when the target attribute is not a number.
        target: Option<i64>,
        duration_ms: f64,
    },
    /// A counter reached its final text.
    CounterSettled { element: ElementId, text: String },
    /// The active tab changed.
    TabSwitched {
        from: usize,
        to: usize,
        cause: SwitchCause,
    },
    /// The first hover region was entered.
    CarouselPaused { active: usize },
    /// The last hover region was left.
    CarouselResumed { active: usize },
}

impl EffectEvent {
    /// One-line human readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            EffectEvent::CounterStarted {
                element,
                target,
                duration_ms,
            } => match target {
                Some(t) => format!("counter {element} counting to {t} over {duration_ms}ms"),
                None => format!("counter {element} has no numeric target"),
            },
            EffectEvent::CounterSettled { element, text } => {
                format!("counter {element} settled at {text}")
            }
            EffectEvent::TabSwitched { from, to, cause } => match cause {
                SwitchCause::Auto => format!("tab {from} -> {to} (cycle elapsed)"),
                SwitchCause::Manual => format!("tab {from} -> {to} (clicked)"),
            },
            EffectEvent::CarouselPaused { active } => format!("carousel paused on tab {active}"),
            EffectEvent::CarouselResumed { active } => format!("carousel resumed on tab {active}"),
        }
    }
}
