//! Bridge between page effect events and TUI messages.

use crossbeam_channel::Sender;

use pagefx_core::{EffectEvent, EffectObserver};

use crate::messages::TuiMessage;

/// Effect observer that forwards events to the TUI channel.
///
/// Sending never blocks; with a full channel the event is dropped.
pub struct TuiBridgeObserver {
    tx: Sender<TuiMessage>,
}

impl TuiBridgeObserver {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl EffectObserver for TuiBridgeObserver {
    fn on_event(&self, event: &EffectEvent) {
        let _ = self.tx.try_send(TuiMessage::Effect(event.clone()));
    }
}

/// Log line shown for an effect event.
#[must_use]
pub fn log_line(event: &EffectEvent) -> String {
    let tag = match event {
        EffectEvent::CounterStarted { .. } | EffectEvent::CounterSettled { .. } => "[COUNTER]",
        EffectEvent::TabSwitched { .. } => "[TAB]",
        EffectEvent::CarouselPaused { .. } | EffectEvent::CarouselResumed { .. } => "[HOVER]",
    };
    format!("{tag} {}", event.summary())
}
