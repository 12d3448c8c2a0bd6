//! TUI message types (Elm Messages).

use pagefx_core::EffectEvent;

use crate::keymap::KeyAction;

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// Lifecycle event from one of the page effects.
    Effect(EffectEvent),
    /// Free-form log line.
    Log(String),
    /// Error line; also shown in the log panel.
    Error(String),
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Key press event forwarded from the event loop.
    KeyPress(KeyAction),
    /// Pointer moved to, or clicked at, a terminal cell.
    Mouse { column: u16, row: u16, click: bool },
    /// Quit the application.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_variants() {
        let msg = TuiMessage::Effect(EffectEvent::CarouselPaused { active: 1 });
        assert!(matches!(msg, TuiMessage::Effect(EffectEvent::CarouselPaused { active: 1 })));

        let msg = TuiMessage::Mouse {
            column: 3,
            row: 4,
            click: true,
        };
        assert!(matches!(msg, TuiMessage::Mouse { click: true, .. }));

        let msg = TuiMessage::Resize {
            width: 80,
            height: 24,
        };
        assert!(matches!(msg, TuiMessage::Resize { .. }));
    }
}
