//! # pagefx-core
//!
//! Landing-page effects driven by an explicit frame loop: metric counters
//! that count up once they scroll into view, and a tab carousel that
//! advances on a timer and pauses while hovered.

pub mod carousel;
pub mod clock;
pub mod constants;
pub mod counter;
pub mod document;
pub mod easing;
pub mod error;
pub mod event;
pub mod format;
pub mod frame_loop;
pub mod hover;
pub mod markup;
pub mod observer;
pub mod observers;
pub mod options;
pub mod page;
pub mod simulate;
pub mod surface;
pub mod visibility;

// Re-exports
pub use carousel::Carousel;
pub use clock::{FrameClock, ManualClock, SystemClock};
pub use constants::exit_codes;
pub use counter::{counter_text, CounterAnimator, CounterPhase, CounterSpec};
pub use document::{Element, MemoryDocument};
pub use error::EffectError;
pub use event::{EffectEvent, SwitchCause};
pub use hover::HoverRegion;
pub use markup::{PageDescription, PageLayout};
pub use observer::{EffectObserver, EffectSubject};
pub use options::EffectOptions;
pub use page::{Page, PageSnapshot, PointerEvent, PointerKind};
pub use simulate::{ScriptAction, ScriptEvent, Simulation};
pub use surface::{ElementId, Rect, Surface};

/// Text a metric shows `elapsed` ms into its count-up, with default options.
///
/// # Example
/// ```
/// assert_eq!(pagefx_core::metric_text("500", "+", false, 1500.0), "500+");
/// assert_eq!(pagefx_core::metric_text("2000000", "", true, 2000.0), "2,000,000");
/// ```
#[must_use]
pub fn metric_text(value: &str, suffix: &str, is_large: bool, elapsed: f64) -> String {
    let opts = EffectOptions::default();
    let spec = CounterSpec {
        target: counter::parse_target(value),
        suffix: suffix.to_string(),
        is_large,
    };
    counter_text(elapsed, opts.counter_duration(is_large), &spec, opts.thousands_separator)
}
