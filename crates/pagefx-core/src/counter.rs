//! Viewport-triggered metric counters.
//!
//! A metric element counts from zero to its `data-value` the first time it is
//! at least half visible. The display computation ([`counter_text`]) is pure;
//! [`CounterRun`] is the frame task that writes it to the surface, and
//! [`CounterAnimator`] owns the visibility watch that starts the runs.

use serde::Serialize;
use tracing::{debug, info};

use crate::constants::markup::{ANIMATING, DATA_IS_LARGE, DATA_SUFFIX, DATA_VALUE, METRIC_VALUE};
use crate::easing::{ease_out_expo, raw_progress};
use crate::event::EffectEvent;
use crate::format::format_counter;
use crate::frame_loop::{FrameContext, FrameTask, TaskStatus};
use crate::options::EffectOptions;
use crate::surface::{ElementId, Surface};
use crate::visibility::VisibilityWatcher;

/// Static configuration of one metric element, read from its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSpec {
    /// `None` when `data-value` is missing or not a number.
    pub target: Option<i64>,
    pub suffix: String,
    pub is_large: bool,
}

impl CounterSpec {
    /// Read the counter settings from an element's data attributes.
    pub fn from_surface<S: Surface + ?Sized>(surface: &S, id: ElementId) -> Self {
        Self {
            target: surface.attribute(id, DATA_VALUE).and_then(parse_target),
            suffix: surface
                .attribute(id, DATA_SUFFIX)
                .unwrap_or_default()
                .to_string(),
            is_large: surface.attribute(id, DATA_IS_LARGE) == Some("true"),
        }
    }
}

/// Parse a leading decimal integer the way HTML authors expect.
///
/// Leading whitespace and a sign are accepted and anything after the digits
/// is ignored, so `"1200px"` reads as 1200. No digits at all is `None`.
/// Values beyond `i64` saturate.
///
/// # Example
/// ```
/// use pagefx_core::counter::parse_target;
///
/// assert_eq!(parse_target(" 500"), Some(500));
/// assert_eq!(parse_target("98.6"), Some(98));
/// assert_eq!(parse_target("abc"), None);
/// ```
#[must_use]
pub fn parse_target(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let mut value: i64 = 0;
    for b in digits[..end].bytes() {
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    Some(value)
}

/// Counter value shown `elapsed` ms into a run: `floor(eased × target)`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn counter_value(elapsed: f64, duration: f64, target: Option<i64>) -> Option<i64> {
    let target = target?;
    let eased = ease_out_expo(raw_progress(elapsed, duration));
    if eased >= 1.0 {
        return Some(target);
    }
    Some((eased * target as f64).floor() as i64)
}

/// Text shown `elapsed` ms into a run of `duration` ms.
///
/// # Example
/// ```
/// use pagefx_core::counter::{counter_text, CounterSpec};
///
/// let spec = CounterSpec { target: Some(2_000_000), suffix: String::new(), is_large: true };
/// assert_eq!(counter_text(0.0, 2000.0, &spec, ','), "0");
/// assert_eq!(counter_text(2000.0, 2000.0, &spec, ','), "2,000,000");
/// ```
#[must_use]
pub fn counter_text(elapsed: f64, duration: f64, spec: &CounterSpec, sep: char) -> String {
    format_counter(
        counter_value(elapsed, duration, spec.target),
        spec.is_large,
        sep,
        &spec.suffix,
    )
}

/// Final, exact text of a counter.
#[must_use]
pub fn settled_text(spec: &CounterSpec, sep: char) -> String {
    format_counter(spec.target, spec.is_large, sep, &spec.suffix)
}

/// Lifecycle of a metric element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterPhase {
    Unanimated,
    Animating,
    Settled,
}

/// One element's count-up, driven once per frame.
#[derive(Debug, Clone)]
pub struct CounterRun {
    element: ElementId,
    spec: CounterSpec,
    started_at: f64,
    duration: f64,
    separator: char,
}

impl CounterRun {
    #[must_use]
    pub fn new(element: ElementId, spec: CounterSpec, started_at: f64, opts: &EffectOptions) -> Self {
        let duration = opts.counter_duration(spec.is_large);
        Self {
            element,
            spec,
            started_at,
            duration,
            separator: opts.thousands_separator,
        }
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl<S: Surface + ?Sized> FrameTask<S> for CounterRun {
    fn name(&self) -> &str {
        "counter"
    }

    fn on_frame(&mut self, ctx: &mut FrameContext<'_, S>) -> TaskStatus {
        let elapsed = ctx.now - self.started_at;
        let progress = raw_progress(elapsed, self.duration);

        if progress < 1.0 && self.spec.target != Some(0) {
            let text = counter_text(elapsed, self.duration, &self.spec, self.separator);
            ctx.surface.set_text(self.element, &text);
            return TaskStatus::Continue;
        }

        let text = settled_text(&self.spec, self.separator);
        ctx.surface.set_text(self.element, &text);
        ctx.surface.remove_class(self.element, ANIMATING);
        info!(element = %self.element, %text, "counter settled");
        ctx.emit(EffectEvent::CounterSettled {
            element: self.element,
            text,
        });
        TaskStatus::Done
    }
}

/// Watches metric elements and starts each one's run exactly once.
#[derive(Debug, Clone)]
pub struct CounterAnimator {
    watcher: VisibilityWatcher,
    elements: Vec<ElementId>,
    options: EffectOptions,
}

impl CounterAnimator {
    /// Observe every `metric-value` element of the surface.
    pub fn watch<S: Surface + ?Sized>(surface: &S, options: &EffectOptions) -> Self {
        let elements = surface.query_class(METRIC_VALUE);
        let mut watcher = VisibilityWatcher::new(options.visibility_threshold, options.root_margin);
        for &id in &elements {
            watcher.observe(id);
        }
        debug!(count = elements.len(), "metric elements observed");
        Self {
            watcher,
            elements,
            options: options.clone(),
        }
    }

    /// Start runs for elements that became visible since the last poll.
    ///
    /// Each started element is unobserved, so it never starts again.
    pub fn poll<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        now: f64,
        events: &mut Vec<EffectEvent>,
    ) -> Vec<CounterRun> {
        if self.watcher.is_empty() {
            return Vec::new();
        }
        let mut runs = Vec::new();
        for entry in self.watcher.check(&*surface) {
            if !entry.is_intersecting {
                continue;
            }
            self.watcher.unobserve(entry.target);
            let spec = CounterSpec::from_surface(&*surface, entry.target);
            let run = CounterRun::new(entry.target, spec, now, &self.options);
            surface.add_class(entry.target, ANIMATING);
            info!(element = %entry.target, ratio = entry.ratio, "counter started");
            events.push(EffectEvent::CounterStarted {
                element: entry.target,
                target: run.spec.target,
                duration_ms: run.duration,
            });
            runs.push(run);
        }
        runs
    }

    /// Metric elements found at setup, in document order.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Elements still waiting to become visible.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.watcher.len()
    }

    /// Phase of a metric element, derived from the watch and the surface.
    pub fn phase<S: Surface + ?Sized>(&self, surface: &S, id: ElementId) -> CounterPhase {
        if self.watcher.is_observed(id) {
            CounterPhase::Unanimated
        } else if surface.has_class(id, ANIMATING) {
            CounterPhase::Animating
        } else {
            CounterPhase::Settled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Element, MemoryDocument};
    use crate::surface::Rect;

    fn spec(target: Option<i64>, suffix: &str, is_large: bool) -> CounterSpec {
        CounterSpec {
            target,
            suffix: suffix.to_string(),
            is_large,
        }
    }

    #[test]
    fn parse_target_variants() {
        assert_eq!(parse_target("500"), Some(500));
        assert_eq!(parse_target("  +7"), Some(7));
        assert_eq!(parse_target("-12"), Some(-12));
        assert_eq!(parse_target("1200px"), Some(1200));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("-"), None);
        assert_eq!(parse_target("x12"), None);
        assert_eq!(parse_target("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn counter_value_endpoints() {
        assert_eq!(counter_value(0.0, 1500.0, Some(500)), Some(0));
        assert_eq!(counter_value(1500.0, 1500.0, Some(500)), Some(500));
        assert_eq!(counter_value(99_999.0, 1500.0, Some(500)), Some(500));
        assert_eq!(counter_value(750.0, 1500.0, None), None);
    }

    #[test]
    fn counter_value_mid_run_is_front_loaded() {
        // ease(0.5) = 1 - 2^-5 = 0.96875
        assert_eq!(counter_value(750.0, 1500.0, Some(1000)), Some(968));
    }

    #[test]
    fn counter_text_formats() {
        assert_eq!(counter_text(1500.0, 1500.0, &spec(Some(42), "", false), ','), "42");
        assert_eq!(
            counter_text(2000.0, 2000.0, &spec(Some(1_234_567), "+", true), ','),
            "1,234,567+"
        );
        assert_eq!(counter_text(10.0, 1500.0, &spec(None, "%", false), ','), "NaN%");
    }

    fn metric_doc(value: Option<&str>, suffix: Option<&str>, large: Option<&str>) -> (MemoryDocument, ElementId) {
        let mut doc = MemoryDocument::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let mut el = Element::new("span")
            .with_class(METRIC_VALUE)
            .with_text("0")
            .with_rect(Rect::new(0.0, 1000.0, 100.0, 40.0));
        if let Some(v) = value {
            el = el.with_attr(DATA_VALUE, v);
        }
        if let Some(s) = suffix {
            el = el.with_attr(DATA_SUFFIX, s);
        }
        if let Some(l) = large {
            el = el.with_attr(DATA_IS_LARGE, l);
        }
        let id = doc.push(el);
        doc.push(Element::new("footer").with_rect(Rect::new(0.0, 1040.0, 800.0, 400.0)));
        (doc, id)
    }

    #[test]
    fn spec_from_attributes() {
        let (doc, id) = metric_doc(Some("500"), Some("+"), Some("true"));
        assert_eq!(CounterSpec::from_surface(&doc, id), spec(Some(500), "+", true));

        let (doc, id) = metric_doc(Some("500"), None, Some("yes"));
        assert_eq!(CounterSpec::from_surface(&doc, id), spec(Some(500), "", false));

        let (doc, id) = metric_doc(None, None, None);
        assert_eq!(CounterSpec::from_surface(&doc, id), spec(None, "", false));
    }

    #[test]
    fn animator_starts_once_when_visible() {
        let (mut doc, id) = metric_doc(Some("500"), Some("+"), None);
        let opts = EffectOptions::default();
        let mut animator = CounterAnimator::watch(&doc, &opts);
        let mut events = Vec::new();

        assert!(animator.poll(&mut doc, 0.0, &mut events).is_empty());
        assert_eq!(animator.phase(&doc, id), CounterPhase::Unanimated);

        doc.scroll_to(800.0);
        let runs = animator.poll(&mut doc, 100.0, &mut events);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].element(), id);
        assert!((runs[0].duration() - 1500.0).abs() < f64::EPSILON);
        assert!(doc.has_class(id, ANIMATING));
        assert_eq!(animator.phase(&doc, id), CounterPhase::Animating);
        assert_eq!(animator.pending(), 0);

        // Re-entering the viewport never restarts the counter.
        doc.scroll_to(0.0);
        assert!(animator.poll(&mut doc, 200.0, &mut events).is_empty());
        doc.scroll_to(800.0);
        assert!(animator.poll(&mut doc, 300.0, &mut events).is_empty());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn run_settles_on_exact_text() {
        let (mut doc, id) = metric_doc(Some("500"), Some("+"), None);
        let opts = EffectOptions::default();
        let mut run = CounterRun::new(id, CounterSpec::from_surface(&doc, id), 0.0, &opts);
        doc.add_class(id, ANIMATING);
        let mut events = Vec::new();

        let mut ctx = FrameContext::new(16.0, &mut doc, &mut events);
        assert_eq!(run.on_frame(&mut ctx), TaskStatus::Continue);
        let mut ctx = FrameContext::new(1500.0, &mut doc, &mut events);
        assert_eq!(run.on_frame(&mut ctx), TaskStatus::Done);

        assert_eq!(doc.text(id), Some("500+"));
        assert!(!doc.has_class(id, ANIMATING));
        assert_eq!(
            events,
            vec![EffectEvent::CounterSettled {
                element: id,
                text: "500+".into()
            }]
        );
    }

    #[test]
    fn zero_target_settles_on_first_frame() {
        let (mut doc, id) = metric_doc(Some("0"), Some("%"), None);
        let opts = EffectOptions::default();
        let mut run = CounterRun::new(id, CounterSpec::from_surface(&doc, id), 0.0, &opts);
        let mut events = Vec::new();
        let mut ctx = FrameContext::new(0.0, &mut doc, &mut events);
        assert_eq!(run.on_frame(&mut ctx), TaskStatus::Done);
        assert_eq!(doc.text(id), Some("0%"));
    }

    #[test]
    fn nan_target_runs_full_duration() {
        let (mut doc, id) = metric_doc(Some("lots"), None, Some("true"));
        let opts = EffectOptions::default();
        let mut run = CounterRun::new(id, CounterSpec::from_surface(&doc, id), 0.0, &opts);
        let mut events = Vec::new();
        let mut ctx = FrameContext::new(1000.0, &mut doc, &mut events);
        assert_eq!(run.on_frame(&mut ctx), TaskStatus::Continue);
        assert_eq!(doc.text(id), Some("NaN"));
        let mut ctx = FrameContext::new(2000.0, &mut doc, &mut events);
        assert_eq!(run.on_frame(&mut ctx), TaskStatus::Done);
        assert_eq!(doc.text(id), Some("NaN"));
    }
}
