//! Headless page simulation on a manual clock.
//!
//! Frames run at a fixed interval starting at time 0. Scripted pointer and
//! scroll events are dispatched between frames: an event at time `t` runs
//! after the last frame at or before `t` and before the next one.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{FrameClock, ManualClock};
use crate::document::MemoryDocument;
use crate::error::EffectError;
use crate::event::EffectEvent;
use crate::options::EffectOptions;
use crate::page::{Page, PointerEvent, PointerKind};
use crate::surface::Surface;

/// Tolerance when comparing frame times with script times.
const TIME_EPSILON: f64 = 1e-9;

/// What a scripted event does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    HoverTab { index: usize },
    UnhoverTab { index: usize },
    ClickTab { index: usize },
    HoverContent,
    UnhoverContent,
    ScrollTo { y: f64 },
    ScrollBy { dy: f64 },
    /// Grow the viewport over the whole page.
    RevealAll,
}

/// One timed entry of an interaction script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: f64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

/// Parse a JSON array of script events.
pub fn parse_script(json: &str) -> Result<Vec<ScriptEvent>, EffectError> {
    let script: Vec<ScriptEvent> =
        serde_json::from_str(json).map_err(|e| EffectError::InvalidOptions(format!("script: {e}")))?;
    if let Some(bad) = script.iter().find(|e| !e.at_ms.is_finite() || e.at_ms < 0.0) {
        return Err(EffectError::InvalidOptions(format!(
            "script: event time must be a non-negative number, got {}",
            bad.at_ms
        )));
    }
    Ok(script)
}

/// A page driven by a manual clock.
pub struct Simulation {
    page: Page<MemoryDocument, Rc<ManualClock>>,
    clock: Rc<ManualClock>,
    interval: f64,
    frames: u64,
    horizon: f64,
    script: Vec<ScriptEvent>,
    next_event: usize,
}

impl Simulation {
    /// Load `doc` with a clock at 0 and frames every `frame_interval_ms`.
    #[must_use]
    pub fn new(doc: MemoryDocument, options: EffectOptions, frame_interval_ms: f64) -> Self {
        let clock = Rc::new(ManualClock::new(0.0));
        let page = Page::load(doc, Rc::clone(&clock), options);
        let interval = if frame_interval_ms.is_finite() && frame_interval_ms > 0.0 {
            frame_interval_ms
        } else {
            crate::constants::DEFAULT_FRAME_INTERVAL_MS
        };
        Self {
            page,
            clock,
            interval,
            frames: 0,
            horizon: 0.0,
            script: Vec::new(),
            next_event: 0,
        }
    }

    /// Replace the interaction script. Events are replayed in time order.
    #[must_use]
    pub fn with_script(mut self, mut script: Vec<ScriptEvent>) -> Self {
        script.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        self.script = script;
        self.next_event = 0;
        self
    }

    /// Time of the next frame.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    #[must_use]
    pub fn frame_interval(&self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn page(&self) -> &Page<MemoryDocument, Rc<ManualClock>> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page<MemoryDocument, Rc<ManualClock>> {
        &mut self.page
    }

    /// Script events not yet dispatched.
    #[must_use]
    pub fn remaining_script(&self) -> &[ScriptEvent] {
        &self.script[self.next_event..]
    }

    /// Apply one scripted action to the page now.
    pub fn apply(&mut self, action: &ScriptAction) -> Result<(), EffectError> {
        let (target, kind) = match *action {
            ScriptAction::HoverTab { index } => (Some(self.page.tab_element(index)?), PointerKind::Enter),
            ScriptAction::UnhoverTab { index } => (Some(self.page.tab_element(index)?), PointerKind::Leave),
            ScriptAction::ClickTab { index } => (Some(self.page.tab_element(index)?), PointerKind::Click),
            ScriptAction::HoverContent => (self.page.content_display_element(), PointerKind::Enter),
            ScriptAction::UnhoverContent => (self.page.content_display_element(), PointerKind::Leave),
            ScriptAction::ScrollTo { y } => {
                self.page.surface_mut().scroll_to(y);
                return Ok(());
            }
            ScriptAction::ScrollBy { dy } => {
                self.page.surface_mut().scroll_by(dy);
                return Ok(());
            }
            ScriptAction::RevealAll => {
                self.reveal_all();
                return Ok(());
            }
        };
        if let Some(target) = target {
            self.page.dispatch(PointerEvent::new(target, kind));
        }
        Ok(())
    }

    /// Grow the viewport to the whole page so every metric is visible.
    pub fn reveal_all(&mut self) {
        let doc = self.page.surface_mut();
        let width = doc.viewport().width;
        let height = doc.content_height();
        doc.scroll_to(0.0);
        doc.resize_viewport(width, height);
    }

    /// Dispatch pending script events, run one frame and advance the clock.
    pub fn step(&mut self) -> Result<Vec<EffectEvent>, EffectError> {
        let now = self.clock.now();
        while let Some(event) = self.script.get(self.next_event) {
            if event.at_ms >= now - TIME_EPSILON {
                break;
            }
            let (at_ms, action) = (event.at_ms, event.action.clone());
            self.next_event += 1;
            debug!(at_ms, frame_ms = now, ?action, "script event");
            self.apply(&action)?;
        }

        let events = self.page.frame();
        self.frames += 1;
        #[allow(clippy::cast_precision_loss)]
        let next = self.frames as f64 * self.interval;
        self.clock.set(next);
        Ok(events)
    }

    /// Run every frame with a timestamp up to and including `t`.
    pub fn run_to(&mut self, t: f64) -> Result<Vec<EffectEvent>, EffectError> {
        let mut events = Vec::new();
        while self.clock.now() <= t + TIME_EPSILON {
            events.extend(self.step()?);
        }
        self.horizon = self.horizon.max(t);
        Ok(events)
    }

    /// Run the next `ms` of page time.
    pub fn run_for(&mut self, ms: f64) -> Result<Vec<EffectEvent>, EffectError> {
        self.run_to(self.horizon + ms)
    }

    /// Run frames until `done` holds or `limit_ms` passes. Returns whether
    /// `done` was reached.
    pub fn run_until<F>(&mut self, limit_ms: f64, mut done: F) -> Result<bool, EffectError>
    where
        F: FnMut(&Page<MemoryDocument, Rc<ManualClock>>) -> bool,
    {
        while self.clock.now() <= limit_ms + TIME_EPSILON {
            self.step()?;
            if done(&self.page) {
                self.horizon = self.horizon.max(self.clock.now() - self.interval);
                return Ok(true);
            }
        }
        self.horizon = self.horizon.max(limit_ms);
        Ok(false)
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("now", &self.clock.now())
            .field("interval", &self.interval)
            .field("frames", &self.frames)
            .field("script", &self.script.len())
            .field("page", &self.page)
            .finish()
    }
}
