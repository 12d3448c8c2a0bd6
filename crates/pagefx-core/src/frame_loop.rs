//! Explicit per-frame scheduling.
//!
//! Each animation is a [`FrameTask`] that does one unit of work per frame and
//! reports whether it wants the next one. [`FrameLoop`] runs the tasks in
//! scheduling order and drops finished ones.

use crate::event::EffectEvent;

/// Whether a task wants another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Continue,
    Done,
}

/// Per-frame inputs and outputs of a task.
pub struct FrameContext<'a, S: ?Sized> {
    /// Frame timestamp (ms).
    pub now: f64,
    /// Surface to render into.
    pub surface: &'a mut S,
    events: &'a mut Vec<EffectEvent>,
}

impl<'a, S: ?Sized> FrameContext<'a, S> {
    pub fn new(now: f64, surface: &'a mut S, events: &'a mut Vec<EffectEvent>) -> Self {
        Self {
            now,
            surface,
            events,
        }
    }

    /// Queue an event for the page's observers.
    pub fn emit(&mut self, event: EffectEvent) {
        self.events.push(event);
    }
}

/// A unit of animation work driven once per frame.
pub trait FrameTask<S: ?Sized> {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Advance by one frame.
    fn on_frame(&mut self, ctx: &mut FrameContext<'_, S>) -> TaskStatus;
}

/// Ordered collection of live frame tasks.
pub struct FrameLoop<S: ?Sized> {
    tasks: Vec<Box<dyn FrameTask<S>>>,
    frames: u64,
}

impl<S: ?Sized> FrameLoop<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            frames: 0,
        }
    }

    /// Schedule a task; it first runs on the next frame.
    pub fn schedule(&mut self, task: Box<dyn FrameTask<S>>) {
        tracing::debug!(task = task.name(), "frame task scheduled");
        self.tasks.push(task);
    }

    /// Run every task once for the frame at `now`.
    ///
    /// Returns the number of tasks still alive.
    pub fn run_frame(&mut self, now: f64, surface: &mut S, events: &mut Vec<EffectEvent>) -> usize {
        self.frames += 1;
        let mut ctx = FrameContext::new(now, surface, events);
        self.tasks.retain_mut(|task| match task.on_frame(&mut ctx) {
            TaskStatus::Continue => true,
            TaskStatus::Done => {
                tracing::debug!(task = task.name(), now, "frame task finished");
                false
            }
        });
        self.tasks.len()
    }

    /// Number of live tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl<S: ?Sized> Default for FrameLoop<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> std::fmt::Debug for FrameLoop<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("tasks", &self.tasks.len())
            .field("frames", &self.frames)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Appends its id to the log for `frames` frames.
    struct Countdown {
        id: u32,
        frames: u32,
    }

    impl FrameTask<Vec<(u32, f64)>> for Countdown {
        fn name(&self) -> &str {
            "countdown"
        }

        fn on_frame(&mut self, ctx: &mut FrameContext<'_, Vec<(u32, f64)>>) -> TaskStatus {
            ctx.surface.push((self.id, ctx.now));
            self.frames -= 1;
            if self.frames == 0 {
                TaskStatus::Done
            } else {
                TaskStatus::Continue
            }
        }
    }

    #[test]
    fn tasks_run_in_order_until_done() {
        let mut lp = FrameLoop::new();
        lp.schedule(Box::new(Countdown { id: 1, frames: 1 }));
        lp.schedule(Box::new(Countdown { id: 2, frames: 2 }));

        let mut log = Vec::new();
        let mut events = Vec::new();
        assert_eq!(lp.run_frame(0.0, &mut log, &mut events), 1);
        assert_eq!(lp.run_frame(16.0, &mut log, &mut events), 0);
        assert_eq!(lp.run_frame(32.0, &mut log, &mut events), 0);

        assert_eq!(log, vec![(1, 0.0), (2, 0.0), (2, 16.0)]);
        assert_eq!(lp.frame_count(), 3);
        assert!(lp.is_empty());
    }

    #[test]
    fn emitted_events_reach_the_caller() {
        struct Emitter;
        impl FrameTask<()> for Emitter {
            fn name(&self) -> &str {
                "emitter"
            }
            fn on_frame(&mut self, ctx: &mut FrameContext<'_, ()>) -> TaskStatus {
                ctx.emit(EffectEvent::CarouselPaused { active: 0 });
                TaskStatus::Done
            }
        }

        let mut lp = FrameLoop::new();
        lp.schedule(Box::new(Emitter));
        let mut events = Vec::new();
        lp.run_frame(0.0, &mut (), &mut events);
        assert_eq!(events, vec![EffectEvent::CarouselPaused { active: 0 }]);
    }
}
