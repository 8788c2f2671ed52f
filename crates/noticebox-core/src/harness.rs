#![forbid(unsafe_code)]

//! Deterministic virtual-time host.
//!
//! [`Harness`] plays the part of the browser event loop for a
//! [`ModalController`]: it forwards events, collects scheduled tasks and
//! runs them when virtual time says they are due. Nothing here sleeps.
//!
//! # Time model
//!
//! - Frame tasks run on [`next_frame`](Harness::next_frame). Tasks scheduled
//!   while a frame runs wait for the following frame.
//! - Timer tasks run on [`advance`](Harness::advance) in deadline order,
//!   ties broken by submission order. `advance` first flushes one pending
//!   frame, since any non-zero wait in a browser spans a frame.
//! - [`settle`](Harness::settle) drains everything, jumping time forward.

use std::time::Duration;

use crate::controller::ModalController;
use crate::dom::Dom;
use crate::event::DomEvent;
use crate::schedule::{Deferral, Task};

/// Upper bound on loop iterations in [`Harness::settle`].
const SETTLE_LIMIT: usize = 1024;

#[derive(Debug, Clone)]
struct PendingTimer {
    due: Duration,
    seq: u64,
    task: Task,
}

/// Virtual-time host for a controller.
#[derive(Debug)]
pub struct Harness<D: Dom> {
    controller: ModalController<D>,
    now: Duration,
    frame: Vec<Task>,
    timers: Vec<PendingTimer>,
    next_seq: u64,
    frames_run: u64,
}

impl<D: Dom> Harness<D> {
    pub fn new(controller: ModalController<D>) -> Self {
        let mut harness = Self {
            controller,
            now: Duration::ZERO,
            frame: Vec::new(),
            timers: Vec::new(),
            next_seq: 0,
            frames_run: 0,
        };
        harness.collect();
        harness
    }

    #[inline]
    pub fn controller(&self) -> &ModalController<D> {
        &self.controller
    }

    /// Mutable access to the controller. Tasks it schedules are picked up
    /// on the next harness call.
    #[inline]
    pub fn controller_mut(&mut self) -> &mut ModalController<D> {
        &mut self.controller
    }

    #[inline]
    pub fn dom(&self) -> &D {
        self.controller.dom()
    }

    #[inline]
    pub fn dom_mut(&mut self) -> &mut D {
        self.controller.dom_mut()
    }

    pub fn into_inner(self) -> ModalController<D> {
        self.controller
    }

    /// Virtual time elapsed since the harness was created.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[inline]
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Tasks waiting for a frame or a timer.
    pub fn pending(&self) -> usize {
        self.frame.len() + self.timers.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn dispatch(&mut self, event: DomEvent<D::Element>) {
        self.collect();
        self.controller.dispatch(&event);
        self.collect();
    }

    pub fn open(&mut self, title: Option<&str>, body: Option<&str>) {
        self.collect();
        self.controller.open(title, body);
        self.collect();
    }

    pub fn close(&mut self) {
        self.collect();
        self.controller.close();
        self.collect();
    }

    /// Run every task queued for the current frame.
    pub fn next_frame(&mut self) {
        self.collect();
        let tasks = std::mem::take(&mut self.frame);
        self.frames_run += 1;
        for task in tasks {
            self.controller.run(task);
        }
        self.collect();
    }

    /// Move virtual time forward by `by`, running due timers in order.
    pub fn advance(&mut self, by: Duration) {
        self.collect();
        if !self.frame.is_empty() && !by.is_zero() {
            self.next_frame();
        }
        let target = self.now + by;
        while let Some(index) = self.earliest_due(target) {
            let timer = self.timers.remove(index);
            self.now = timer.due;
            self.controller.run(timer.task);
            self.collect();
        }
        self.now = target;
    }

    /// Run frames and timers until nothing is pending.
    pub fn settle(&mut self) {
        self.collect();
        for _ in 0..SETTLE_LIMIT {
            if !self.frame.is_empty() {
                self.next_frame();
                continue;
            }
            let Some(due) = self.timers.iter().map(|t| t.due).min() else {
                return;
            };
            self.advance(due.saturating_sub(self.now));
        }
        tracing::warn!(pending = self.pending(), "harness did not settle");
    }

    fn earliest_due(&self, target: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(index, _)| index)
    }

    fn collect(&mut self) {
        for scheduled in self.controller.take_scheduled() {
            match scheduled.deferral {
                Deferral::NextFrame => self.frame.push(scheduled.task),
                Deferral::After(delay) => {
                    self.timers.push(PendingTimer {
                        due: self.now + delay,
                        seq: self.next_seq,
                        task: scheduled.task,
                    });
                    self.next_seq += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModalConfig;
    use crate::controller::DialogState;
    use crate::memory::MemoryDom;

    fn harness() -> Harness<MemoryDom> {
        let (dom, _) = MemoryDom::notice_page();
        let controller = ModalController::install(dom, ModalConfig::default()).unwrap();
        Harness::new(controller)
    }

    #[test]
    fn timers_fire_at_their_deadline() {
        let mut h = harness();
        h.open(None, None);
        h.next_frame();
        h.close();

        h.advance(Duration::from_millis(219));
        assert_eq!(h.controller().state(), DialogState::Closing);
        assert_eq!(h.pending_timers(), 1);

        h.advance(Duration::from_millis(1));
        assert_eq!(h.controller().state(), DialogState::Closed);
        assert_eq!(h.now(), Duration::from_millis(220));
    }

    #[test]
    fn advance_flushes_a_pending_frame() {
        let mut h = harness();
        h.open(None, None);
        h.advance(Duration::from_millis(16));
        assert_eq!(h.controller().state(), DialogState::Open);
        assert_eq!(h.frames_run(), 1);
    }

    #[test]
    fn settle_drains_everything() {
        let mut h = harness();
        h.open(None, None);
        h.settle();
        assert_eq!(h.controller().state(), DialogState::Open);

        h.close();
        h.settle();
        assert_eq!(h.controller().state(), DialogState::Closed);
        assert_eq!(h.pending(), 0);
        assert_eq!(h.now(), Duration::from_millis(220));
    }
}
