#![forbid(unsafe_code)]

//! Deferred work emitted by the controller.
//!
//! The controller never owns a timer. Each operation that needs to finish
//! later pushes a [`ScheduledTask`]; the host runs it when the deferral
//! elapses by calling [`ModalController::run`](crate::ModalController::run).
//! Submissions are fire-and-forget: there is no cancellation.

use std::time::Duration;

/// When a task becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferral {
    /// The next render opportunity (`requestAnimationFrame`).
    NextFrame,
    /// A fixed delay (`setTimeout`).
    After(Duration),
}

/// Continuation of a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Second half of `open`: expose to assistive tech, focus, attach listeners.
    CompleteOpen,
    /// Second half of `close`: hide from layout, detach Escape, restore focus.
    CompleteClose,
    /// Page-load auto-open with the root's default text.
    AutoOpen { title: String, body: String },
}

/// A task paired with its deferral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub deferral: Deferral,
    pub task: Task,
}

impl ScheduledTask {
    pub fn next_frame(task: Task) -> Self {
        Self {
            deferral: Deferral::NextFrame,
            task,
        }
    }

    pub fn after(delay: Duration, task: Task) -> Self {
        Self {
            deferral: Deferral::After(delay),
            task,
        }
    }
}
