//! Cancelable deferred transitions for the shell.
//!
//! The shell never spawns fire-and-forget timers. Each delayed action
//! ("apply the reward in 2 s", "return to the dashboard in 2.5 s") is queued
//! here with a deadline, and the owner polls with the current time. Because
//! time is always passed in, tests advance it deterministically, and closing a
//! view cancels whatever it left pending.

use log::debug;
use std::time::{Duration, Instant};

/// Handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct PendingTask<A> {
    id: TaskId,
    due: Instant,
    action: A,
}

/// Deadline-ordered queue of pending actions.
#[derive(Debug)]
pub struct Scheduler<A> {
    pending: Vec<PendingTask<A>>,
    next_id: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Queue `action` to fire once `delay` has elapsed after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: A) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTask {
            id,
            due: now + delay,
            action,
        });
        debug!("scheduler: task {:?} due in {}ms", id, delay.as_millis());
        id
    }

    /// Drop a pending task. Returns false when it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        before != self.pending.len()
    }

    /// Drop every pending task, returning how many were discarded.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            debug!("scheduler: cancelled {} pending task(s)", dropped);
        }
        dropped
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest deadline still queued.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|t| t.due).min()
    }

    /// Remove and return every action due at `now`, earliest deadline first
    /// (ties keep scheduling order).
    pub fn poll_due(&mut self, now: Instant) -> Vec<A> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due <= now);
        self.pending = waiting;
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.action).collect()
    }
}
