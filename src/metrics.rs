//! Process-local counters for terminal activity.
//! Logged at the end of a `play` session; never persisted.
use std::sync::atomic::{AtomicU64, Ordering};

static ANSWERS_SUBMITTED: AtomicU64 = AtomicU64::new(0);
static ANSWERS_ACCEPTED: AtomicU64 = AtomicU64::new(0);
static ANSWERS_REJECTED: AtomicU64 = AtomicU64::new(0);
static HINTS_REQUESTED: AtomicU64 = AtomicU64::new(0);
static HINTS_FAILED: AtomicU64 = AtomicU64::new(0);
static MISSIONS_COMPLETED: AtomicU64 = AtomicU64::new(0);

pub fn inc_answers_submitted() {
    ANSWERS_SUBMITTED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_answers_accepted() {
    ANSWERS_ACCEPTED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_answers_rejected() {
    ANSWERS_REJECTED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_hints_requested() {
    HINTS_REQUESTED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_hints_failed() {
    HINTS_FAILED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_missions_completed() {
    MISSIONS_COMPLETED.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub answers_submitted: u64,
    pub answers_accepted: u64,
    pub answers_rejected: u64,
    pub hints_requested: u64,
    pub hints_failed: u64,
    pub missions_completed: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        answers_submitted: ANSWERS_SUBMITTED.load(Ordering::Relaxed),
        answers_accepted: ANSWERS_ACCEPTED.load(Ordering::Relaxed),
        answers_rejected: ANSWERS_REJECTED.load(Ordering::Relaxed),
        hints_requested: HINTS_REQUESTED.load(Ordering::Relaxed),
        hints_failed: HINTS_FAILED.load(Ordering::Relaxed),
        missions_completed: MISSIONS_COMPLETED.load(Ordering::Relaxed),
    }
}
