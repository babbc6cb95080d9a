#![forbid(unsafe_code)]

//! Deferred callbacks: the only suspension mechanism in the deck.
//!
//! The controller never sleeps. It hands a [`DeferredTask`] to its
//! [`Scheduler`] and expects the host to deliver it back through
//! `NavigationController::run_deferred` once the delay has elapsed.
//!
//! Two schedulers exist:
//! - [`ManualScheduler`]: a host-driven virtual clock. Nothing fires until the
//!   host calls [`ManualScheduler::advance`]. Used by tests and headless hosts.
//! - the browser scheduler in `tastedeck-web`, backed by `setTimeout`.
//!
//! There is no cancellation. Every scheduled task is delivered exactly once.

use std::collections::VecDeque;
use std::time::Duration;

/// Work the controller wants done after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    /// Clear the transition lock.
    ReleaseTransitionLock,
    /// Restore the activation element to its resting scale.
    RestoreActivationScale,
}

/// Sink for deferred tasks.
pub trait Scheduler {
    /// Arrange for `task` to be delivered back to the controller after `delay`.
    fn schedule(&mut self, delay: Duration, task: DeferredTask);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        (**self).schedule(delay, task);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    due: Duration,
    seq: u64,
    task: DeferredTask,
}

/// Deterministic scheduler driven by an explicit monotonic clock.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    now: Duration,
    next_seq: u64,
    pending: VecDeque<Pending>,
}

impl ManualScheduler {
    /// Create a scheduler whose clock starts at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: VecDeque::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks not yet delivered.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Tasks not yet delivered, in delivery order.
    pub fn pending(&self) -> impl Iterator<Item = DeferredTask> + '_ {
        self.pending.iter().map(|p| p.task)
    }

    /// Advance the clock by `dt` and return every task that became due,
    /// ordered by due time and then by scheduling order.
    pub fn advance(&mut self, dt: Duration) -> Vec<DeferredTask> {
        self.now = self.now.saturating_add(dt);
        let mut due = Vec::new();
        while let Some(front) = self.pending.front() {
            if front.due > self.now {
                break;
            }
            if let Some(p) = self.pending.pop_front() {
                due.push(p.task);
            }
        }
        due
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        let entry = Pending {
            due: self.now.saturating_add(delay),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        // Keep the queue sorted by (due, seq); ties keep insertion order.
        let idx = self
            .pending
            .iter()
            .position(|p| (p.due, p.seq) > (entry.due, entry.seq))
            .unwrap_or(self.pending.len());
        self.pending.insert(idx, entry);
    }
}
