//! Virtual-clock timer queue for deferred terminal work.
//!
//! Nothing here sleeps. The owner advances the clock explicitly (the front
//! end with real elapsed time, tests with fixed steps) and receives every
//! task that became due, in due-time order.

use std::time::Duration;

/// Handle to a scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer<T> {
    handle: TimerHandle,
    due: Duration,
    task: T,
}

/// A queue of tasks keyed by virtual due time.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_handle: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_handle: 0,
            timers: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            due: self.now + delay,
            task,
        });
        handle
    }

    /// Cancel a pending task, returning it if it had not fired yet.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let pos = self.timers.iter().position(|t| t.handle == handle)?;
        Some(self.timers.remove(pos).task)
    }

    /// Move the clock forward and drain every task that is now due.
    ///
    /// Tasks come out ordered by due time; ties keep scheduling order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        self.now += elapsed;
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| (t.due, t.handle));
        due.into_iter().map(|t| t.task).collect()
    }

    /// Drop every pending task without firing it.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Time until the earliest pending task, if any.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.timers
            .iter()
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}
