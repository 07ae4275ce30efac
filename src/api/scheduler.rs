//! Cancellable delayed tasks for the single-threaded chart model.
//!
//! Time is supplied by the host as a monotonic `Duration` since any fixed
//! epoch. Tasks do not run on their own; the host polls with the current time
//! and the owner performs the work when a task comes due.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifies one scheduled task. Handles are never reused within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle {
    generation: u64,
}

impl TaskHandle {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTask {
    handle: TaskHandle,
    due_at: Duration,
}

/// Holds at most one pending debounced task.
///
/// Scheduling replaces whatever was pending, so a superseded task can never
/// come due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceSlot {
    delay: Duration,
    pending: Option<PendingTask>,
    next_generation: u64,
}

impl DebounceSlot {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            next_generation: 0,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a task due at `now + delay`, superseding any pending task.
    pub fn schedule(&mut self, now: Duration) -> TaskHandle {
        self.next_generation += 1;
        let handle = TaskHandle {
            generation: self.next_generation,
        };
        self.pending = Some(PendingTask {
            handle,
            due_at: now.saturating_add(self.delay),
        });
        handle
    }

    /// Cancels `handle` if it is still the pending task.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if self.pending.is_some_and(|task| task.handle == handle) {
            self.pending = None;
            return true;
        }
        false
    }

    /// Cancels whatever is pending and returns its handle.
    pub fn cancel_pending(&mut self) -> Option<TaskHandle> {
        self.pending.take().map(|task| task.handle)
    }

    #[must_use]
    pub fn pending(&self) -> Option<TaskHandle> {
        self.pending.map(|task| task.handle)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn due_at(&self) -> Option<Duration> {
        self.pending.map(|task| task.due_at)
    }

    /// Removes and returns the pending task if it is due at `now`.
    pub fn take_due(&mut self, now: Duration) -> Option<TaskHandle> {
        match self.pending {
            Some(task) if task.due_at <= now => {
                self.pending = None;
                Some(task.handle)
            }
            _ => None,
        }
    }
}

/// Outcome of a throttled request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleRequest {
    /// The caller should update right away; the minimum interval has elapsed.
    pub immediate: bool,
    /// Trailing task that is always scheduled behind the request.
    pub trailing: TaskHandle,
}

/// Throttle plus trailing debounce.
///
/// A request updates immediately when `min_interval` has passed since the
/// last update and, either way, schedules a trailing debounced update so the
/// final state after a burst is always applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottledDebounce {
    min_interval: Duration,
    trailing: DebounceSlot,
    last_update_at: Option<Duration>,
}

impl ThrottledDebounce {
    #[must_use]
    pub fn new(min_interval: Duration, debounce: Duration) -> Self {
        Self {
            min_interval,
            trailing: DebounceSlot::new(debounce),
            last_update_at: None,
        }
    }

    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    #[must_use]
    pub fn last_update_at(&self) -> Option<Duration> {
        self.last_update_at
    }

    #[must_use]
    pub fn trailing(&self) -> &DebounceSlot {
        &self.trailing
    }

    pub fn request(&mut self, now: Duration) -> ThrottleRequest {
        let immediate = self
            .last_update_at
            .is_none_or(|last| now.saturating_sub(last) >= self.min_interval);
        if immediate {
            self.last_update_at = Some(now);
        }
        let trailing = self.trailing.schedule(now);
        ThrottleRequest {
            immediate,
            trailing,
        }
    }

    /// Returns the trailing task if due, recording `now` as the last update.
    pub fn take_due(&mut self, now: Duration) -> Option<TaskHandle> {
        let handle = self.trailing.take_due(now)?;
        self.last_update_at = Some(now);
        Some(handle)
    }

    pub fn cancel(&mut self) -> Option<TaskHandle> {
        self.trailing.cancel_pending()
    }
}
