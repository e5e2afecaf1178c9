//! A virtual timeline of frame callbacks and fixed-delay timers.
//!
//! The page has two kinds of deferred work: per-frame steps of the counter
//! animation and the form stub's delayed label restore. Both are modelled as
//! tasks on a [`Timeline`] driven by explicit timestamps, which keeps the
//! session single-threaded and deterministic under test.
//!
//! - [`Timeline::request_frame`] queues a task for the next frame.
//! - [`Timeline::set_timeout`] queues a task for `now + delay`.
//! - [`Timeline::cancel`] removes a pending task of either kind.
//! - [`Timeline::advance`] moves the clock forward and returns what fired:
//!   due timers first (in due order), then the frame queue as it stood when
//!   the call began. Frames requested while handling fired tasks run on the
//!   following advance.

use std::collections::BTreeMap;

/// Handle of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// A task that fired during [`Timeline::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub id: TaskId,
    /// Clock time the task ran at (the frame timestamp for frame tasks).
    pub at_ms: u64,
    pub task: T,
}

#[derive(Debug)]
pub struct Timeline<T> {
    now_ms: u64,
    next_id: u64,
    /// Keyed by (due time, id) so equal due times fire in scheduling order.
    timers: BTreeMap<(u64, TaskId), T>,
    frames: Vec<(TaskId, T)>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            timers: BTreeMap::new(),
            frames: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Queue `task` for the next frame.
    pub fn request_frame(&mut self, task: T) -> TaskId {
        let id = self.next_id();
        self.frames.push((id, task));
        id
    }

    /// Queue `task` to run once `delay_ms` has elapsed.
    pub fn set_timeout(&mut self, delay_ms: u64, task: T) -> TaskId {
        let id = self.next_id();
        self.timers
            .insert((self.now_ms.saturating_add(delay_ms), id), task);
        id
    }

    /// Cancel a pending task. Returns `false` if it already ran or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending();
        self.timers.retain(|(_, tid), _| *tid != id);
        self.frames.retain(|(tid, _)| *tid != id);
        self.pending() != before
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.timers.len() + self.frames.len()
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Due time of the earliest pending timer.
    pub fn next_timer_due(&self) -> Option<u64> {
        self.timers.keys().next().map(|(due, _)| *due)
    }

    /// Move the clock to `now_ms` and collect every task that fires.
    ///
    /// The clock never runs backwards; an earlier `now_ms` is treated as
    /// the current time.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Fired<T>> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let mut fired = Vec::new();
        let later = self.timers.split_off(&(now.saturating_add(1), TaskId(0)));
        let due = std::mem::replace(&mut self.timers, later);
        for ((at_ms, id), task) in due {
            fired.push(Fired { id, at_ms, task });
        }

        for (id, task) in std::mem::take(&mut self.frames) {
            fired.push(Fired {
                id,
                at_ms: now,
                task,
            });
        }
        fired
    }
}
