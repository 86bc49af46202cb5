//! Single-threaded timer queue.
//!
//! Timers run only from [`EventLoop::run_until_idle`], never while the code
//! that scheduled them is still on the stack. Equal due times fire in the
//! order they were scheduled.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// A deferred unit of work. It receives the loop so it can schedule more.
pub type Task = Box<dyn FnOnce(&mut EventLoop)>;

/// Handle returned by [`EventLoop::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// How the loop clock advances between timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Jump straight to the next due time.
    #[default]
    Virtual,
    /// Sleep until the next due time has actually elapsed.
    RealTime,
}

pub struct EventLoop {
    pacing: Pacing,
    started: Instant,
    now: Duration,
    next_id: u64,
    timers: BTreeMap<(Duration, TimerId), Task>,
    due: FxHashMap<TimerId, Duration>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::with_pacing(Pacing::Virtual)
    }

    pub fn with_pacing(pacing: Pacing) -> Self {
        Self {
            pacing,
            started: Instant::now(),
            now: Duration::ZERO,
            next_id: 0,
            timers: BTreeMap::new(),
            due: FxHashMap::default(),
        }
    }

    /// Current loop time, measured from loop creation.
    pub fn now(&self) -> Duration {
        match self.pacing {
            Pacing::Virtual => self.now,
            Pacing::RealTime => self.started.elapsed().max(self.now),
        }
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Run `task` no earlier than `delay` from now.
    pub fn set_timeout<F>(&mut self, delay: Duration, task: F) -> TimerId
    where
        F: FnOnce(&mut EventLoop) + 'static,
    {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now() + delay;

        self.timers.insert((due, id), Box::new(task));
        self.due.insert(id, due);
        debug!(timer = id.0, due_ms = due.as_millis() as u64, "timer scheduled");
        id
    }

    /// Cancel a pending timer. Returns `false` if it already ran or was
    /// already cancelled.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let Some(due) = self.due.remove(&id) else {
            return false;
        };
        let removed = self.timers.remove(&(due, id)).is_some();
        debug!(timer = id.0, removed, "timer cleared");
        removed
    }

    /// Fire timers in due order until none are left, including timers
    /// scheduled by the tasks themselves. Returns how many tasks ran.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(((due, id), task)) = self.timers.pop_first() {
            self.due.remove(&id);
            self.wait_until(due);
            self.now = self.now.max(due);
            trace!(timer = id.0, now_ms = self.now.as_millis() as u64, "timer fired");
            task(self);
            ran += 1;
        }
        ran
    }

    fn wait_until(&self, due: Duration) {
        if self.pacing == Pacing::RealTime {
            let elapsed = self.started.elapsed();
            if due > elapsed {
                std::thread::sleep(due - elapsed);
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("pacing", &self.pacing)
            .field("now", &self.now)
            .field("pending", &self.timers.len())
            .finish()
    }
}
