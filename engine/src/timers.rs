//! Real-time clocks and cancellable deferred tasks.
//!
//! Staggered attack patterns and invulnerability windows are measured in
//! wall-clock time, not frames. Each boss owns a `TaskScheduler`; tasks only
//! run when the owner polls it, and closing the scheduler drops everything
//! still pending so nothing fires into a dead boss.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

pub type SharedClock = Arc<dyn Clock>;

/// Clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// Handle used to cancel a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TaskId,
    due: Duration,
    task: T,
}

/// Deferred tasks keyed by due time
pub struct TaskScheduler<T> {
    clock: SharedClock,
    pending: Vec<Scheduled<T>>,
    next_id: u64,
    closed: bool,
}

impl<T> TaskScheduler<T> {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            pending: Vec::new(),
            next_id: 0,
            closed: false,
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Schedule `task` to become due after `delay`.
    /// Returns `None` once the scheduler has been closed.
    pub fn schedule_after(&mut self, delay: Duration, task: T) -> Option<TaskId> {
        if self.closed {
            return None;
        }
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.clock.now() + delay;
        self.pending.push(Scheduled { id, due, task });
        Some(id)
    }

    /// Cancel a single task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Cancel everything pending, returning how many tasks were dropped
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Cancel everything and refuse new tasks
    pub fn close(&mut self) -> usize {
        self.closed = true;
        self.cancel_all()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return every task that is due, oldest due time first.
    /// Tasks due at the same instant keep their scheduling order.
    pub fn take_due(&mut self) -> Vec<T> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        let now = self.clock.now();
        let (mut ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|t| t.due <= now);
        self.pending = waiting;
        ready.sort_by_key(|t| (t.due, t.id.0));
        ready.into_iter().map(|t| t.task).collect()
    }
}

impl<T> std::fmt::Debug for TaskScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("pending", &self.pending.len())
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> (ManualClock, TaskScheduler<&'static str>) {
        let clock = ManualClock::new();
        let scheduler = TaskScheduler::new(Arc::new(clock.clone()));
        (clock, scheduler)
    }

    #[test]
    fn test_tasks_run_in_due_order() {
        let (clock, mut tasks) = scheduler();
        tasks.schedule_after(Duration::from_millis(200), "late");
        tasks.schedule_after(Duration::from_millis(100), "early");
        tasks.schedule_after(Duration::from_millis(100), "early-second");

        assert!(tasks.take_due().is_empty());

        clock.advance(Duration::from_millis(150));
        assert_eq!(tasks.take_due(), vec!["early", "early-second"]);
        assert_eq!(tasks.pending(), 1);

        clock.advance(Duration::from_millis(50));
        assert_eq!(tasks.take_due(), vec!["late"]);
        assert_eq!(tasks.pending(), 0);
    }

    #[test]
    fn test_cancel_single_task() {
        let (clock, mut tasks) = scheduler();
        let keep = tasks.schedule_after(Duration::from_millis(10), "keep");
        let dropped = tasks.schedule_after(Duration::from_millis(10), "drop");
        assert!(keep.is_some());

        assert!(tasks.cancel(dropped.expect("scheduled")));
        assert!(!tasks.cancel(dropped.expect("scheduled")));

        clock.advance(Duration::from_millis(10));
        assert_eq!(tasks.take_due(), vec!["keep"]);
    }

    #[test]
    fn test_closed_scheduler_drops_and_refuses_tasks() {
        let (clock, mut tasks) = scheduler();
        tasks.schedule_after(Duration::from_millis(5), "a");
        tasks.schedule_after(Duration::from_millis(5), "b");

        assert_eq!(tasks.close(), 2);
        assert!(tasks.schedule_after(Duration::ZERO, "c").is_none());

        clock.advance(Duration::from_secs(1));
        assert!(tasks.take_due().is_empty());
    }
}
