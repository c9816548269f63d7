//! Deferred callback scheduling
//!
//! The controller never sleeps; it hands each next step to a [`Scheduler`]
//! and is called back once the delay elapses. Implementations must not run
//! a task from inside `schedule_after`.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Deferred unit of work
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Upper bound on tasks fired by a single `run_until_idle`
const RUN_UNTIL_IDLE_LIMIT: usize = 100_000;

/// Handle identifying a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Time source used by the reveal controller
pub trait Scheduler: Send + Sync {
    /// Run `task` once `delay` has elapsed
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Best-effort cancellation of a task that has not fired yet
    fn cancel(&self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle {
        (**self).schedule_after(delay, task)
    }

    fn cancel(&self, handle: TimerHandle) {
        (**self).cancel(handle)
    }
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, u64), Task>,
    due: HashMap<u64, Duration>,
    delays: Vec<Duration>,
    fired: usize,
    ignore_cancellation: bool,
}

/// Virtual-clock scheduler: time only moves when the owner advances it.
///
/// Tasks fire in due-time order, ties in scheduling order. Cloning shares
/// the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Tasks waiting to fire
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Tasks fired so far
    pub fn fired(&self) -> usize {
        self.state.lock().fired
    }

    /// Every delay ever passed to `schedule_after`, in call order
    pub fn scheduled_delays(&self) -> Vec<Duration> {
        self.state.lock().delays.clone()
    }

    /// Make `cancel` a no-op so cancelled tasks still fire
    pub fn ignore_cancellation(&self, ignore: bool) {
        self.state.lock().ignore_cancellation = ignore;
    }

    fn pop_due(&self, limit: Option<Duration>) -> Option<Task> {
        let mut state = self.state.lock();
        let (&(due, id), _) = state.queue.iter().next()?;
        if limit.map_or(false, |limit| due > limit) {
            return None;
        }

        let task = state.queue.remove(&(due, id))?;
        state.due.remove(&id);
        state.now = state.now.max(due);
        state.fired += 1;
        Some(task)
    }

    /// Fire the earliest task, moving the clock to its due time
    pub fn fire_next(&self) -> bool {
        // The lock is released before the task runs so it can schedule more work
        match self.pop_due(None) {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Move the clock forward, firing every task that falls due on the way
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut count = 0;
        while let Some(task) = self.pop_due(Some(target)) {
            task();
            count += 1;
        }

        let mut state = self.state.lock();
        state.now = state.now.max(target);
        count
    }

    /// Fire tasks until the queue is empty
    pub fn run_until_idle(&self) -> usize {
        let mut count = 0;
        while count < RUN_UNTIL_IDLE_LIMIT && self.fire_next() {
            count += 1;
        }
        if count == RUN_UNTIL_IDLE_LIMIT {
            warn!("Manual scheduler stopped after {} tasks with work still queued", count);
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;

        let due = state.now + delay;
        state.queue.insert((due, id), task);
        state.due.insert(id, due);
        state.delays.push(delay);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut state = self.state.lock();
        if state.ignore_cancellation {
            return;
        }
        if let Some(due) = state.due.remove(&handle.0) {
            state.queue.remove(&(due, handle.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_task(counter: &Arc<AtomicUsize>) -> Task {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_advance_fires_due_tasks_in_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay) in [("late", 300u64), ("early", 100), ("mid", 200)] {
            let order = Arc::clone(&order);
            scheduler.schedule_after(
                Duration::from_millis(delay),
                Box::new(move || order.lock().push(label)),
            );
        }

        assert_eq!(scheduler.advance(Duration::from_millis(250)), 2);
        assert_eq!(*order.lock(), vec!["early", "mid"]);
        assert_eq!(scheduler.now(), Duration::from_millis(250));
        assert_eq!(scheduler.pending(), 1);

        assert!(scheduler.fire_next());
        assert_eq!(scheduler.now(), Duration::from_millis(300));
        assert!(!scheduler.fire_next());
    }

    #[test]
    fn test_cancel_and_ignored_cancel() {
        let scheduler = ManualScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let handle = scheduler.schedule_after(Duration::from_millis(10), counter_task(&counter));
        scheduler.cancel(handle);
        assert_eq!(scheduler.run_until_idle(), 0);

        scheduler.ignore_cancellation(true);
        let handle = scheduler.schedule_after(Duration::from_millis(10), counter_task(&counter));
        scheduler.cancel(handle);
        assert_eq!(scheduler.run_until_idle(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tasks_can_schedule_more_work() {
        let scheduler = ManualScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let inner_scheduler = scheduler.clone();
        let inner_counter = Arc::clone(&counter);
        scheduler.schedule_after(
            Duration::from_millis(5),
            Box::new(move || {
                inner_counter.fetch_add(1, Ordering::SeqCst);
                inner_scheduler.schedule_after(Duration::from_millis(5), counter_task(&inner_counter));
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(10)), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.scheduled_delays().len(), 2);
    }
}
