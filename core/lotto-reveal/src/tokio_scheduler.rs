//! Wall-clock scheduler backed by the tokio timer

use crate::scheduler::{Scheduler, Task, TimerHandle};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::debug;

/// Runs each task on its own tokio task after sleeping for the delay
pub struct TokioScheduler {
    runtime: Handle,
    next_id: AtomicU64,
    timers: Arc<DashMap<u64, AbortHandle>>,
}

impl TokioScheduler {
    /// Create scheduler spawning onto `runtime`
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(0),
            timers: Arc::new(DashMap::new()),
        }
    }

    /// Timers spawned but not yet fired or cancelled
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let timers = Arc::clone(&self.timers);

        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            timers.remove(&id);
            task();
        });

        self.timers.insert(id, join.abort_handle());
        if join.is_finished() {
            self.timers.remove(&id);
        }
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some((_, abort)) = self.timers.remove(&handle.0) {
            abort.abort();
            debug!("Cancelled timer {}", handle.0);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for entry in self.timers.iter() {
            entry.value().abort();
        }
    }
}
