//! Explicit per-run state owned by the controller

use crate::scheduler::TimerHandle;
use crate::timing;
use crate::types::{Generation, Stage};
use lotto_picker::Item;
use serde::{Deserialize, Serialize};

/// Snapshot of one randomization run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Token of the current run; bumped on every start and reset
    pub generation: Generation,
    pub stage: Stage,
    /// Candidate currently shown
    pub displayed: Option<Item>,
    /// Final pick, set once the run reaches `Result`
    pub selected: Option<Item>,
    pub steps_taken: u32,
    pub step_budget: u32,
    pub use_weights: bool,
    /// Callback waiting to fire for this run
    pub pending: Option<TimerHandle>,
}

impl RunState {
    pub fn progress(&self) -> f64 {
        timing::progress(self.steps_taken, self.step_budget)
    }

    pub fn budget_exhausted(&self) -> bool {
        self.steps_taken >= self.step_budget
    }

    /// Drop everything but the generation counter
    pub(crate) fn clear(&mut self) {
        *self = RunState {
            generation: self.generation,
            ..RunState::default()
        };
    }
}
