//! Core types for the reveal state machine

use serde::{Deserialize, Serialize};

/// Run generation token
pub type Generation = u64;

/// Reveal stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// No run active
    Idle,
    /// Rapid shuffle
    Spinning,
    /// Shuffle past the slowing threshold
    Slowing,
    /// Final pick made, held before celebrating
    Result,
    /// Run completed
    Celebration,
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Idle
    }
}

impl Stage {
    /// A run is in flight and `start()` will be ignored
    pub fn is_active(&self) -> bool {
        matches!(self, Stage::Spinning | Stage::Slowing | Stage::Result)
    }

    /// Shuffle steps are still being issued
    pub fn is_shuffling(&self) -> bool {
        matches!(self, Stage::Spinning | Stage::Slowing)
    }
}

/// Why a `start()` call did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Nothing to randomize
    EmptyCandidates,
    /// Controller disabled by its owner
    Disabled,
    /// A run is already in flight
    AlreadyRunning,
    /// Weights are on and every item has weight 0
    NoSelectableWeight,
}

/// Outcome of `start()`; ignored starts are normal, not errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartOutcome {
    Started { generation: Generation, step_budget: u32 },
    Ignored(IgnoreReason),
}

impl StartOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, StartOutcome::Started { .. })
    }
}
