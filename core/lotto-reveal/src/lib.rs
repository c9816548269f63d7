//! ListLotto reveal
//!
//! Animated selection for ListLotto: a timer-driven state machine that
//! shuffles through candidates with a progressive slowdown before making
//! the final weighted pick and signalling the celebration.

pub mod celebration;
pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod presentation;
pub mod run_state;
pub mod scheduler;
pub mod timing;
pub mod tokio_scheduler;
pub mod types;

pub use celebration::{Burst, CelebrationPlan};
pub use config::RevealConfig;
pub use controller::RevealController;
pub use errors::{RevealError, RevealResult};
pub use events::{FnObserver, NoopObserver, RecordingObserver, RevealEvent, RevealObserver};
pub use run_state::RunState;
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerHandle};
pub use tokio_scheduler::TokioScheduler;
pub use types::{Generation, IgnoreReason, Stage, StartOutcome};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CelebrationPlan, ManualScheduler, RecordingObserver, RevealConfig, RevealController, RevealEvent,
        RevealObserver, RunState, Scheduler, Stage, StartOutcome, TokioScheduler,
    };
    pub use lotto_picker::prelude::*;
}
