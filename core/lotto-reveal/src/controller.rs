//! Reveal controller: the spin-then-pick state machine
//!
//! A run walks `Idle -> Spinning -> Slowing -> Result -> Celebration`.
//! Each shuffle step shows a uniformly sampled candidate and schedules the
//! next one with a growing delay; once the step budget is spent the true
//! weighted pick is made and, after a short pause, the run celebrates.
//!
//! Every scheduled callback carries the generation of the run that created
//! it. `start()` and `reset()` bump the generation, so a callback from an
//! earlier run is discarded on arrival even if the scheduler failed to
//! cancel it.

use crate::celebration::CelebrationPlan;
use crate::config::RevealConfig;
use crate::errors::RevealResult;
use crate::events::{RevealEvent, RevealObserver};
use crate::presentation;
use crate::run_state::RunState;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::timing;
use crate::types::{Generation, IgnoreReason, Stage, StartOutcome};
use lotto_picker::{select, CandidateSet, Item, RandomSource};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What a scheduled callback does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Step,
    Celebrate,
}

struct Inner<R> {
    config: RevealConfig,
    celebration: CelebrationPlan,
    rng: R,
    /// Candidates for the next run
    candidates: CandidateSet,
    use_weights: bool,
    disabled: bool,
    /// Candidates frozen for the current run
    snapshot: CandidateSet,
    run: RunState,
}

impl<R> Inner<R> {
    fn start_blocker(&self) -> Option<IgnoreReason> {
        if self.disabled {
            Some(IgnoreReason::Disabled)
        } else if self.run.stage.is_active() {
            Some(IgnoreReason::AlreadyRunning)
        } else if self.candidates.is_empty() {
            Some(IgnoreReason::EmptyCandidates)
        } else if self.use_weights && !self.candidates.has_selectable_weight() {
            Some(IgnoreReason::NoSelectableWeight)
        } else {
            None
        }
    }
}

struct Shared<R, S> {
    state: Mutex<Inner<R>>,
    scheduler: S,
    observer: Arc<dyn RevealObserver>,
}

impl<R, S> Shared<R, S> {
    /// Deliver a batch, skipping events from a run superseded while the
    /// batch was in flight (e.g. an observer resetting mid-batch)
    fn dispatch(&self, events: Vec<RevealEvent>) {
        for event in &events {
            let current = self.state.lock().run.generation;
            if event.generation() != current {
                debug!("Dropping {:?} from run {} (current run {})", event, event.generation(), current);
                continue;
            }
            self.observer.on_event(event);
        }
    }
}

/// Handle to a reveal state machine; clones drive the same machine
pub struct RevealController<R, S> {
    shared: Arc<Shared<R, S>>,
}

impl<R, S> Clone for RevealController<R, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R, S> RevealController<R, S>
where
    R: RandomSource + Send + 'static,
    S: Scheduler + 'static,
{
    /// Create controller with no candidates assigned
    pub fn new<O>(config: RevealConfig, rng: R, scheduler: S, observer: O) -> RevealResult<Self>
    where
        O: RevealObserver + 'static,
    {
        config.validate()?;

        let inner = Inner {
            config,
            celebration: CelebrationPlan::default(),
            rng,
            candidates: CandidateSet::default(),
            use_weights: false,
            disabled: false,
            snapshot: CandidateSet::default(),
            run: RunState::default(),
        };

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(inner),
                scheduler,
                observer: Arc::new(observer),
            }),
        })
    }

    /// Assign candidates for the next run; a run in flight keeps its own
    pub fn set_candidates(&self, candidates: CandidateSet, use_weights: bool) {
        let mut inner = self.shared.state.lock();
        debug!(
            "Assigned {} candidates (weights {})",
            candidates.len(),
            if use_weights { "on" } else { "off" }
        );
        inner.candidates = candidates;
        inner.use_weights = use_weights;
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.shared.state.lock().disabled = disabled;
    }

    /// Begin a run. Ignored while disabled, while a run is active, or when
    /// there is nothing to pick from.
    pub fn start(&self) -> StartOutcome {
        let mut events = Vec::new();

        let outcome = {
            let mut guard = self.shared.state.lock();
            let inner = &mut *guard;

            if let Some(reason) = inner.start_blocker() {
                warn!("Ignoring start: {:?}", reason);
                return StartOutcome::Ignored(reason);
            }

            if let Some(handle) = inner.run.pending.take() {
                self.shared.scheduler.cancel(handle);
            }
            inner.run.clear();
            inner.run.generation += 1;

            inner.snapshot = inner.candidates.clone();
            inner.run.use_weights = inner.use_weights;
            inner.run.step_budget = timing::step_budget(&inner.config, &mut inner.rng);
            inner.run.stage = Stage::Spinning;

            let generation = inner.run.generation;
            let step_budget = inner.run.step_budget;
            info!(
                "Starting run {} over {} candidates with {} shuffle steps",
                generation,
                inner.snapshot.len(),
                step_budget
            );

            events.push(RevealEvent::StageChanged {
                generation,
                stage: Stage::Spinning,
            });
            Self::step(&self.shared, inner, &mut events);

            StartOutcome::Started {
                generation,
                step_budget,
            }
        };

        self.shared.dispatch(events);
        outcome
    }

    /// Abandon the current run and return to `Idle`
    pub fn reset(&self) {
        let mut events = Vec::new();

        {
            let mut guard = self.shared.state.lock();
            let inner = &mut *guard;
            if inner.run.stage == Stage::Idle {
                return;
            }

            if let Some(handle) = inner.run.pending.take() {
                self.shared.scheduler.cancel(handle);
            }
            let previous = inner.run.stage;
            inner.run.clear();
            inner.run.generation += 1;
            debug!("Reset from {:?}, now at generation {}", previous, inner.run.generation);

            events.push(RevealEvent::StageChanged {
                generation: inner.run.generation,
                stage: Stage::Idle,
            });
        }

        self.shared.dispatch(events);
    }

    pub fn run_state(&self) -> RunState {
        self.shared.state.lock().run.clone()
    }

    pub fn stage(&self) -> Stage {
        self.shared.state.lock().run.stage
    }

    pub fn displayed(&self) -> Option<Item> {
        self.shared.state.lock().run.displayed.clone()
    }

    pub fn selected(&self) -> Option<Item> {
        self.shared.state.lock().run.selected.clone()
    }

    pub fn is_running(&self) -> bool {
        self.stage().is_active()
    }

    pub fn config(&self) -> RevealConfig {
        self.shared.state.lock().config.clone()
    }

    /// Label for the start/repeat control in the current state
    pub fn control_label(&self) -> &'static str {
        let inner = self.shared.state.lock();
        presentation::control_label(
            inner.run.stage,
            inner.candidates.len(),
            inner.run.selected.is_some(),
        )
    }

    fn schedule(shared: &Arc<Shared<R, S>>, delay: Duration, generation: Generation, tick: Tick) -> TimerHandle {
        let weak: Weak<Shared<R, S>> = Arc::downgrade(shared);
        shared.scheduler.schedule_after(
            delay,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Self::on_timer(&shared, generation, tick);
                }
            }),
        )
    }

    fn on_timer(shared: &Arc<Shared<R, S>>, generation: Generation, tick: Tick) {
        let mut events = Vec::new();

        {
            let mut guard = shared.state.lock();
            let inner = &mut *guard;

            if inner.run.generation != generation {
                debug!(
                    "Discarding stale {:?} from run {} (current run {})",
                    tick, generation, inner.run.generation
                );
                return;
            }
            inner.run.pending = None;

            match tick {
                Tick::Step if inner.run.stage.is_shuffling() => Self::step(shared, inner, &mut events),
                Tick::Celebrate if inner.run.stage == Stage::Result => Self::celebrate(inner, &mut events),
                _ => debug!("Ignoring {:?} in stage {:?}", tick, inner.run.stage),
            }
        }

        shared.dispatch(events);
    }

    /// One shuffle step, or finalization once the budget is spent
    fn step(shared: &Arc<Shared<R, S>>, inner: &mut Inner<R>, events: &mut Vec<RevealEvent>) {
        if inner.run.budget_exhausted() {
            Self::finalize(shared, inner, events);
            return;
        }

        let generation = inner.run.generation;
        let index = inner.rng.index_below(inner.snapshot.len());
        let item = inner.snapshot.items()[index].clone();

        inner.run.displayed = Some(item.clone());
        inner.run.steps_taken += 1;
        events.push(RevealEvent::DisplayChanged {
            generation,
            item,
            step: inner.run.steps_taken,
            stage: inner.run.stage,
        });

        let progress = inner.run.progress();
        if progress > inner.config.slowing_threshold && inner.run.stage == Stage::Spinning {
            inner.run.stage = Stage::Slowing;
            events.push(RevealEvent::StageChanged {
                generation,
                stage: Stage::Slowing,
            });
        }

        let delay = timing::step_delay(&inner.config, progress);
        debug!(
            "Run {} step {}/{} next in {:?}",
            generation, inner.run.steps_taken, inner.run.step_budget, delay
        );
        inner.run.pending = Some(Self::schedule(shared, delay, generation, Tick::Step));
    }

    fn final_pick(inner: &mut Inner<R>) -> RevealResult<Item> {
        let item = select(inner.snapshot.items(), inner.run.use_weights, &mut inner.rng)?;
        Ok(item.clone())
    }

    fn finalize(shared: &Arc<Shared<R, S>>, inner: &mut Inner<R>, events: &mut Vec<RevealEvent>) {
        let generation = inner.run.generation;

        let item = match Self::final_pick(inner) {
            Ok(item) => item,
            Err(err) => {
                error!("Final selection for run {} failed: {}", generation, err);
                inner.run.clear();
                inner.run.generation += 1;
                events.push(RevealEvent::StageChanged {
                    generation: inner.run.generation,
                    stage: Stage::Idle,
                });
                return;
            }
        };

        info!(
            "Run {} selected {} ({}) after {} steps",
            generation, item.id, item.text, inner.run.steps_taken
        );
        inner.run.displayed = Some(item.clone());
        inner.run.selected = Some(item.clone());
        inner.run.stage = Stage::Result;

        events.push(RevealEvent::StageChanged {
            generation,
            stage: Stage::Result,
        });
        events.push(RevealEvent::SelectionComplete { generation, item });

        let pause = inner.config.result_pause();
        inner.run.pending = Some(Self::schedule(shared, pause, generation, Tick::Celebrate));
    }

    fn celebrate(inner: &mut Inner<R>, events: &mut Vec<RevealEvent>) {
        let generation = inner.run.generation;
        inner.run.stage = Stage::Celebration;
        events.push(RevealEvent::StageChanged {
            generation,
            stage: Stage::Celebration,
        });

        if let Some(item) = inner.run.selected.clone() {
            events.push(RevealEvent::Celebrate {
                generation,
                item,
                plan: inner.celebration.clone(),
            });
        }
    }
}
