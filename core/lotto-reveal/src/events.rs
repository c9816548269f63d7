//! Notifications emitted by the reveal controller

use crate::celebration::CelebrationPlan;
use crate::types::{Generation, Stage};
use lotto_picker::Item;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RevealEvent {
    /// Stage transition
    StageChanged { generation: Generation, stage: Stage },

    /// A shuffle step put a new candidate on display
    DisplayChanged {
        generation: Generation,
        item: Item,
        step: u32,
        stage: Stage,
    },

    /// Final weighted pick; fires exactly once per run
    SelectionComplete { generation: Generation, item: Item },

    /// Run reached `Celebration`
    Celebrate {
        generation: Generation,
        item: Item,
        plan: CelebrationPlan,
    },
}

impl RevealEvent {
    pub fn generation(&self) -> Generation {
        match self {
            RevealEvent::StageChanged { generation, .. }
            | RevealEvent::DisplayChanged { generation, .. }
            | RevealEvent::SelectionComplete { generation, .. }
            | RevealEvent::Celebrate { generation, .. } => *generation,
        }
    }
}

/// Receives controller events.
///
/// Called without the controller lock held, so implementations may call
/// back into the controller (e.g. `reset()` from a completion handler).
/// Events still queued for a run that was reset or restarted in the
/// meantime are not delivered.
pub trait RevealObserver: Send + Sync {
    fn on_event(&self, event: &RevealEvent);
}

impl<O: RevealObserver + ?Sized> RevealObserver for Arc<O> {
    fn on_event(&self, event: &RevealEvent) {
        (**self).on_event(event)
    }
}

/// Forwards events into a tokio channel; a closed receiver drops them
impl RevealObserver for UnboundedSender<RevealEvent> {
    fn on_event(&self, event: &RevealEvent) {
        let _ = self.send(event.clone());
    }
}

/// Ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RevealObserver for NoopObserver {
    fn on_event(&self, _event: &RevealEvent) {}
}

/// Adapts a closure into an observer
pub struct FnObserver<F>(pub F);

impl<F> RevealObserver for FnObserver<F>
where
    F: Fn(&RevealEvent) + Send + Sync,
{
    fn on_event(&self, event: &RevealEvent) {
        (self.0)(event)
    }
}

/// Keeps every event; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<RevealEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RevealEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Items shown by shuffle steps, in order
    pub fn displayed(&self) -> Vec<Item> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RevealEvent::DisplayChanged { item, .. } => Some(item.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RevealEvent::StageChanged { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> Vec<Item> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RevealEvent::SelectionComplete { item, .. } => Some(item.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn celebrations(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, RevealEvent::Celebrate { .. }))
            .count()
    }
}

impl RevealObserver for RecordingObserver {
    fn on_event(&self, event: &RevealEvent) {
        self.events.lock().push(event.clone());
    }
}
