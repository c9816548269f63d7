//! List loading and the two reveal drivers

use crate::error::{CliError, CliResult};
use lotto_picker::{CandidateSet, Item, ListSnapshot, RandomSource};
use lotto_reveal::{
    ManualScheduler, RevealConfig, RevealController, RevealEvent, RevealObserver, Stage, StartOutcome,
    TokioScheduler,
};
use serde::Deserialize;
use std::path::Path;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Accepted list file layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum ListFile {
    Snapshot(ListSnapshot),
    Items(Vec<Item>),
}

/// A list file ready to pick from
#[derive(Debug, Clone)]
pub struct LoadedList {
    pub title: String,
    pub candidates: CandidateSet,
    /// Weighting preference stored with the list
    pub use_weights: bool,
}

/// Read either a saved list (`{"id", "title", "items", "useWeights"}`) or a
/// bare array of items
pub fn load_list(path: &Path) -> CliResult<LoadedList> {
    let text = std::fs::read_to_string(path)?;

    let list = match serde_json::from_str::<ListFile>(&text)? {
        ListFile::Snapshot(snapshot) => {
            if snapshot.is_archived {
                warn!("List {} is archived", snapshot.id);
            }
            LoadedList {
                title: snapshot.title.clone(),
                candidates: snapshot.candidates(),
                use_weights: snapshot.use_weights(),
            }
        }
        ListFile::Items(items) => LoadedList {
            title: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            candidates: CandidateSet::new(items),
            use_weights: false,
        },
    };

    info!("Loaded {} items from {}", list.candidates.len(), path.display());
    Ok(list)
}

fn started(outcome: StartOutcome) -> CliResult<()> {
    match outcome {
        StartOutcome::Started { step_budget, .. } => {
            debug!("Reveal started with {} steps", step_budget);
            Ok(())
        }
        StartOutcome::Ignored(reason) => Err(CliError::NotStarted(reason)),
    }
}

/// Run the whole reveal on a virtual clock, returning as soon as it is done
pub fn spin_instant<R, O>(
    config: RevealConfig,
    rng: R,
    candidates: CandidateSet,
    use_weights: bool,
    observer: O,
) -> CliResult<Item>
where
    R: RandomSource + Send + 'static,
    O: RevealObserver + 'static,
{
    let scheduler = ManualScheduler::new();
    let controller = RevealController::new(config, rng, scheduler.clone(), observer)?;
    controller.set_candidates(candidates, use_weights);
    started(controller.start())?;

    let fired = scheduler.run_until_idle();
    debug!("Instant reveal fired {} timers over {:?}", fired, scheduler.now());
    controller.selected().ok_or(CliError::NoSelection)
}

/// Run the reveal in real time on the tokio clock
pub async fn spin_live<R, F>(
    config: RevealConfig,
    rng: R,
    candidates: CandidateSet,
    use_weights: bool,
    mut on_event: F,
) -> CliResult<Item>
where
    R: RandomSource + Send + 'static,
    F: FnMut(&RevealEvent),
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = RevealController::new(config, rng, TokioScheduler::new(Handle::current()), tx)?;
    controller.set_candidates(candidates, use_weights);
    started(controller.start())?;

    while let Some(event) = rx.recv().await {
        on_event(&event);
        match event {
            RevealEvent::Celebrate { item, .. } => return Ok(item),
            RevealEvent::StageChanged {
                stage: Stage::Idle, ..
            } => break,
            _ => {}
        }
    }

    Err(CliError::NoSelection)
}
