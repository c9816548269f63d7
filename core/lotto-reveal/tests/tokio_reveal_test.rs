//! Reveal runs on the tokio timer with paused time

use lotto_reveal::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::{timeout, Instant};

fn menu() -> CandidateSet {
    CandidateSet::new(vec![
        Item::new("a", "Pizza"),
        Item::new("b", "Tacos").with_weight(3),
        Item::new("c", "Sushi"),
    ])
}

#[tokio::test(start_paused = true)]
async fn test_full_run_on_tokio_timer() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = Arc::new(TokioScheduler::new(Handle::current()));
    let controller = RevealController::new(
        RevealConfig::default(),
        RngSource::seeded(42),
        Arc::clone(&scheduler),
        tx,
    )
    .unwrap();
    controller.set_candidates(menu(), true);

    let began = Instant::now();
    let budget = match controller.start() {
        StartOutcome::Started { step_budget, .. } => step_budget,
        other => panic!("run did not start: {:?}", other),
    };

    let mut displayed = 0;
    let mut completions = Vec::new();
    let celebrated = timeout(Duration::from_secs(60), async {
        while let Some(event) = rx.recv().await {
            match event {
                RevealEvent::DisplayChanged { .. } => displayed += 1,
                RevealEvent::SelectionComplete { item, .. } => completions.push(item),
                RevealEvent::Celebrate { item, plan, .. } => return Some((item, plan)),
                RevealEvent::StageChanged { .. } => {}
            }
        }
        None
    })
    .await
    .expect("run finished before the timeout")
    .expect("channel stayed open");

    let (winner, plan) = celebrated;
    assert_eq!(displayed, budget);
    assert_eq!(completions, vec![winner.clone()]);
    assert_eq!(plan, CelebrationPlan::default());
    assert_eq!(controller.selected(), Some(winner));
    assert_eq!(controller.stage(), Stage::Celebration);
    assert_eq!(scheduler.active_timers(), 0);

    // Budget-many shuffle delays of at least 80ms each plus the result pause
    let minimum = Duration::from_millis(80) * budget + Duration::from_millis(500);
    assert!(began.elapsed() >= minimum);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_tokio_timers() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scheduler = Arc::new(TokioScheduler::new(Handle::current()));
    let controller = RevealController::new(
        RevealConfig::default(),
        RngSource::seeded(7),
        Arc::clone(&scheduler),
        tx,
    )
    .unwrap();
    controller.set_candidates(menu(), false);

    assert!(controller.start().is_started());
    assert_eq!(scheduler.active_timers(), 1);

    tokio::time::sleep(Duration::from_millis(300)).await;
    controller.reset();
    assert_eq!(scheduler.active_timers(), 0);
    assert_eq!(controller.stage(), Stage::Idle);

    tokio::time::sleep(Duration::from_secs(10)).await;
    let mut trailing = Vec::new();
    while let Ok(event) = rx.try_recv() {
        trailing.push(event);
    }

    // Nothing arrives after the Idle transition
    let last = trailing.last().expect("events were emitted");
    assert_eq!(
        *last,
        RevealEvent::StageChanged {
            generation: 2,
            stage: Stage::Idle
        }
    );
    assert!(trailing
        .iter()
        .all(|event| !matches!(event, RevealEvent::SelectionComplete { .. })));
}
