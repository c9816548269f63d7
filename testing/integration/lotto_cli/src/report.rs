//! Terminal output for picks, tallies and reveals

use lotto_picker::{is_boosted, odds, CandidateSet, Odds};
use lotto_reveal::RevealEvent;
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the odds table
#[derive(Debug, Clone, Serialize)]
pub struct OddsRow {
    pub text: String,
    #[serde(flatten)]
    pub odds: Odds,
    pub boosted: bool,
}

pub fn odds_rows(candidates: &CandidateSet, use_weights: bool) -> Vec<OddsRow> {
    candidates
        .iter()
        .zip(odds(candidates.items(), use_weights))
        .map(|(item, odds)| OddsRow {
            text: item.text.clone(),
            odds,
            boosted: is_boosted(item, use_weights),
        })
        .collect()
}

pub fn odds_text(rows: &[OddsRow]) -> String {
    let width = rows.iter().map(|row| row.text.len()).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let marker = if row.boosted { " *" } else { "" };
            format!(
                "{:<width$}  x{:<3} {:>6.2}%{}\n",
                row.text,
                row.odds.weight,
                row.odds.percent,
                marker,
                width = width
            )
        })
        .collect()
}

/// Win counts per item with the observed share of `draws`
pub fn tally_text(candidates: &CandidateSet, counts: &BTreeMap<String, usize>, draws: usize) -> String {
    let width = candidates.iter().map(|item| item.text.len()).max().unwrap_or(0);
    candidates
        .iter()
        .map(|item| {
            let count = counts.get(&item.id).copied().unwrap_or(0);
            let share = if draws == 0 {
                0.0
            } else {
                count as f64 * 100.0 / draws as f64
            };
            format!("{:<width$}  {:>8}  {:>6.2}%\n", item.text, count, share, width = width)
        })
        .collect()
}

/// Line to print for a reveal event, if any
pub fn describe_event(event: &RevealEvent) -> Option<String> {
    match event {
        RevealEvent::StageChanged { stage, .. } => stage.status_message().map(str::to_string),
        RevealEvent::DisplayChanged { item, step, .. } => Some(format!("  [{:>2}] {}", step, item.text)),
        RevealEvent::SelectionComplete { item, .. } => Some(format!("Selected: {}", item.text)),
        RevealEvent::Celebrate { plan, .. } => Some(format!(
            "Celebrating with {} particles in {} bursts",
            plan.total_particles(),
            plan.bursts.len()
        )),
    }
}
