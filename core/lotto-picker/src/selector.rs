//! Weighted random selection

use crate::errors::{PickerError, PickerResult};
use crate::item::{CandidateSet, Item};
use crate::random::{unit_interval, RandomSource};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Select one item.
///
/// Without weights every item has probability `1/N`. With weights item `i`
/// wins with probability `weight_i / total`: the draw `r` in `[0, total)` is
/// matched against the cumulative weights and the first prefix sum
/// exceeding `r` wins, so weight-0 items are never returned.
pub fn select<'a, R>(items: &'a [Item], use_weights: bool, rng: &mut R) -> PickerResult<&'a Item>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        return Err(PickerError::EmptyCandidateSet);
    }

    if !use_weights {
        return Ok(&items[rng.index_below(items.len())]);
    }

    let total: u64 = items.iter().map(|item| u64::from(item.weight)).sum();
    if total == 0 {
        return Err(PickerError::NoSelectableWeight {
            candidates: items.len(),
        });
    }

    let r = unit_interval(rng.next_f64()) * total as f64;
    let mut cumulative = 0u64;
    for item in items {
        cumulative += u64::from(item.weight);
        if cumulative as f64 > r {
            return Ok(item);
        }
    }

    // Only reachable through float rounding at the very top of the range
    items
        .iter()
        .rev()
        .find(|item| item.is_selectable())
        .ok_or(PickerError::NoSelectableWeight {
            candidates: items.len(),
        })
}

/// Quick-pick helper owning its random source
pub struct Picker<R> {
    rng: R,
}

impl<R: RandomSource> Picker<R> {
    /// Create new picker
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick one item from the set
    pub fn pick(&mut self, candidates: &CandidateSet, use_weights: bool) -> PickerResult<Item> {
        let item = select(candidates.items(), use_weights, &mut self.rng)?;
        info!("Picked {} ({}) from {} candidates", item.id, item.text, candidates.len());
        Ok(item.clone())
    }

    /// Draw `draws` times and count wins per item id
    pub fn tally(
        &mut self,
        candidates: &CandidateSet,
        use_weights: bool,
        draws: usize,
    ) -> PickerResult<BTreeMap<String, usize>> {
        let mut counts: BTreeMap<String, usize> =
            candidates.iter().map(|item| (item.id.clone(), 0)).collect();

        for _ in 0..draws {
            let item = select(candidates.items(), use_weights, &mut self.rng)?;
            *counts.entry(item.id.clone()).or_insert(0) += 1;
        }

        debug!("Tallied {} draws over {} candidates", draws, candidates.len());
        Ok(counts)
    }
}
