//! Selection odds and weight editing helpers

use crate::item::{Item, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};

/// Largest display scale applied to the heaviest item
const MAX_EMPHASIS: f64 = 1.4;

/// Chance of a single item winning one draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    pub id: String,
    pub weight: u32,
    /// Probability in `[0, 1]`
    pub probability: f64,
    /// Same probability as a percentage
    pub percent: f64,
}

/// Per-item win probabilities, in candidate order
pub fn odds(items: &[Item], use_weights: bool) -> Vec<Odds> {
    let total: u64 = items.iter().map(|item| u64::from(item.weight)).sum();

    items
        .iter()
        .map(|item| {
            let probability = if use_weights {
                if total == 0 {
                    0.0
                } else {
                    f64::from(item.weight) / total as f64
                }
            } else {
                1.0 / items.len() as f64
            };

            Odds {
                id: item.id.clone(),
                weight: item.weight,
                probability,
                percent: probability * 100.0,
            }
        })
        .collect()
}

/// Weights are on and the item is heavier than the default
pub fn is_boosted(item: &Item, use_weights: bool) -> bool {
    use_weights && item.weight > DEFAULT_WEIGHT
}

/// Display scale for an item: 1.0 at weight 1 up to 1.4 at the heaviest weight
pub fn display_emphasis(item: &Item, items: &[Item], use_weights: bool) -> f64 {
    if !use_weights {
        return 1.0;
    }

    let max_weight = items
        .iter()
        .map(|candidate| candidate.weight)
        .max()
        .unwrap_or(DEFAULT_WEIGHT);
    if max_weight <= DEFAULT_WEIGHT {
        return 1.0;
    }

    let weight = item.weight.clamp(DEFAULT_WEIGHT, max_weight);
    let span = f64::from(max_weight - DEFAULT_WEIGHT);
    1.0 + f64::from(weight - DEFAULT_WEIGHT) / span * (MAX_EMPHASIS - 1.0)
}

/// Change an item's weight by `delta`, never going below 1
pub fn adjust_weight(item: &mut Item, delta: i64) -> u32 {
    let adjusted = (i64::from(item.weight) + delta).clamp(i64::from(DEFAULT_WEIGHT), i64::from(u32::MAX));
    item.weight = adjusted as u32;
    item.weight
}

/// Put every item back to the default weight
pub fn reset_weights(items: &mut [Item]) {
    for item in items.iter_mut() {
        item.weight = DEFAULT_WEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Item> {
        vec![
            Item::new("a", "Pizza"),
            Item::new("b", "Tacos").with_weight(3),
            Item::new("c", "Sushi").with_weight(5),
        ]
    }

    #[test]
    fn test_weighted_odds() {
        let odds = odds(&sample(), true);
        let total: f64 = odds.iter().map(|o| o.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!((odds[1].percent - 100.0 * 3.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_odds_ignore_weights() {
        for o in odds(&sample(), false) {
            assert!((o.probability - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_emphasis_range() {
        let items = sample();
        assert_eq!(display_emphasis(&items[0], &items, true), 1.0);
        assert!((display_emphasis(&items[1], &items, true) - 1.2).abs() < 1e-9);
        assert!((display_emphasis(&items[2], &items, true) - 1.4).abs() < 1e-9);
        assert_eq!(display_emphasis(&items[2], &items, false), 1.0);

        assert!(is_boosted(&items[1], true));
        assert!(!is_boosted(&items[0], true));
        assert!(!is_boosted(&items[1], false));
    }

    #[test]
    fn test_weight_editing_keeps_minimum() {
        let mut items = sample();
        assert_eq!(adjust_weight(&mut items[0], -1), 1);
        assert_eq!(adjust_weight(&mut items[1], 2), 5);
        assert_eq!(adjust_weight(&mut items[1], -10), 1);

        reset_weights(&mut items);
        assert!(items.iter().all(|item| item.weight == 1));
    }
}
