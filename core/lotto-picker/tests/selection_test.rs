//! Property and integration tests for weighted selection

use lotto_picker::prelude::*;
use lotto_picker::odds;
use proptest::prelude::*;

fn arb_items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(0u32..20, 1..12).prop_map(|weights| {
        weights
            .into_iter()
            .enumerate()
            .map(|(i, weight)| Item {
                id: format!("id{}", i),
                text: format!("Option {}", i),
                weight,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn weighted_pick_has_positive_weight(items in arb_items(), draw in 0.0f64..1.0) {
        let mut rng = ScriptedRandom::constant(draw);
        match select(&items, true, &mut rng) {
            Ok(item) => {
                prop_assert!(item.weight > 0);
                prop_assert!(items.iter().any(|candidate| candidate.id == item.id));
            }
            Err(PickerError::NoSelectableWeight { candidates }) => {
                prop_assert_eq!(candidates, items.len());
                prop_assert!(items.iter().all(|item| item.weight == 0));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn uniform_pick_matches_index(items in arb_items(), draw in 0.0f64..1.0) {
        let mut rng = ScriptedRandom::constant(draw);
        let picked = select(&items, false, &mut rng).unwrap();
        let expected = ((draw * items.len() as f64).floor() as usize).min(items.len() - 1);
        prop_assert_eq!(&picked.id, &items[expected].id);
    }

    #[test]
    fn odds_sum_to_one(items in arb_items()) {
        let total: u32 = items.iter().map(|item| item.weight).sum();
        let sum: f64 = odds(&items, true).iter().map(|o| o.probability).sum();
        if total == 0 {
            prop_assert_eq!(sum, 0.0);
        } else {
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_list_snapshot_quick_pick() {
    let list = ListSnapshot::from_json(
        r#"{
            "id": "dinner",
            "title": "What's for dinner",
            "useWeights": true,
            "items": [
                {"id": "a", "text": "Pizza", "weight": 1},
                {"id": "b", "text": "Tacos", "weight": 3}
            ]
        }"#,
    )
    .unwrap();

    let mut picker = Picker::new(ScriptedRandom::constant(0.9));
    let item = picker.pick(&list.candidates(), list.use_weights()).unwrap();
    assert_eq!(item.text, "Tacos");
}
