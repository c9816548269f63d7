//! List items, candidate sets and list snapshots

use crate::errors::{PickerError, PickerResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Weight every item starts with
pub const DEFAULT_WEIGHT: u32 = 1;

fn default_weight() -> u32 {
    DEFAULT_WEIGHT
}

/// A single list entry eligible for selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id
    pub id: String,

    /// Display text
    pub text: String,

    /// Relative selection weight; 0 only arrives from raw input and is never picked
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl Item {
    /// Create item with the default weight
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Set weight, clamped to at least 1
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight.max(DEFAULT_WEIGHT);
        self
    }

    /// Whether the weighted draw can ever return this item
    pub fn is_selectable(&self) -> bool {
        self.weight > 0
    }
}

/// Ordered, immutable snapshot of the items eligible for one run.
///
/// Cloning is cheap: runs share the same backing slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Item>", into = "Vec<Item>")]
pub struct CandidateSet {
    items: Arc<[Item]>,
}

impl CandidateSet {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Decode a JSON array of items
    pub fn from_json(json: &str) -> PickerResult<Self> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Look up an item by id
    pub fn get(&self, id: &str) -> PickerResult<&Item> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| PickerError::UnknownItem(id.to_string()))
    }

    /// Sum of all item weights
    pub fn total_weight(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.weight)).sum()
    }

    /// At least one item can win a weighted draw
    pub fn has_selectable_weight(&self) -> bool {
        self.items.iter().any(Item::is_selectable)
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Item>> for CandidateSet {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl From<CandidateSet> for Vec<Item> {
    fn from(set: CandidateSet) -> Self {
        set.items.to_vec()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Read-only view of a stored list, as handed over by the list editor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
    /// When true, item weights affect randomization
    #[serde(default)]
    pub use_weights: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl ListSnapshot {
    pub fn from_json(json: &str) -> PickerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn candidates(&self) -> CandidateSet {
        CandidateSet::new(self.items.clone())
    }

    pub fn use_weights(&self) -> bool {
        self.use_weights
    }
}
