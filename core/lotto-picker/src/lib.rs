//! ListLotto picker
//!
//! Item model and weighted random selection for ListLotto lists,
//! with an injectable random source so draws can be replayed in tests.

pub mod errors;
pub mod item;
pub mod odds;
pub mod random;
pub mod selector;

pub use errors::{PickerError, PickerResult};
pub use item::{CandidateSet, Item, ListSnapshot, DEFAULT_WEIGHT};
pub use odds::{adjust_weight, display_emphasis, is_boosted, odds, reset_weights, Odds};
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use selector::{select, Picker};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        select, CandidateSet, Item, ListSnapshot, Picker, PickerError, PickerResult, RandomSource,
        RngSource, ScriptedRandom,
    };
}
