//! Error types for item selection

use thiserror::Error;

/// Picker error types
#[derive(Error, Debug)]
pub enum PickerError {
    /// Selection was requested over an empty candidate set
    #[error("Invalid argument: candidate set is empty")]
    EmptyCandidateSet,

    /// Weighted selection over items that all carry weight 0
    #[error("No selectable weight: all {candidates} candidates have weight 0")]
    NoSelectableWeight { candidates: usize },

    /// Item id not present in the candidate set
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// List snapshot could not be decoded
    #[error("Invalid list snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for picker operations
pub type PickerResult<T> = Result<T, PickerError>;
