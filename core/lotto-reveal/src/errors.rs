//! Error types for the reveal controller

use lotto_picker::PickerError;
use thiserror::Error;

/// Reveal error types
#[derive(Error, Debug)]
pub enum RevealError {
    /// Configuration values out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Final selection failed
    #[error("Selection failed: {0}")]
    Picker(#[from] PickerError),
}

/// Result type for reveal operations
pub type RevealResult<T> = Result<T, RevealError>;
