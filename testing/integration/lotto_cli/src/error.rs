//! CLI error types

use lotto_picker::PickerError;
use lotto_reveal::{IgnoreReason, RevealError};
use thiserror::Error;

/// CLI errors
#[derive(Error, Debug)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// List file is not valid JSON
    #[error("Invalid list file: {0}")]
    Json(#[from] serde_json::Error),

    /// Selection failed
    #[error("Picker error: {0}")]
    Picker(#[from] PickerError),

    /// Reveal setup failed
    #[error("Reveal error: {0}")]
    Reveal(#[from] RevealError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// The controller refused to start a run
    #[error("Nothing to spin: {0:?}")]
    NotStarted(IgnoreReason),

    /// Reveal ended without a winner
    #[error("Reveal finished without a selection")]
    NoSelection,

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
