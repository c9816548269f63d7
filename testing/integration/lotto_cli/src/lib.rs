//! ListLotto command-line front end
//!
//! Loads a list file and runs quick picks, odds reports or the full
//! animated reveal from a terminal.

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod spin;

pub use config::Settings;
pub use error::{CliError, CliResult};
