//! CLI configuration

use crate::error::CliResult;
use config::{Config, Environment, File};
use lotto_reveal::RevealConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reveal pacing
    pub reveal: RevealConfig,

    /// Fixed seed for reproducible draws
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::from_env(),
            seed: None,
        }
    }
}

/// Bottom layer: pacing from `LISTLOTTO_*` variables and built-in defaults
#[derive(Serialize)]
struct EnvDefaults {
    reveal: RevealConfig,
}

impl Settings {
    /// Load settings in increasing precedence: `RevealConfig::from_env()`,
    /// the optional file, then `LISTLOTTO__*` variables
    /// (e.g. `LISTLOTTO__REVEAL__BASE_STEPS=20`, `LISTLOTTO__SEED=7`)
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let defaults = Config::try_from(&EnvDefaults {
            reveal: RevealConfig::from_env(),
        })?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = path {
            debug!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix("LISTLOTTO").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.reveal.validate()?;
        Ok(settings)
    }
}
