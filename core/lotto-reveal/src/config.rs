//! Configuration for the reveal animation

use crate::errors::{RevealError, RevealResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reveal timing and step budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Shuffle steps every run performs
    pub base_steps: u32,

    /// Extra steps are drawn uniformly from `0..extra_steps`
    pub extra_steps: u32,

    /// Delay after the first, fastest steps
    pub min_delay_ms: u64,

    /// Delay before the final step
    pub max_delay_ms: u64,

    /// Progress above which the run counts as slowing down
    pub slowing_threshold: f64,

    /// Pause between the result and the celebration
    pub result_pause_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            base_steps: 15,
            extra_steps: 10,
            min_delay_ms: 80,
            max_delay_ms: 400,
            slowing_threshold: 0.7,
            result_pause_ms: 500,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl RevealConfig {
    /// Defaults overridden by `LISTLOTTO_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_steps: env_or("LISTLOTTO_BASE_STEPS", defaults.base_steps),
            extra_steps: env_or("LISTLOTTO_EXTRA_STEPS", defaults.extra_steps),
            min_delay_ms: env_or("LISTLOTTO_MIN_DELAY_MS", defaults.min_delay_ms),
            max_delay_ms: env_or("LISTLOTTO_MAX_DELAY_MS", defaults.max_delay_ms),
            slowing_threshold: env_or("LISTLOTTO_SLOWING_THRESHOLD", defaults.slowing_threshold),
            result_pause_ms: env_or("LISTLOTTO_RESULT_PAUSE_MS", defaults.result_pause_ms),
        }
    }

    pub fn validate(&self) -> RevealResult<()> {
        if self.base_steps == 0 {
            return Err(RevealError::InvalidConfig("base_steps must be at least 1".to_string()));
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(RevealError::InvalidConfig(format!(
                "min_delay_ms {} exceeds max_delay_ms {}",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.slowing_threshold) {
            return Err(RevealError::InvalidConfig(format!(
                "slowing_threshold {} outside [0, 1]",
                self.slowing_threshold
            )));
        }
        Ok(())
    }

    pub fn result_pause(&self) -> Duration {
        Duration::from_millis(self.result_pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Tests touching `LISTLOTTO_*` variables run one at a time
    static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

    const ENV_KEYS: [&str; 6] = [
        "LISTLOTTO_BASE_STEPS",
        "LISTLOTTO_EXTRA_STEPS",
        "LISTLOTTO_MIN_DELAY_MS",
        "LISTLOTTO_MAX_DELAY_MS",
        "LISTLOTTO_SLOWING_THRESHOLD",
        "LISTLOTTO_RESULT_PAUSE_MS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_from_env_overrides() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        std::env::set_var("LISTLOTTO_BASE_STEPS", "20");
        std::env::set_var("LISTLOTTO_SLOWING_THRESHOLD", "0.5");

        let config = RevealConfig::from_env();
        clear_env();

        assert_eq!(config.base_steps, 20);
        assert_eq!(config.slowing_threshold, 0.5);
        assert_eq!(config.extra_steps, 10);
        assert_eq!(config.max_delay_ms, 400);
    }

    #[test]
    fn test_from_env_ignores_unparsable_values() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        std::env::set_var("LISTLOTTO_BASE_STEPS", "lots");
        std::env::set_var("LISTLOTTO_SLOWING_THRESHOLD", "slow");
        std::env::set_var("LISTLOTTO_RESULT_PAUSE_MS", "-5");

        let config = RevealConfig::from_env();
        clear_env();

        assert_eq!(config, RevealConfig::default());
    }

    #[test]
    fn test_default_is_valid() {
        let config = RevealConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.result_pause(), Duration::from_millis(500));
    }

    #[test]
    fn test_validation_errors() {
        let config = RevealConfig {
            base_steps: 0,
            ..RevealConfig::default()
        };
        assert!(matches!(config.validate(), Err(RevealError::InvalidConfig(_))));

        let config = RevealConfig {
            min_delay_ms: 500,
            max_delay_ms: 100,
            ..RevealConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RevealConfig {
            slowing_threshold: 1.5,
            ..RevealConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
