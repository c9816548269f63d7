//! Step budget and progressive slowdown

use crate::config::RevealConfig;
use lotto_picker::RandomSource;
use std::time::Duration;

/// Total shuffle steps for one run: base plus a random extra in `0..extra_steps`
pub fn step_budget<R: RandomSource + ?Sized>(config: &RevealConfig, rng: &mut R) -> u32 {
    let extra = if config.extra_steps == 0 {
        0
    } else {
        rng.index_below(config.extra_steps as usize) as u32
    };
    config.base_steps.saturating_add(extra)
}

/// Normalized progress through the step budget
pub fn progress(steps_taken: u32, budget: u32) -> f64 {
    if budget == 0 {
        return 1.0;
    }
    f64::from(steps_taken.min(budget)) / f64::from(budget)
}

/// Delay before the next step, easing quadratically from min to max delay
pub fn step_delay(config: &RevealConfig, progress: f64) -> Duration {
    let progress = progress.clamp(0.0, 1.0);
    let min = config.min_delay_ms as f64;
    let max = config.max_delay_ms as f64;
    let millis = min + (max - min) * progress * progress;
    Duration::from_micros((millis * 1000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_picker::ScriptedRandom;

    #[test]
    fn test_budget_range() {
        let config = RevealConfig::default();
        assert_eq!(step_budget(&config, &mut ScriptedRandom::constant(0.0)), 15);
        assert_eq!(step_budget(&config, &mut ScriptedRandom::constant(0.5)), 20);
        assert_eq!(step_budget(&config, &mut ScriptedRandom::constant(0.999)), 24);

        let fixed = RevealConfig {
            extra_steps: 0,
            ..RevealConfig::default()
        };
        assert_eq!(step_budget(&fixed, &mut ScriptedRandom::constant(0.999)), 15);
    }

    #[test]
    fn test_delay_endpoints() {
        let config = RevealConfig::default();
        assert_eq!(step_delay(&config, 0.0).as_millis(), 80);
        assert_eq!(step_delay(&config, 0.5).as_millis(), 160);
        assert_eq!(step_delay(&config, 1.0).as_millis(), 400);
        assert_eq!(step_delay(&config, 3.0).as_millis(), 400);
    }

    #[test]
    fn test_delay_non_decreasing() {
        let config = RevealConfig::default();
        for budget in 1..40 {
            let mut last = Duration::ZERO;
            for step in 1..=budget {
                let delay = step_delay(&config, progress(step, budget));
                assert!(delay >= last);
                last = delay;
            }
        }
    }
}
