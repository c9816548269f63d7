//! Celebration effect description handed to the presentation layer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One confetti burst
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burst {
    pub particle_count: u32,
    /// Spread angle in degrees
    pub spread: u32,
    /// Offset from the start of the celebration
    pub delay_ms: u64,
}

impl Burst {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// What the presentation layer should fire when a run completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationPlan {
    pub bursts: Vec<Burst>,
    /// RGB hex colors
    pub palette: Vec<String>,
}

impl Default for CelebrationPlan {
    fn default() -> Self {
        let burst = |particle_count, spread, delay_ms| Burst {
            particle_count,
            spread,
            delay_ms,
        };

        Self {
            bursts: vec![burst(50, 60, 0), burst(30, 80, 200), burst(20, 100, 400)],
            palette: ["#4f46e5", "#7c3aed", "#ec4899", "#f59e0b", "#10b981"]
                .iter()
                .map(|color| color.to_string())
                .collect(),
        }
    }
}

impl CelebrationPlan {
    pub fn total_particles(&self) -> u32 {
        self.bursts.iter().map(|burst| burst.particle_count).sum()
    }

    /// Time until the last burst fires
    pub fn duration(&self) -> Duration {
        self.bursts
            .iter()
            .map(Burst::delay)
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_burst_sequence() {
        let plan = CelebrationPlan::default();
        assert_eq!(plan.bursts.len(), 3);
        assert_eq!(plan.total_particles(), 100);
        assert_eq!(plan.duration(), Duration::from_millis(400));
        assert!(plan.bursts.windows(2).all(|pair| pair[0].spread < pair[1].spread));
    }
}
