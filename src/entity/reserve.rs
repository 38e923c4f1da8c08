//! Hedonic reserve
//!
//! Liking boosts draw on a finite pool. A drained pool weakens later boosts
//! and pulls the liking baseline down until time or sleep refills it.

use crate::core::config::ReserveConfig;
use serde::{Deserialize, Serialize};

/// Reserve level on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedonicReserve {
    level: f32,
}

impl Default for HedonicReserve {
    fn default() -> Self {
        Self { level: 100.0 }
    }
}

impl HedonicReserve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Multiplier on positive liking deltas: `floor_scale` when empty, 1 when full
    pub fn scale(&self, config: &ReserveConfig) -> f32 {
        config.floor_scale + (1.0 - config.floor_scale) * self.level / 100.0
    }

    /// Consume reserve for an authored liking boost of `points`
    pub fn draw(&mut self, points: f32, config: &ReserveConfig) {
        if points > 0.0 {
            self.level = (self.level - points * config.draw_per_point).max(0.0);
        }
    }

    /// Refill with elapsed time
    pub fn replenish(&mut self, hours: f32, config: &ReserveConfig) {
        if hours > 0.0 {
            self.level = (self.level + config.replenish_rate * hours).min(100.0);
        }
    }

    /// Refill from a restorative action
    pub fn restore(&mut self, config: &ReserveConfig) {
        self.level = (self.level + config.restore).min(100.0);
    }

    /// Liking baseline lowered by how drained the reserve is
    pub fn depress(&self, baseline: f32, config: &ReserveConfig) -> f32 {
        baseline * (1.0 - (1.0 - self.level / 100.0) * config.baseline_depression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reserve_is_neutral() {
        let reserve = HedonicReserve::new();
        let config = ReserveConfig::default();
        assert_eq!(reserve.scale(&config), 1.0);
        assert_eq!(reserve.depress(50.0, &config), 50.0);
    }

    #[test]
    fn test_draw_weakens_boosts_down_to_floor() {
        let mut reserve = HedonicReserve::new();
        let config = ReserveConfig::default();

        reserve.draw(20.0, &config);
        assert_eq!(reserve.level(), 90.0);
        assert!(reserve.scale(&config) < 1.0);

        reserve.draw(1000.0, &config);
        assert_eq!(reserve.level(), 0.0);
        assert!((reserve.scale(&config) - 0.15).abs() < 1e-6);
        assert!((reserve.depress(50.0, &config) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_boost_draws_nothing() {
        let mut reserve = HedonicReserve::new();
        reserve.draw(-10.0, &ReserveConfig::default());
        assert_eq!(reserve.level(), 100.0);
    }

    #[test]
    fn test_refills_are_capped() {
        let mut reserve = HedonicReserve::new();
        let config = ReserveConfig::default();
        reserve.draw(100.0, &config);

        reserve.replenish(2.0, &config);
        assert_eq!(reserve.level(), 60.0);
        reserve.restore(&config);
        assert_eq!(reserve.level(), 100.0);
    }
}
