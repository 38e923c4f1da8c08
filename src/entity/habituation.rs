//! Per-action exposure record
//!
//! Exposure builds each time an action is applied and fades with elapsed
//! simulated time for every action. The tolerance factor derived from it
//! shrinks absorbing effects of heavily used actions.
//!
//! The record also remembers the gains the most recent application landed
//! with. An immediate repeat of the same action never lands stronger than
//! that, so a streak of one action only ever weakens.

use crate::actions::catalog::ActionId;
use crate::core::config::ToleranceConfig;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Gains of the most recent application
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    pub action: ActionId,
    /// Multiplier the absorbing effects landed with
    pub gain: f32,
    /// Reserve multiplier the liking boost landed with
    pub hedonic: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabituationRecord {
    exposure: AHashMap<ActionId, f32>,
    streak: Option<Streak>,
}

impl HabituationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current exposure for an action (0.0 if never applied or fully faded)
    pub fn exposure(&self, action: ActionId) -> f32 {
        self.exposure.get(&action).copied().unwrap_or(0.0)
    }

    /// Multiplier in (0, 1] applied to the action's absorbing effects
    ///
    /// Approaches zero as exposure grows but never reaches it.
    pub fn tolerance_factor(&self, action: ActionId, config: &ToleranceConfig) -> f32 {
        1.0 / (1.0 + config.sensitivity * self.exposure(action))
    }

    /// Fade every exposure by `hours` of elapsed time
    pub fn decay(&mut self, hours: f32, config: &ToleranceConfig) {
        if hours <= 0.0 {
            return;
        }
        let retain = (-config.exposure_decay_rate * hours).exp();
        for value in self.exposure.values_mut() {
            *value *= retain;
        }
        self.exposure.retain(|_, v| *v >= config.forget_below);
    }

    /// Record one application of `action`
    pub fn record_use(&mut self, action: ActionId, config: &ToleranceConfig) {
        *self.exposure.entry(action).or_insert(0.0) += config.exposure_gain;
    }

    /// Whether every exposure has faded
    pub fn is_empty(&self) -> bool {
        self.exposure.is_empty()
    }

    /// Ceiling for `action` if it was also the most recent application
    pub fn streak(&self, action: ActionId) -> Option<Streak> {
        self.streak.filter(|s| s.action == action)
    }

    /// Remember the latest application; `None` breaks any streak
    pub fn set_streak(&mut self, streak: Option<Streak>) {
        self.streak = streak;
    }
}
