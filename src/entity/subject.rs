//! The simulated subject: everything one session mutates

use crate::actions::catalog::ActionCategory;
use crate::core::config::{TraitConfig, ViabilityConfig};
use crate::entity::affect::{Affect, Dimension};
use crate::entity::cues::CueSalience;
use crate::entity::habituation::HabituationRecord;
use crate::entity::history::ActionHistory;
use crate::entity::reserve::HedonicReserve;
use crate::entity::traits::Traits;
use serde::{Deserialize, Serialize};

/// A delayed after-effect waiting to be delivered by the decay step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAftereffect {
    pub dimension: Dimension,
    /// Total change still owed when the span started
    pub amount: f32,
    /// Hours left before delivery starts
    pub delay_remaining: f32,
    /// Hours of delivery left
    pub span_remaining: f32,
    /// Full delivery span, for spreading `amount` evenly
    pub span: f32,
}

impl PendingAftereffect {
    /// Advance by `hours`, returning the change delivered in that time
    pub fn advance(&mut self, hours: f32) -> f32 {
        let mut left = hours;
        if self.delay_remaining > 0.0 {
            let waited = self.delay_remaining.min(left);
            self.delay_remaining -= waited;
            left -= waited;
        }
        if left <= 0.0 || self.span_remaining <= 0.0 {
            return 0.0;
        }
        let step = self.span_remaining.min(left);
        self.span_remaining -= step;
        self.amount * step / self.span
    }

    pub fn is_spent(&self) -> bool {
        self.delay_remaining <= 0.0 && self.span_remaining <= 0.0
    }
}

/// Complete mutable state of one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub affect: Affect,
    pub traits: Traits,
    pub reserve: HedonicReserve,
    pub cues: CueSalience,
    pub habituation: HabituationRecord,
    pub history: ActionHistory,
    /// Category of the action that most recently pushed arousal up
    pub arousal_source: Option<ActionCategory>,
    pub aftereffects: Vec<PendingAftereffect>,
    /// Simulated hours since the session started or was reset
    pub clock_hours: f32,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            affect: Affect::default(),
            traits: Traits::default(),
            reserve: HedonicReserve::new(),
            cues: CueSalience::new(),
            habituation: HabituationRecord::new(),
            history: ActionHistory::new(),
            arousal_source: None,
            aftereffects: Vec::new(),
            clock_hours: 0.0,
        }
    }
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subject starting from a specific affect, with empty history
    pub fn with_affect(mut affect: Affect) -> Self {
        affect.clamp_all();
        Self {
            affect,
            ..Self::default()
        }
    }

    /// Subject created from traits, starting at its trait-adjusted state
    pub fn with_traits(traits: Traits, config: &TraitConfig) -> Self {
        Self {
            affect: traits.initial_affect(config),
            traits,
            ..Self::default()
        }
    }

    /// Whether the subject is still functional
    pub fn is_viable(&self, limits: &ViabilityConfig) -> bool {
        self.affect.energy > limits.min_energy
            && self.affect.hunger < limits.max_hunger
            && self.affect.sleepiness < limits.max_sleepiness
    }
}
