//! Modifiers that scale an action's base effect
//!
//! Each function is a pure read of the current affect and the config. The
//! engine multiplies absorbing deltas by receptivity, tolerance and the
//! Yerkes-Dodson factor; carry-over feeds the base rule as an intensity, and
//! numbing flattens emotional deltas while the subject is shut down.
//! Appraisal decides whether the action lands at all.

use crate::actions::catalog::ActionCategory;
use crate::core::config::{
    AppraisalConfig, CarryoverConfig, ReceptivityConfig, ShutdownConfig, YerkesDodsonConfig,
};
use crate::entity::affect::{Affect, DIMENSION_MAX};
use crate::entity::traits::Traits;

/// Quadratic dampening past a threshold, reaching `floor` at the top of the range
pub fn dampen(value: f32, threshold: f32, floor: f32) -> f32 {
    if value <= threshold {
        return 1.0;
    }
    let excess = ((value - threshold) / (DIMENSION_MAX - threshold)).min(1.0);
    1.0 - (1.0 - floor) * excess * excess
}

/// Receptivity R in (0, 1]
pub fn receptivity(affect: &Affect, config: &ReceptivityConfig) -> f32 {
    let anxiety = dampen(affect.anxiety, config.anxiety_threshold, config.floor);
    let sleepiness = dampen(affect.sleepiness, config.sleepiness_threshold, config.floor);

    let shutdown_excess = ((affect.shutdown - config.shutdown_onset)
        / (DIMENSION_MAX - config.shutdown_onset))
        .clamp(0.0, 1.0);
    let shutdown = 1.0 - config.shutdown_max_dampening * shutdown_excess;

    anxiety * sleepiness * shutdown
}

/// Inverted-U multiplier over anxiety, peaking at `optimum`
///
/// The optimum is the configured one shifted by the subject's traits.
pub fn yerkes_dodson(anxiety: f32, optimum: f32, config: &YerkesDodsonConfig) -> f32 {
    let z = (anxiety - optimum) / config.width;
    config.floor + (config.peak - config.floor) * (-z * z).exp()
}

/// Residual arousal folded into the next action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carryover {
    /// Points of arousal misattributed to the incoming action
    pub carried: f32,
    /// Multiplier on the base rule's absorbing effects (>= 1)
    pub intensity: f32,
}

impl Carryover {
    pub const NONE: Carryover = Carryover {
        carried: 0.0,
        intensity: 1.0,
    };
}

/// Cross-domain carry-over for an action of `category`
///
/// Arousal left over from a different category is misread as coming from the
/// incoming action. Arousal from the same category, or without a known
/// source, carries nothing.
pub fn carryover(
    affect: &Affect,
    source: Option<ActionCategory>,
    category: ActionCategory,
    arousal_baseline: f32,
    config: &CarryoverConfig,
) -> Carryover {
    let Some(source) = source else {
        return Carryover::NONE;
    };
    if source == category {
        return Carryover::NONE;
    }

    let residual = affect.arousal - arousal_baseline;
    if residual <= config.residual_threshold {
        return Carryover::NONE;
    }

    let carried = residual * config.carried_fraction;
    Carryover {
        carried,
        intensity: 1.0 + carried * config.intensity_gain,
    }
}

/// Appraisal of an action of `category` in the current context
///
/// Ranges from `config.min` to 1. Negative means the action backfires.
pub fn appraisal(
    affect: &Affect,
    category: ActionCategory,
    traits: &Traits,
    config: &AppraisalConfig,
) -> f32 {
    let mut score = 1.0;

    match category {
        ActionCategory::Social => {
            score -= config.social_anxiety.above(affect.anxiety);
            score -= config.social_fatigue.below(affect.energy);
        }
        ActionCategory::Pain => {
            score -= config.pain_unaroused.below(affect.arousal);
            score += config.pain_absorption.above(affect.absorption);
            score -= config.pain_anxiety.above(affect.anxiety);
        }
        ActionCategory::Breathwork => score -= config.breathwork_anxiety.above(affect.anxiety),
        ActionCategory::Food => score -= config.food_anxiety.above(affect.anxiety),
        ActionCategory::Substance => score -= config.substance_anxiety.above(affect.anxiety),
        ActionCategory::Rest | ActionCategory::Stress => {}
    }

    if category != ActionCategory::Rest {
        score -= traits.stress_fraction() * config.life_stress_weight;
    }
    score -= config.shutdown.above(affect.shutdown);

    score.clamp(config.min, 1.0)
}

/// Multiplier on every non-shutdown emotional delta; 1.0 below the shutdown threshold
pub fn numbing(shutdown: f32, config: &ShutdownConfig) -> f32 {
    if shutdown < config.threshold {
        return 1.0;
    }
    let depth = ((shutdown - config.threshold) / (DIMENSION_MAX - config.threshold)).min(1.0);
    1.0 - config.numbing * depth
}
