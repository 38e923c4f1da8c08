//! Fixed traits of a subject
//!
//! Traits are set once when a subject is created and never change during a
//! session. They shift the starting state, the homeostatic baselines and the
//! anxiety level at which pleasure peaks.

use crate::core::config::TraitConfig;
use crate::core::error::{Result, SimError};
use crate::entity::affect::{clamp_dimension, Affect, Dimension};
use serde::{Deserialize, Serialize};

/// Trait values, each on a 0-100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Traits {
    /// 50 is the population mean
    pub testosterone: f32,
    /// Psychiatric medication dose
    pub ssri: f32,
    /// Background chronic stress
    pub life_stress: f32,
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            testosterone: 50.0,
            ssri: 0.0,
            life_stress: 0.0,
        }
    }
}

impl Traits {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("testosterone", self.testosterone),
            ("ssri", self.ssri),
            ("life_stress", self.life_stress),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(SimError::Validation(format!(
                    "trait {} ({}) must be within [0, 100]",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// -1 at testosterone 0, 0 at the mean, +1 at 100
    pub fn testosterone_offset(&self) -> f32 {
        self.testosterone / 50.0 - 1.0
    }

    pub fn ssri_fraction(&self) -> f32 {
        self.ssri / 100.0
    }

    pub fn stress_fraction(&self) -> f32 {
        self.life_stress / 100.0
    }

    /// Starting state: the default affect shifted by testosterone
    pub fn initial_affect(&self, config: &TraitConfig) -> Affect {
        let offset = self.testosterone_offset();
        let mut affect = Affect::default();
        affect.add(Dimension::Arousal, offset * config.testosterone_initial_arousal);
        affect.add(Dimension::Energy, offset * config.testosterone_initial_energy);
        affect.add(Dimension::Anxiety, offset * config.testosterone_initial_anxiety);
        affect
    }

    /// A homeostatic baseline moved by these traits
    pub fn shift_baseline(&self, dimension: Dimension, baseline: f32, config: &TraitConfig) -> f32 {
        let shift = match dimension {
            Dimension::Arousal => self.testosterone_offset() * config.testosterone_arousal_baseline,
            Dimension::Anxiety => {
                self.testosterone_offset() * config.testosterone_anxiety_baseline
                    + self.ssri_fraction() * config.ssri_anxiety_baseline
                    + self.stress_fraction() * config.stress_anxiety_baseline
            }
            Dimension::Absorption => self.stress_fraction() * config.stress_absorption_baseline,
            _ => 0.0,
        };
        clamp_dimension(baseline + shift)
    }

    /// Anxiety level of peak pleasure for this subject
    ///
    /// Kept within the configured range, widened to include `base` so that
    /// neutral traits never move a configured optimum.
    pub fn yerkes_dodson_optimum(&self, base: f32, config: &TraitConfig) -> f32 {
        let shifted = base
            + self.testosterone_offset() * config.testosterone_optimum_shift
            + self.ssri_fraction() * config.ssri_optimum_shift;
        shifted.clamp(config.optimum_min.min(base), config.optimum_max.max(base))
    }
}
