//! Bounded affective dimensions of the simulated subject

use crate::core::error::SimError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Lower bound of every dimension
pub const DIMENSION_MIN: f32 = 0.0;
/// Upper bound of every dimension
pub const DIMENSION_MAX: f32 = 100.0;

/// Named affective dimensions
///
/// The first six are published to the boundary; the rest are internal
/// extension dimensions that feed modifier computation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    #[display(fmt = "liking_score")]
    LikingScore,
    #[display(fmt = "anxiety")]
    Anxiety,
    #[display(fmt = "energy")]
    Energy,
    #[display(fmt = "arousal")]
    Arousal,
    #[display(fmt = "sleepiness")]
    Sleepiness,
    #[display(fmt = "shutdown")]
    Shutdown,
    #[display(fmt = "absorption")]
    Absorption,
    #[display(fmt = "hunger")]
    Hunger,
    #[display(fmt = "prefrontal")]
    Prefrontal,
}

impl Dimension {
    pub const COUNT: usize = 9;

    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::LikingScore,
        Dimension::Anxiety,
        Dimension::Energy,
        Dimension::Arousal,
        Dimension::Sleepiness,
        Dimension::Shutdown,
        Dimension::Absorption,
        Dimension::Hunger,
        Dimension::Prefrontal,
    ];

    /// Dimensions every boundary consumer can rely on
    pub const PUBLISHED: [Dimension; 6] = [
        Dimension::LikingScore,
        Dimension::Anxiety,
        Dimension::Energy,
        Dimension::Arousal,
        Dimension::Sleepiness,
        Dimension::Shutdown,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Dimension {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.to_string() == s)
            .ok_or_else(|| SimError::Validation(format!("unknown dimension '{}'", s)))
    }
}

/// Current value of every dimension, each within [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affect {
    /// Hedonic wellbeing, how good things feel right now
    pub liking_score: f32,
    /// 0 = calm, 100 = panic
    pub anxiety: f32,
    /// 0 = exhausted, 100 = fully rested
    pub energy: f32,
    /// Physiological activation (heart rate, alertness of the body)
    pub arousal: f32,
    /// 0 = alert, 100 = falling asleep
    pub sleepiness: f32,
    /// 0 = responsive, 100 = full collapse; flattens everything else
    pub shutdown: f32,
    /// 0 = self-aware, 100 = fully immersed in the experience
    pub absorption: f32,
    /// 0 = full, 100 = starving
    pub hunger: f32,
    /// Executive control; low values mean hypofrontality
    pub prefrontal: f32,
}

impl Default for Affect {
    fn default() -> Self {
        Self {
            liking_score: 50.0,
            anxiety: 30.0,
            energy: 70.0,
            arousal: 20.0,
            sleepiness: 20.0,
            shutdown: 0.0,
            absorption: 30.0,
            hunger: 20.0,
            prefrontal: 50.0,
        }
    }
}

impl Affect {
    pub fn get(&self, dimension: Dimension) -> f32 {
        match dimension {
            Dimension::LikingScore => self.liking_score,
            Dimension::Anxiety => self.anxiety,
            Dimension::Energy => self.energy,
            Dimension::Arousal => self.arousal,
            Dimension::Sleepiness => self.sleepiness,
            Dimension::Shutdown => self.shutdown,
            Dimension::Absorption => self.absorption,
            Dimension::Hunger => self.hunger,
            Dimension::Prefrontal => self.prefrontal,
        }
    }

    fn slot(&mut self, dimension: Dimension) -> &mut f32 {
        match dimension {
            Dimension::LikingScore => &mut self.liking_score,
            Dimension::Anxiety => &mut self.anxiety,
            Dimension::Energy => &mut self.energy,
            Dimension::Arousal => &mut self.arousal,
            Dimension::Sleepiness => &mut self.sleepiness,
            Dimension::Shutdown => &mut self.shutdown,
            Dimension::Absorption => &mut self.absorption,
            Dimension::Hunger => &mut self.hunger,
            Dimension::Prefrontal => &mut self.prefrontal,
        }
    }

    /// Set a dimension, clamping into range
    pub fn set(&mut self, dimension: Dimension, value: f32) {
        *self.slot(dimension) = clamp_dimension(value);
    }

    /// Add a delta to a dimension, clamping into range
    pub fn add(&mut self, dimension: Dimension, delta: f32) {
        let slot = self.slot(dimension);
        *slot = clamp_dimension(*slot + delta);
    }

    /// Clamp every dimension (guards against values written directly to fields)
    pub fn clamp_all(&mut self) {
        for dimension in Dimension::ALL {
            let slot = self.slot(dimension);
            *slot = clamp_dimension(*slot);
        }
    }

    pub fn in_range(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|&d| (DIMENSION_MIN..=DIMENSION_MAX).contains(&self.get(d)))
    }

    /// The dimensions a boundary client sees, in declaration order
    pub fn published(&self) -> BTreeMap<Dimension, f32> {
        Dimension::PUBLISHED.into_iter().map(|d| (d, self.get(d))).collect()
    }
}

/// Clamp a value into the dimension range; NaN collapses to the minimum
pub fn clamp_dimension(value: f32) -> f32 {
    if value.is_nan() {
        return DIMENSION_MIN;
    }
    value.clamp(DIMENSION_MIN, DIMENSION_MAX)
}
