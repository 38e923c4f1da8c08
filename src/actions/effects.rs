//! Building blocks of the declarative action table
//!
//! An action's base effect is a list of per-dimension [`Effect`]s. Each one is
//! routed through a [`Channel`]: absorbing effects are scaled by receptivity,
//! tolerance and the Yerkes-Dodson factor; unconditional effects (pain,
//! alarm) ignore receptivity; mechanical effects (digestion, sleep) land at
//! their authored magnitude no matter what.

use crate::entity::affect::{Affect, Dimension};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// How an effect reacts to the subject's current capacity to absorb it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Pleasure/absorption-type change; dampened by R, T and Yerkes-Dodson
    Absorbing,
    /// Aversive or emotional change; ignores receptivity, numbed only in shutdown
    Unconditional,
    /// Bodily change; always applied at full magnitude
    Mechanical,
}

/// Size of an effect, possibly depending on the current value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    /// Constant change
    Fixed(f32),
    /// Move `fraction` of the way from the current value toward `target`
    Toward { target: f32, fraction: f32 },
}

impl Magnitude {
    pub fn resolve(&self, current: f32) -> f32 {
        match *self {
            Magnitude::Fixed(amount) => amount,
            Magnitude::Toward { target, fraction } => (target - current) * fraction,
        }
    }
}

/// One authored change to one dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub dimension: Dimension,
    pub magnitude: Magnitude,
    pub channel: Channel,
}

impl Effect {
    pub const fn absorbing(dimension: Dimension, amount: f32) -> Self {
        Self {
            dimension,
            magnitude: Magnitude::Fixed(amount),
            channel: Channel::Absorbing,
        }
    }

    pub const fn unconditional(dimension: Dimension, amount: f32) -> Self {
        Self {
            dimension,
            magnitude: Magnitude::Fixed(amount),
            channel: Channel::Unconditional,
        }
    }

    pub const fn mechanical(dimension: Dimension, amount: f32) -> Self {
        Self {
            dimension,
            magnitude: Magnitude::Fixed(amount),
            channel: Channel::Mechanical,
        }
    }

    /// Mechanically pull a dimension toward a value (e.g. waking up alert)
    pub const fn settle(dimension: Dimension, target: f32, fraction: f32) -> Self {
        Self {
            dimension,
            magnitude: Magnitude::Toward { target, fraction },
            channel: Channel::Mechanical,
        }
    }
}

/// A delayed change queued when an action is applied (opponent process)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aftereffect {
    pub dimension: Dimension,
    pub amount: f32,
    /// Hours before delivery starts
    pub delay: f32,
    /// Hours over which `amount` is spread
    pub span: f32,
}

impl Aftereffect {
    pub const fn new(dimension: Dimension, amount: f32, delay: f32, span: f32) -> Self {
        Self {
            dimension,
            amount,
            delay,
            span,
        }
    }
}

/// Eligibility predicate over the current affect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    Always,
    Above(Dimension, f32),
    Below(Dimension, f32),
    AnyOf(&'static [Requirement]),
    AllOf(&'static [Requirement]),
}

impl Requirement {
    pub fn is_met(&self, affect: &Affect) -> bool {
        match *self {
            Requirement::Always => true,
            Requirement::Above(dimension, limit) => affect.get(dimension) > limit,
            Requirement::Below(dimension, limit) => affect.get(dimension) < limit,
            Requirement::AnyOf(options) => options.iter().any(|r| r.is_met(affect)),
            Requirement::AllOf(all) => all.iter().all(|r| r.is_met(affect)),
        }
    }

    /// Human-readable form used in rejection messages
    pub fn describe(&self) -> String {
        match *self {
            Requirement::Always => "always available".to_string(),
            Requirement::Above(dimension, limit) => format!("{} above {}", dimension, limit),
            Requirement::Below(dimension, limit) => format!("{} below {}", dimension, limit),
            Requirement::AnyOf(options) => options
                .iter()
                .map(Requirement::describe)
                .collect::<Vec<_>>()
                .join(" or "),
            Requirement::AllOf(all) => all
                .iter()
                .map(Requirement::describe)
                .collect::<Vec<_>>()
                .join(" and "),
        }
    }
}

/// A change per dimension
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeltaVector {
    values: [f32; Dimension::COUNT],
}

impl DeltaVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: Dimension) -> f32 {
        self.values[dimension.index()]
    }

    pub fn add(&mut self, dimension: Dimension, amount: f32) {
        self.values[dimension.index()] += amount;
    }

    pub fn set(&mut self, dimension: Dimension, value: f32) {
        self.values[dimension.index()] = value;
    }

    pub fn scaled(&self, factor: f32) -> Self {
        let mut out = *self;
        for v in &mut out.values {
            *v *= factor;
        }
        out
    }

    pub fn plus(&self, other: &DeltaVector) -> Self {
        let mut out = *self;
        for (v, o) in out.values.iter_mut().zip(other.values.iter()) {
            *v += o;
        }
        out
    }

    /// Whether this vector changes `dimension` at all
    pub fn drives(&self, dimension: Dimension) -> bool {
        self.get(dimension) != 0.0
    }

    /// Non-zero entries in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f32)> + '_ {
        Dimension::ALL
            .into_iter()
            .map(move |d| (d, self.get(d)))
            .filter(|(_, v)| *v != 0.0)
    }
}

impl Serialize for DeltaVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<_> = self.iter().collect();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (dimension, value) in entries {
            map.serialize_entry(&dimension, &value)?;
        }
        map.end()
    }
}

/// Output of an action's base-effect rule, split by channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawDelta {
    pub absorbing: DeltaVector,
    pub unconditional: DeltaVector,
    pub mechanical: DeltaVector,
}

/// Evaluate a list of effects against the current affect
///
/// `intensity` carries misattributed arousal from a previous action and
/// multiplies the absorbing channel only.
pub fn evaluate_effects(effects: &[Effect], affect: &Affect, intensity: f32) -> RawDelta {
    let mut raw = RawDelta::default();
    for effect in effects {
        let amount = effect.magnitude.resolve(affect.get(effect.dimension));
        match effect.channel {
            Channel::Absorbing => raw.absorbing.add(effect.dimension, amount * intensity),
            Channel::Unconditional => raw.unconditional.add(effect.dimension, amount),
            Channel::Mechanical => raw.mechanical.add(effect.dimension, amount),
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toward_depends_on_current_value() {
        let m = Magnitude::Toward { target: 10.0, fraction: 1.0 };
        assert_eq!(m.resolve(70.0), -60.0);
        assert_eq!(m.resolve(10.0), 0.0);
    }

    #[test]
    fn test_intensity_only_touches_absorbing_channel() {
        let effects = [
            Effect::absorbing(Dimension::LikingScore, 10.0),
            Effect::unconditional(Dimension::Anxiety, 5.0),
            Effect::mechanical(Dimension::Hunger, -20.0),
        ];
        let raw = evaluate_effects(&effects, &Affect::default(), 1.5);
        assert_eq!(raw.absorbing.get(Dimension::LikingScore), 15.0);
        assert_eq!(raw.unconditional.get(Dimension::Anxiety), 5.0);
        assert_eq!(raw.mechanical.get(Dimension::Hunger), -20.0);
        assert_eq!(raw.unconditional.get(Dimension::Hunger), 0.0);
    }

    #[test]
    fn test_requirement_combinators() {
        static TIRED: Requirement = Requirement::AnyOf(&[
            Requirement::Below(Dimension::Energy, 60.0),
            Requirement::Above(Dimension::Sleepiness, 50.0),
        ]);
        let mut affect = Affect::default();
        affect.energy = 80.0;
        assert!(!TIRED.is_met(&affect));
        affect.sleepiness = 55.0;
        assert!(TIRED.is_met(&affect));
        assert_eq!(TIRED.describe(), "energy below 60 or sleepiness above 50");
    }

    #[test]
    fn test_delta_vector_serializes_non_zero_entries() {
        let mut delta = DeltaVector::new();
        delta.add(Dimension::Energy, 4.0);
        let json = serde_json::to_value(delta).unwrap();
        assert_eq!(json, serde_json::json!({ "energy": 4.0 }));
    }
}
