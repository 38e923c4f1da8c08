//! Simulation configuration with documented constants
//!
//! Every number the transition engine uses lives here. The defaults satisfy
//! the behavioral properties the engine is tested against (diminishing returns,
//! Yerkes-Dodson band, absorption fragility, delayed cost). They can be
//! overridden from a TOML file; missing keys fall back to the defaults.

use crate::actions::catalog::ActionCategory;
use crate::core::error::{Result, SimError};
use crate::entity::affect::Dimension;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the transition engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub receptivity: ReceptivityConfig,
    pub tolerance: ToleranceConfig,
    pub carryover: CarryoverConfig,
    pub yerkes_dodson: YerkesDodsonConfig,
    pub shutdown: ShutdownConfig,
    pub homeostasis: HomeostasisConfig,
    pub couplings: CouplingConfig,
    pub viability: ViabilityConfig,
    pub reserve: ReserveConfig,
    pub appraisal: AppraisalConfig,
    pub cues: CueConfig,
    pub wanting: WantingConfig,
    pub traits: TraitConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            receptivity: ReceptivityConfig::default(),
            tolerance: ToleranceConfig::default(),
            carryover: CarryoverConfig::default(),
            yerkes_dodson: YerkesDodsonConfig::default(),
            shutdown: ShutdownConfig::default(),
            homeostasis: HomeostasisConfig::default(),
            couplings: CouplingConfig::default(),
            viability: ViabilityConfig::default(),
            reserve: ReserveConfig::default(),
            appraisal: AppraisalConfig::default(),
            cues: CueConfig::default(),
            wanting: WantingConfig::default(),
            traits: TraitConfig::default(),
        }
    }
}

// === RECEPTIVITY ===

/// How anxiety, sleepiness and shutdown dampen absorbing effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceptivityConfig {
    /// Anxiety above which absorbing effects start to be dampened
    pub anxiety_threshold: f32,

    /// Sleepiness above which absorbing effects start to be dampened
    pub sleepiness_threshold: f32,

    /// Multiplier reached when a dampening input is at 100
    ///
    /// Dampening is quadratic in the distance past the threshold, so a
    /// little excess costs little and a lot costs a lot.
    pub floor: f32,

    /// Shutdown level at which receptivity starts to flatten
    pub shutdown_onset: f32,

    /// Fraction of receptivity removed at shutdown = 100
    pub shutdown_max_dampening: f32,
}

impl Default for ReceptivityConfig {
    fn default() -> Self {
        Self {
            anxiety_threshold: 50.0,
            sleepiness_threshold: 40.0,
            floor: 0.25,
            shutdown_onset: 20.0,
            shutdown_max_dampening: 0.6,
        }
    }
}

// === TOLERANCE ===

/// Per-action habituation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Tolerance factor is `1 / (1 + sensitivity * exposure)`
    ///
    /// At 0.25 the fourth back-to-back use lands at roughly 60% strength.
    pub sensitivity: f32,

    /// Exposure added each time an action is applied
    pub exposure_gain: f32,

    /// Exponential decay rate of exposure per simulated hour
    ///
    /// At 0.3, exposure halves in a bit over two hours of disuse.
    pub exposure_decay_rate: f32,

    /// Exposures below this are dropped from the record
    pub forget_below: f32,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.25,
            exposure_gain: 1.0,
            exposure_decay_rate: 0.3,
            forget_below: 0.001,
        }
    }
}

// === CROSS-DOMAIN CARRY-OVER ===

/// Misattribution of residual arousal to a differently-categorized action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryoverConfig {
    /// Residual arousal (above baseline) below which nothing carries over
    pub residual_threshold: f32,

    /// Fraction of residual arousal folded into the next action
    pub carried_fraction: f32,

    /// Intensity added per point of carried arousal
    ///
    /// At 0.02, 20 points of carried arousal make absorbing effects 40% stronger.
    pub intensity_gain: f32,
}

impl Default for CarryoverConfig {
    fn default() -> Self {
        Self {
            residual_threshold: 5.0,
            carried_fraction: 0.5,
            intensity_gain: 0.02,
        }
    }
}

// === YERKES-DODSON ===

/// Inverted-U scaling of absorbing effects by anxiety
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YerkesDodsonConfig {
    /// Anxiety level of peak amplification
    pub optimum: f32,

    /// Width of the gaussian band around the optimum
    pub width: f32,

    /// Multiplier far from the optimum (both calm and panicked ends)
    pub floor: f32,

    /// Multiplier at the optimum
    pub peak: f32,
}

impl Default for YerkesDodsonConfig {
    fn default() -> Self {
        Self {
            optimum: 35.0,
            width: 25.0,
            floor: 0.6,
            peak: 1.2,
        }
    }
}

// === SHUTDOWN ===

/// Soft absorbing region of the shutdown dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Level at which the subject is considered shut down
    pub threshold: f32,

    /// Fraction of every other delta removed at shutdown = 100
    pub numbing: f32,

    /// Multiplier on shutdown's own relaxation rate while above threshold
    pub recovery_slowdown: f32,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            threshold: 60.0,
            numbing: 0.5,
            recovery_slowdown: 0.3,
        }
    }
}

// === HOMEOSTASIS ===

/// Passive dynamics of one dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionDynamics {
    /// Resting value the dimension relaxes toward
    pub baseline: f32,
    /// Fraction-of-distance relaxation rate per hour (exponential, never overshoots)
    pub rate: f32,
    /// Constant change per hour regardless of baseline
    #[serde(default)]
    pub drift: f32,
}

impl DimensionDynamics {
    pub const fn new(baseline: f32, rate: f32, drift: f32) -> Self {
        Self { baseline, rate, drift }
    }
}

/// Per-dimension homeostasis table
///
/// Arousal relaxes fast, liking slowly. Sleepiness relaxes very slowly on its
/// own so that resting actively beats waiting it out. Energy and hunger do
/// not relax; they only drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeostasisConfig {
    pub liking_score: DimensionDynamics,
    pub anxiety: DimensionDynamics,
    pub energy: DimensionDynamics,
    pub arousal: DimensionDynamics,
    pub sleepiness: DimensionDynamics,
    pub shutdown: DimensionDynamics,
    pub absorption: DimensionDynamics,
    pub hunger: DimensionDynamics,
    pub prefrontal: DimensionDynamics,
}

impl Default for HomeostasisConfig {
    fn default() -> Self {
        Self {
            liking_score: DimensionDynamics::new(50.0, 0.05, 0.0),
            anxiety: DimensionDynamics::new(30.0, 0.12, 0.0),
            energy: DimensionDynamics::new(50.0, 0.0, -2.0),
            arousal: DimensionDynamics::new(20.0, 0.5, 0.0),
            sleepiness: DimensionDynamics::new(20.0, 0.04, 0.0),
            shutdown: DimensionDynamics::new(0.0, 0.15, 0.0),
            absorption: DimensionDynamics::new(30.0, 0.2, 0.0),
            hunger: DimensionDynamics::new(50.0, 0.0, 3.0),
            prefrontal: DimensionDynamics::new(50.0, 0.1, 0.0),
        }
    }
}

impl HomeostasisConfig {
    pub fn for_dimension(&self, dimension: Dimension) -> &DimensionDynamics {
        match dimension {
            Dimension::LikingScore => &self.liking_score,
            Dimension::Anxiety => &self.anxiety,
            Dimension::Energy => &self.energy,
            Dimension::Arousal => &self.arousal,
            Dimension::Sleepiness => &self.sleepiness,
            Dimension::Shutdown => &self.shutdown,
            Dimension::Absorption => &self.absorption,
            Dimension::Hunger => &self.hunger,
            Dimension::Prefrontal => &self.prefrontal,
        }
    }
}

// === PASSIVE COUPLINGS ===

/// Cross-dimension pressures applied during decay (all per hour)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingConfig {
    /// Hunger above which anxiety builds
    pub hunger_anxiety_onset: f32,
    pub hunger_anxiety_rate: f32,

    /// Energy below which anxiety builds
    pub fatigue_anxiety_onset: f32,
    pub fatigue_anxiety_rate: f32,

    /// Sleepiness above which arousal and executive control drain
    pub drowsy_onset: f32,
    pub drowsy_arousal_drain: f32,
    pub drowsy_prefrontal_drain: f32,

    /// Sleepiness above which sustained absorption breaks down
    pub drowsy_absorption_onset: f32,
    pub drowsy_absorption_drain: f32,

    /// Anxiety above which absorption is suppressed
    pub anxious_absorption_onset: f32,
    pub anxious_absorption_drain: f32,

    /// Prefrontal activity below which absorption builds (hypofrontality)
    pub hypofrontality_onset: f32,
    pub hypofrontality_absorption_rate: f32,

    /// Extreme anxiety with depleted energy tips into shutdown
    pub collapse_anxiety_onset: f32,
    pub collapse_energy_ceiling: f32,
    pub collapse_rate: f32,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            hunger_anxiety_onset: 50.0,
            hunger_anxiety_rate: 0.05,
            fatigue_anxiety_onset: 30.0,
            fatigue_anxiety_rate: 0.05,
            drowsy_onset: 40.0,
            drowsy_arousal_drain: 5.0,
            drowsy_prefrontal_drain: 3.0,
            drowsy_absorption_onset: 60.0,
            drowsy_absorption_drain: 4.0,
            anxious_absorption_onset: 50.0,
            anxious_absorption_drain: 5.0,
            hypofrontality_onset: 40.0,
            hypofrontality_absorption_rate: 0.1,
            collapse_anxiety_onset: 80.0,
            collapse_energy_ceiling: 25.0,
            collapse_rate: 3.0,
        }
    }
}

// === VIABILITY ===

/// Limits past which the subject is considered incapacitated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViabilityConfig {
    pub min_energy: f32,
    pub max_hunger: f32,
    pub max_sleepiness: f32,
}

impl Default for ViabilityConfig {
    fn default() -> Self {
        Self {
            min_energy: 5.0,
            max_hunger: 95.0,
            max_sleepiness: 95.0,
        }
    }
}

// === HEDONIC RESERVE ===

/// Depletable pool behind positive liking deltas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReserveConfig {
    /// Fraction of a liking boost that still lands with an empty reserve
    pub floor_scale: f32,

    /// Reserve consumed per point of authored liking boost
    pub draw_per_point: f32,

    /// Reserve regained per simulated hour
    pub replenish_rate: f32,

    /// Reserve regained at once by a restorative action (sleep)
    pub restore: f32,

    /// Fraction of the liking baseline lost at reserve = 0
    ///
    /// A drained subject settles lower than a rested one.
    pub baseline_depression: f32,
}

impl Default for ReserveConfig {
    fn default() -> Self {
        Self {
            floor_scale: 0.15,
            draw_per_point: 0.5,
            replenish_rate: 5.0,
            restore: 40.0,
            baseline_depression: 0.4,
        }
    }
}

// === APPRAISAL ===

/// Linear penalty past an onset, reaching `weight` at the end of the range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub onset: f32,
    pub weight: f32,
}

impl Penalty {
    pub const fn new(onset: f32, weight: f32) -> Self {
        Self { onset, weight }
    }

    /// Penalty for `value` above the onset; `weight` at 100
    pub fn above(&self, value: f32) -> f32 {
        if value <= self.onset {
            return 0.0;
        }
        (value - self.onset) / (100.0 - self.onset) * self.weight
    }

    /// Penalty for `value` below the onset; `weight` at 0
    pub fn below(&self, value: f32) -> f32 {
        if value >= self.onset {
            return 0.0;
        }
        (self.onset - value) / self.onset * self.weight
    }
}

/// Whether an action lands at all in the current context
///
/// Appraisal runs from `min` to 1. Below zero the action backfires: its
/// absorbing effects are lost and its category's aversive consequences land
/// instead, scaled by how far below zero the appraisal fell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppraisalConfig {
    /// Company is aversive while anxious
    pub social_anxiety: Penalty,
    /// Company is draining while exhausted (applies below the onset)
    pub social_fatigue: Penalty,
    /// Pain without arousal is just pain (applies below the onset)
    pub pain_unaroused: Penalty,
    /// Immersion turns pain into play; subtracted from the penalty
    pub pain_absorption: Penalty,
    /// Pain reads as threat while anxious
    pub pain_anxiety: Penalty,
    /// Breathwork tips into hyperventilation while panicked
    pub breathwork_anxiety: Penalty,
    pub food_anxiety: Penalty,
    pub substance_anxiety: Penalty,
    /// Shutdown flattens every category
    pub shutdown: Penalty,
    /// Penalty per unit of chronic life stress, for every category except rest
    pub life_stress_weight: f32,
    /// Lowest appraisal; the deepest possible backfire
    pub min: f32,
}

impl Default for AppraisalConfig {
    fn default() -> Self {
        Self {
            social_anxiety: Penalty::new(50.0, 1.2),
            social_fatigue: Penalty::new(25.0, 0.4),
            pain_unaroused: Penalty::new(30.0, 1.8),
            pain_absorption: Penalty::new(40.0, 0.3),
            pain_anxiety: Penalty::new(55.0, 0.5),
            breathwork_anxiety: Penalty::new(70.0, 0.5),
            food_anxiety: Penalty::new(60.0, 0.3),
            substance_anxiety: Penalty::new(55.0, 0.5),
            shutdown: Penalty::new(20.0, 0.6),
            life_stress_weight: 0.3,
            min: -0.5,
        }
    }
}

impl AppraisalConfig {
    fn penalties(&self) -> [(&'static str, &Penalty); 9] {
        [
            ("social_anxiety", &self.social_anxiety),
            ("social_fatigue", &self.social_fatigue),
            ("pain_unaroused", &self.pain_unaroused),
            ("pain_absorption", &self.pain_absorption),
            ("pain_anxiety", &self.pain_anxiety),
            ("breathwork_anxiety", &self.breathwork_anxiety),
            ("food_anxiety", &self.food_anxiety),
            ("substance_anxiety", &self.substance_anxiety),
            ("shutdown", &self.shutdown),
        ]
    }
}

// === CUE SALIENCE ===

/// Learned wanting attached to each category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueConfig {
    /// Salience gained per good experience, per category
    pub food: f32,
    pub rest: f32,
    pub social: f32,
    pub pain: f32,
    pub breathwork: f32,
    pub substance: f32,
    pub stress: f32,

    /// Salience lost per unit of backfire severity
    pub backfire_loss: f32,

    /// Salience every category loses to a restorative action
    pub restful_fade: f32,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            food: 0.025,
            rest: 0.0,
            social: 0.03,
            pain: 0.05,
            breathwork: 0.04,
            substance: 0.075,
            stress: 0.0,
            backfire_loss: 0.1,
            restful_fade: 0.05,
        }
    }
}

impl CueConfig {
    pub fn learning_rate(&self, category: ActionCategory) -> f32 {
        match category {
            ActionCategory::Food => self.food,
            ActionCategory::Rest => self.rest,
            ActionCategory::Social => self.social,
            ActionCategory::Pain => self.pain,
            ActionCategory::Breathwork => self.breathwork,
            ActionCategory::Substance => self.substance,
            ActionCategory::Stress => self.stress,
        }
    }
}

// === WANTING ===

/// Approach motivation, derived from arousal, energy and cue salience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WantingConfig {
    /// Resting drive with no arousal and no learned cues
    pub drive: f32,
    pub arousal_weight: f32,
    /// Points added by the most salient cue at full salience
    pub salience_weight: f32,
    /// Multiplier left at energy = 0
    pub fatigue_floor: f32,
    /// Fraction of wanting removed at shutdown = 100
    pub shutdown_dampening: f32,
}

impl Default for WantingConfig {
    fn default() -> Self {
        Self {
            drive: 25.0,
            arousal_weight: 0.25,
            salience_weight: 25.0,
            fatigue_floor: 0.6,
            shutdown_dampening: 0.6,
        }
    }
}

// === TRAITS ===

/// How a subject's fixed traits shift its starting state and baselines
///
/// Testosterone enters as an offset in [-1, 1] (0 at the population mean of
/// 50); SSRI dose and life stress enter as fractions in [0, 1]. Each value
/// below is the shift at a full unit of its trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitConfig {
    pub testosterone_initial_arousal: f32,
    pub testosterone_initial_energy: f32,
    pub testosterone_initial_anxiety: f32,

    pub testosterone_arousal_baseline: f32,
    pub testosterone_anxiety_baseline: f32,
    pub ssri_anxiety_baseline: f32,
    pub stress_anxiety_baseline: f32,
    pub stress_absorption_baseline: f32,

    /// Shift of the Yerkes-Dodson optimum
    pub testosterone_optimum_shift: f32,
    pub ssri_optimum_shift: f32,
    /// Range a trait-shifted optimum is kept within
    pub optimum_min: f32,
    pub optimum_max: f32,

    /// Absorption lost per hour under full life stress
    pub stress_absorption_drain: f32,
}

impl Default for TraitConfig {
    fn default() -> Self {
        Self {
            testosterone_initial_arousal: 10.0,
            testosterone_initial_energy: 10.0,
            testosterone_initial_anxiety: -10.0,
            testosterone_arousal_baseline: 5.0,
            testosterone_anxiety_baseline: -5.0,
            ssri_anxiety_baseline: -10.0,
            stress_anxiety_baseline: 20.0,
            stress_absorption_baseline: -8.0,
            testosterone_optimum_shift: -5.0,
            ssri_optimum_shift: -8.0,
            optimum_min: 10.0,
            optimum_max: 50.0,
            stress_absorption_drain: 2.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML, filling missing keys with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    ///
    /// Every comparison is written so that NaN fails it.
    pub fn validate(&self) -> Result<()> {
        let r = &self.receptivity;
        for (name, value) in [
            ("receptivity.anxiety_threshold", r.anxiety_threshold),
            ("receptivity.sleepiness_threshold", r.sleepiness_threshold),
            ("receptivity.shutdown_onset", r.shutdown_onset),
            ("shutdown.threshold", self.shutdown.threshold),
            ("yerkes_dodson.optimum", self.yerkes_dodson.optimum),
        ] {
            if !(0.0..100.0).contains(&value) {
                return Err(SimError::Config(format!(
                    "{} ({}) must be within [0, 100)",
                    name, value
                )));
            }
        }

        if !(r.floor > 0.0 && r.floor <= 1.0) {
            return Err(SimError::Config(format!(
                "receptivity.floor ({}) must be within (0, 1]",
                r.floor
            )));
        }
        if !(0.0..1.0).contains(&r.shutdown_max_dampening) {
            return Err(SimError::Config(format!(
                "receptivity.shutdown_max_dampening ({}) must be within [0, 1)",
                r.shutdown_max_dampening
            )));
        }

        let t = &self.tolerance;
        for (name, value) in [
            ("sensitivity", t.sensitivity),
            ("exposure_gain", t.exposure_gain),
            ("exposure_decay_rate", t.exposure_decay_rate),
            ("forget_below", t.forget_below),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SimError::Config(format!(
                    "tolerance.{} ({}) must be positive and finite",
                    name, value
                )));
            }
        }

        let yd = &self.yerkes_dodson;
        if !(yd.floor > 0.0 && yd.floor < 1.0 && yd.peak > 1.0 && yd.peak.is_finite()) {
            return Err(SimError::Config(format!(
                "yerkes_dodson needs 0 < floor ({}) < 1 < peak ({})",
                yd.floor, yd.peak
            )));
        }
        if !(yd.width > 0.0 && yd.width.is_finite()) {
            return Err(SimError::Config(format!(
                "yerkes_dodson.width ({}) must be positive and finite",
                yd.width
            )));
        }

        if !(0.0..1.0).contains(&self.shutdown.numbing) {
            return Err(SimError::Config(format!(
                "shutdown.numbing ({}) must be within [0, 1)",
                self.shutdown.numbing
            )));
        }
        if !(self.shutdown.recovery_slowdown > 0.0 && self.shutdown.recovery_slowdown <= 1.0) {
            return Err(SimError::Config(format!(
                "shutdown.recovery_slowdown ({}) must be within (0, 1]",
                self.shutdown.recovery_slowdown
            )));
        }

        let c = &self.carryover;
        for (name, value) in [
            ("residual_threshold", c.residual_threshold),
            ("carried_fraction", c.carried_fraction),
            ("intensity_gain", c.intensity_gain),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(SimError::Config(format!(
                    "carryover.{} ({}) must not be negative",
                    name, value
                )));
            }
        }

        for dimension in Dimension::ALL {
            let dynamics = self.homeostasis.for_dimension(dimension);
            if !(dynamics.rate >= 0.0 && dynamics.rate.is_finite() && dynamics.drift.is_finite()) {
                return Err(SimError::Config(format!(
                    "homeostasis.{} needs a finite, non-negative rate and a finite drift",
                    dimension
                )));
            }
            if !(0.0..=100.0).contains(&dynamics.baseline) {
                return Err(SimError::Config(format!(
                    "homeostasis.{}.baseline ({}) must be within [0, 100]",
                    dimension, dynamics.baseline
                )));
            }
        }

        let reserve = &self.reserve;
        for (name, value) in [
            ("floor_scale", reserve.floor_scale),
            ("baseline_depression", reserve.baseline_depression),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::Config(format!(
                    "reserve.{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("draw_per_point", reserve.draw_per_point),
            ("replenish_rate", reserve.replenish_rate),
            ("restore", reserve.restore),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(SimError::Config(format!(
                    "reserve.{} ({}) must not be negative",
                    name, value
                )));
            }
        }

        let appraisal = &self.appraisal;
        for (name, penalty) in appraisal.penalties() {
            if !(penalty.onset > 0.0 && penalty.onset < 100.0) {
                return Err(SimError::Config(format!(
                    "appraisal.{}.onset ({}) must be within (0, 100)",
                    name, penalty.onset
                )));
            }
            if !(penalty.weight >= 0.0 && penalty.weight.is_finite()) {
                return Err(SimError::Config(format!(
                    "appraisal.{}.weight ({}) must not be negative",
                    name, penalty.weight
                )));
            }
        }
        if !(appraisal.min < 0.0 && appraisal.min.is_finite()) {
            return Err(SimError::Config(format!(
                "appraisal.min ({}) must be negative",
                appraisal.min
            )));
        }
        if !(appraisal.life_stress_weight >= 0.0 && appraisal.life_stress_weight.is_finite()) {
            return Err(SimError::Config("appraisal.life_stress_weight must not be negative".into()));
        }

        let cues = &self.cues;
        for (name, value) in [
            ("backfire_loss", cues.backfire_loss),
            ("restful_fade", cues.restful_fade),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::Config(format!("cues.{} ({}) must be within [0, 1]", name, value)));
            }
        }
        for category in ActionCategory::ALL {
            if !(0.0..=1.0).contains(&cues.learning_rate(category)) {
                return Err(SimError::Config(format!(
                    "cues.{} ({}) must be within [0, 1]",
                    category,
                    cues.learning_rate(category)
                )));
            }
        }

        let w = &self.wanting;
        if !(0.0..=1.0).contains(&w.fatigue_floor) || !(0.0..=1.0).contains(&w.shutdown_dampening) {
            return Err(SimError::Config(
                "wanting.fatigue_floor and wanting.shutdown_dampening must be within [0, 1]".into(),
            ));
        }
        if ![w.drive, w.arousal_weight, w.salience_weight]
            .iter()
            .all(|v| *v >= 0.0 && v.is_finite())
        {
            return Err(SimError::Config("wanting weights must not be negative".into()));
        }

        let traits = &self.traits;
        if !(traits.optimum_min >= 0.0
            && traits.optimum_min <= traits.optimum_max
            && traits.optimum_max <= 100.0)
        {
            return Err(SimError::Config(format!(
                "traits needs 0 <= optimum_min ({}) <= optimum_max ({}) <= 100",
                traits.optimum_min, traits.optimum_max
            )));
        }
        for value in [
            traits.testosterone_initial_arousal,
            traits.testosterone_initial_energy,
            traits.testosterone_initial_anxiety,
            traits.testosterone_arousal_baseline,
            traits.testosterone_anxiety_baseline,
            traits.ssri_anxiety_baseline,
            traits.stress_anxiety_baseline,
            traits.stress_absorption_baseline,
            traits.testosterone_optimum_shift,
            traits.ssri_optimum_shift,
            traits.stress_absorption_drain,
        ] {
            if !value.is_finite() {
                return Err(SimError::Config("trait shifts must be finite".into()));
            }
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<SimulationConfig> = OnceLock::new();

/// Get the global simulation config (initializes with defaults if not set)
pub fn config() -> &'static SimulationConfig {
    CONFIG.get_or_init(SimulationConfig::default)
}

/// Set the global simulation config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: SimulationConfig) -> std::result::Result<(), SimulationConfig> {
    CONFIG.set(config)
}
