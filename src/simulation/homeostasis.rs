//! Passive dynamics applied while an action's duration elapses
//!
//! Relaxation toward baselines, constant drifts, cross-dimension couplings and
//! delivery of pending after-effects. Everything is proportional to elapsed
//! simulated hours; nothing here depends on wall-clock time.
//!
//! Baselines are per subject: traits shift them, and a drained hedonic
//! reserve pulls the liking baseline down.

use crate::actions::effects::DeltaVector;
use crate::core::config::{CouplingConfig, SimulationConfig};
use crate::entity::affect::{Affect, Dimension};
use crate::entity::subject::Subject;

/// Exponential step toward a baseline; never overshoots
pub fn relax(current: f32, baseline: f32, rate: f32, hours: f32) -> f32 {
    current + (baseline - current) * (1.0 - (-rate * hours).exp())
}

/// Advance a subject's passive dynamics by `hours`
///
/// Dimensions in `driven` were directly changed by the action this step and
/// are not pulled back toward their baseline; drifts and couplings still apply.
pub fn advance(subject: &mut Subject, hours: f32, driven: &DeltaVector, config: &SimulationConfig) {
    if hours <= 0.0 {
        return;
    }

    let mut passive = relaxation(subject, hours, driven, config)
        .plus(&couplings(&subject.affect, hours, &config.couplings));
    passive.add(
        Dimension::Absorption,
        -subject.traits.stress_fraction() * config.traits.stress_absorption_drain * hours,
    );
    for (dimension, change) in passive.iter() {
        subject.affect.add(dimension, change);
    }

    subject.reserve.replenish(hours, &config.reserve);
    deliver_aftereffects(subject, hours);
}

/// The baseline `dimension` relaxes toward for this subject
pub fn effective_baseline(subject: &Subject, dimension: Dimension, config: &SimulationConfig) -> f32 {
    let configured = config.homeostasis.for_dimension(dimension).baseline;
    let baseline = subject.traits.shift_baseline(dimension, configured, &config.traits);
    if dimension == Dimension::LikingScore {
        subject.reserve.depress(baseline, &config.reserve)
    } else {
        baseline
    }
}

/// Relaxation plus drift for every dimension
pub fn relaxation(
    subject: &Subject,
    hours: f32,
    driven: &DeltaVector,
    config: &SimulationConfig,
) -> DeltaVector {
    let affect = &subject.affect;
    let mut delta = DeltaVector::new();

    for dimension in Dimension::ALL {
        let dynamics = config.homeostasis.for_dimension(dimension);
        let mut change = dynamics.drift * hours;

        if dynamics.rate > 0.0 && !driven.drives(dimension) {
            let mut rate = dynamics.rate;
            // Shutdown is sticky once the subject has collapsed
            if dimension == Dimension::Shutdown && affect.shutdown >= config.shutdown.threshold {
                rate *= config.shutdown.recovery_slowdown;
            }
            let current = affect.get(dimension);
            let baseline = effective_baseline(subject, dimension, config);
            change += relax(current, baseline, rate, hours) - current;
        }

        delta.add(dimension, change);
    }

    delta
}

/// Cross-dimension pressures, evaluated against the affect at the start of the step
pub fn couplings(affect: &Affect, hours: f32, config: &CouplingConfig) -> DeltaVector {
    let mut delta = DeltaVector::new();

    if affect.hunger > config.hunger_anxiety_onset {
        let pressure = (affect.hunger - config.hunger_anxiety_onset) * config.hunger_anxiety_rate;
        delta.add(Dimension::Anxiety, pressure * hours);
    }

    if affect.energy < config.fatigue_anxiety_onset {
        let pressure = (config.fatigue_anxiety_onset - affect.energy) * config.fatigue_anxiety_rate;
        delta.add(Dimension::Anxiety, pressure * hours);
    }

    if affect.sleepiness > config.drowsy_onset {
        let drowsiness = (affect.sleepiness - config.drowsy_onset) / (100.0 - config.drowsy_onset);
        delta.add(Dimension::Arousal, -drowsiness * config.drowsy_arousal_drain * hours);
        delta.add(Dimension::Prefrontal, -drowsiness * config.drowsy_prefrontal_drain * hours);
    }

    if affect.sleepiness > config.drowsy_absorption_onset {
        let drowsiness = (affect.sleepiness - config.drowsy_absorption_onset)
            / (100.0 - config.drowsy_absorption_onset);
        delta.add(Dimension::Absorption, -drowsiness * config.drowsy_absorption_drain * hours);
    }

    if affect.anxiety > config.anxious_absorption_onset {
        let worry = (affect.anxiety - config.anxious_absorption_onset)
            / (100.0 - config.anxious_absorption_onset);
        delta.add(Dimension::Absorption, -worry * config.anxious_absorption_drain * hours);
    }

    // Hypofrontality: quieting executive control deepens immersion
    if affect.prefrontal < config.hypofrontality_onset {
        let gap = config.hypofrontality_onset - affect.prefrontal;
        delta.add(Dimension::Absorption, gap * config.hypofrontality_absorption_rate * hours);
    }

    if affect.anxiety > config.collapse_anxiety_onset && affect.energy < config.collapse_energy_ceiling {
        let overload = (affect.anxiety - config.collapse_anxiety_onset)
            / (100.0 - config.collapse_anxiety_onset);
        delta.add(Dimension::Shutdown, overload * config.collapse_rate * hours);
    }

    delta
}

/// Deliver the share of each pending after-effect that falls inside `hours`
pub fn deliver_aftereffects(subject: &mut Subject, hours: f32) {
    for pending in subject.aftereffects.iter_mut() {
        let delivered = pending.advance(hours);
        if delivered != 0.0 {
            subject.affect.add(pending.dimension, delivered);
        }
    }
    subject.aftereffects.retain(|p| !p.is_spent());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::subject::PendingAftereffect;
    use crate::entity::traits::Traits;

    #[test]
    fn test_relax_never_overshoots() {
        let value = relax(80.0, 20.0, 0.5, 1000.0);
        assert!((value - 20.0).abs() < 1e-3);
        assert!(relax(80.0, 20.0, 0.5, 1.0) > 20.0);
        assert!(relax(10.0, 20.0, 0.5, 1.0) < 20.0);
    }

    #[test]
    fn test_driven_dimension_is_not_relaxed() {
        let config = SimulationConfig::default();
        let subject = Subject::with_affect(Affect {
            arousal: 60.0,
            ..Affect::default()
        });

        let free = relaxation(&subject, 1.0, &DeltaVector::new(), &config);
        assert!(free.get(Dimension::Arousal) < 0.0);

        let mut driven = DeltaVector::new();
        driven.add(Dimension::Arousal, 5.0);
        let held = relaxation(&subject, 1.0, &driven, &config);
        assert_eq!(held.get(Dimension::Arousal), 0.0);
    }

    #[test]
    fn test_drifts_apply_every_step() {
        let config = SimulationConfig::default();
        let mut driven = DeltaVector::new();
        driven.add(Dimension::Energy, 6.0);

        let delta = relaxation(&Subject::new(), 2.0, &driven, &config);
        assert!((delta.get(Dimension::Energy) + 4.0).abs() < 1e-5);
        assert!((delta.get(Dimension::Hunger) - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_shutdown_recovers_slowly_above_threshold() {
        let config = SimulationConfig::default();
        let below = Subject::with_affect(Affect {
            shutdown: 50.0,
            ..Affect::default()
        });
        let above = Subject::with_affect(Affect {
            shutdown: 70.0,
            ..Affect::default()
        });

        let fast = relaxation(&below, 1.0, &DeltaVector::new(), &config).get(Dimension::Shutdown) / 50.0;
        let slow = relaxation(&above, 1.0, &DeltaVector::new(), &config).get(Dimension::Shutdown) / 70.0;
        assert!(slow.abs() < fast.abs());
    }

    #[test]
    fn test_drained_reserve_lowers_liking_baseline() {
        let config = SimulationConfig::default();
        let mut drained = Subject::new();
        drained.reserve.draw(200.0, &config.reserve);

        assert_eq!(effective_baseline(&Subject::new(), Dimension::LikingScore, &config), 50.0);
        assert!((effective_baseline(&drained, Dimension::LikingScore, &config) - 30.0).abs() < 1e-4);

        let sinking = relaxation(&drained, 1.0, &DeltaVector::new(), &config);
        assert!(sinking.get(Dimension::LikingScore) < 0.0);
    }

    #[test]
    fn test_traits_shift_relaxation_target() {
        let config = SimulationConfig::default();
        let stressed = Subject::with_traits(
            Traits {
                life_stress: 100.0,
                ..Traits::default()
            },
            &config.traits,
        );

        assert_eq!(effective_baseline(&stressed, Dimension::Anxiety, &config), 50.0);
        let pull = relaxation(&stressed, 1.0, &DeltaVector::new(), &config);
        assert!(pull.get(Dimension::Anxiety) > 0.0);
    }

    #[test]
    fn test_life_stress_drains_absorption() {
        let config = SimulationConfig::default();
        let mut calm = Subject::new();
        let mut stressed = Subject::with_traits(
            Traits {
                life_stress: 100.0,
                ..Traits::default()
            },
            &config.traits,
        );

        advance(&mut calm, 1.0, &DeltaVector::new(), &config);
        advance(&mut stressed, 1.0, &DeltaVector::new(), &config);

        assert!(stressed.affect.absorption < calm.affect.absorption - 2.0);
    }

    #[test]
    fn test_reserve_refills_over_time() {
        let config = SimulationConfig::default();
        let mut subject = Subject::new();
        subject.reserve.draw(100.0, &config.reserve);

        advance(&mut subject, 2.0, &DeltaVector::new(), &config);

        assert_eq!(subject.reserve.level(), 60.0);
    }

    #[test]
    fn test_hunger_builds_anxiety() {
        let config = CouplingConfig::default();
        let hungry = Affect {
            hunger: 90.0,
            ..Affect::default()
        };
        let delta = couplings(&hungry, 1.0, &config);
        assert!((delta.get(Dimension::Anxiety) - 2.0).abs() < 1e-5);
        assert_eq!(couplings(&Affect::default(), 1.0, &config).get(Dimension::Anxiety), 0.0);
    }

    #[test]
    fn test_collapse_needs_panic_and_exhaustion() {
        let config = CouplingConfig::default();
        let panicked = Affect {
            anxiety: 90.0,
            ..Affect::default()
        };
        assert_eq!(couplings(&panicked, 1.0, &config).get(Dimension::Shutdown), 0.0);

        let spent = Affect {
            anxiety: 90.0,
            energy: 10.0,
            ..Affect::default()
        };
        assert!(couplings(&spent, 1.0, &config).get(Dimension::Shutdown) > 0.0);
    }

    #[test]
    fn test_spent_aftereffects_are_dropped() {
        let mut subject = Subject::new();
        subject.aftereffects.push(PendingAftereffect {
            dimension: Dimension::Energy,
            amount: -10.0,
            delay_remaining: 0.0,
            span_remaining: 1.0,
            span: 1.0,
        });

        deliver_aftereffects(&mut subject, 2.0);

        assert!((subject.affect.energy - 60.0).abs() < 1e-4);
        assert!(subject.aftereffects.is_empty());
    }

    #[test]
    fn test_zero_hours_is_a_no_op() {
        let config = SimulationConfig::default();
        let mut subject = Subject::new();
        let before = subject.clone();
        advance(&mut subject, 0.0, &DeltaVector::new(), &config);
        assert_eq!(subject, before);
    }
}
