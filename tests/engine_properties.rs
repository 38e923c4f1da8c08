//! Behavioral properties of the transition engine
//!
//! These tests verify the qualitative guarantees the constants are tuned for:
//! - Diminishing returns from any starting state, and recovery of sensitivity
//! - Delayed cost after a high-arousal action
//! - Cross-domain misattribution of arousal
//! - Yerkes-Dodson band and absorption fragility
//! - Query idempotence, reset determinism, range invariant

use affect_sim::actions::catalog::{ActionCategory, ActionId, Catalog};
use affect_sim::actions::effects::{Channel, DeltaVector};
use affect_sim::core::config::SimulationConfig;
use affect_sim::entity::affect::{Affect, Dimension};
use affect_sim::entity::subject::Subject;
use affect_sim::simulation::engine::Session;
use proptest::prelude::*;

fn fresh() -> Session {
    Session::with_config(SimulationConfig::default())
}

fn liking_delta(session: &mut Session, action: ActionId) -> f32 {
    session
        .apply_action(action)
        .unwrap()
        .applied
        .get(Dimension::LikingScore)
}

#[test]
fn test_diminishing_returns_on_repetition() {
    let mut session = fresh();

    let mut previous = liking_delta(&mut session, ActionId::Cuddle);
    for _ in 0..9 {
        let current = liking_delta(&mut session, ActionId::Cuddle);
        assert!(
            current <= previous + 1e-4,
            "marginal effect grew from {} to {}",
            previous,
            current
        );
        assert!(current > 0.0, "effect vanished");
        previous = current;
    }
}

/// Signed size of each boosted dimension, in authored direction
fn absorbing_gains(action: ActionId, applied: &DeltaVector) -> Vec<f32> {
    action
        .definition()
        .effects
        .iter()
        .filter(|e| e.channel == Channel::Absorbing)
        .map(|e| applied.get(e.dimension) * e.magnitude.resolve(0.0).signum())
        .collect()
}

fn boosting_actions() -> Vec<ActionId> {
    Catalog::definitions()
        .iter()
        .filter(|d| {
            d.effects
                .iter()
                .any(|e| e.channel == Channel::Absorbing && e.magnitude.resolve(0.0) > 0.0)
        })
        .map(|d| d.id)
        .collect()
}

#[test]
fn test_caffeine_streak_after_calming_down_still_diminishes() {
    let mut session = fresh();
    for _ in 0..12 {
        session.apply_action(ActionId::DeepBreathing).unwrap();
    }
    for _ in 0..12 {
        session.apply_action(ActionId::Wait).unwrap();
    }

    let mut previous = f32::INFINITY;
    for _ in 0..6 {
        let report = session.apply_action(ActionId::Caffeine).unwrap();
        let energy = report.applied.get(Dimension::Energy);
        assert!(energy <= previous + 1e-4, "energy boost grew from {} to {}", previous, energy);
        assert!(energy > 0.0);
        previous = energy;
    }
}

#[test]
fn test_sensitivity_recovers_after_disuse() {
    let mut heavy = fresh();
    for _ in 0..6 {
        heavy.apply_action(ActionId::Massage).unwrap();
    }
    let mut rested = heavy.clone();

    let immediate = heavy.apply_action(ActionId::Massage).unwrap();

    for _ in 0..40 {
        rested.apply_action(ActionId::Wait).unwrap();
    }
    let recovered = rested.apply_action(ActionId::Massage).unwrap();

    assert!(recovered.tolerance > immediate.tolerance);
    assert!(
        recovered.applied.get(Dimension::LikingScore) > immediate.applied.get(Dimension::LikingScore)
    );
}

#[test]
fn test_stimulant_has_delayed_cost() {
    let mut dosed = fresh();
    let mut control = fresh();

    dosed.apply_action(ActionId::Stimulant).unwrap();
    control.apply_action(ActionId::Wait).unwrap();
    control.apply_action(ActionId::Wait).unwrap();

    // Immediate boost
    assert!(dosed.subject().affect.energy > control.subject().affect.energy);
    assert!(dosed.subject().affect.liking_score > control.subject().affect.liking_score);

    for _ in 0..12 {
        dosed.apply_action(ActionId::Wait).unwrap();
        control.apply_action(ActionId::Wait).unwrap();
    }

    // Same elapsed time, measurable rebound
    assert!((dosed.subject().clock_hours - control.subject().clock_hours).abs() < 1e-4);
    assert!(
        dosed.subject().affect.energy < control.subject().affect.energy - 5.0,
        "no energy crash: {} vs {}",
        dosed.subject().affect.energy,
        control.subject().affect.energy
    );
    assert!(dosed.subject().affect.anxiety > control.subject().affect.anxiety);
    assert!(dosed.subject().aftereffects.is_empty());
}

#[test]
fn test_cross_domain_misattribution() {
    let aroused = Affect {
        arousal: 40.0,
        ..Affect::default()
    };

    let mut from_pain = Subject::with_affect(aroused.clone());
    from_pain.arousal_source = Some(ActionCategory::Pain);
    let mut from_social = Subject::with_affect(aroused);
    from_social.arousal_source = Some(ActionCategory::Social);

    let config = SimulationConfig::default();
    let misread = Session::from_subject(from_pain, config.clone())
        .apply_action(ActionId::Cuddle)
        .unwrap();
    let own = Session::from_subject(from_social, config)
        .apply_action(ActionId::Cuddle)
        .unwrap();

    assert!(misread.carried_arousal > 0.0);
    assert_eq!(own.carried_arousal, 0.0);
    assert!(misread.applied.get(Dimension::LikingScore) > own.applied.get(Dimension::LikingScore));
}

#[test]
fn test_arousing_action_changes_next_delta() {
    let mut primed = fresh();
    primed.apply("light_pain").unwrap();
    let after_pain = primed.apply_action(ActionId::Cuddle).unwrap();

    let alone = fresh().apply_action(ActionId::Cuddle).unwrap();

    assert!(after_pain.carried_arousal > 0.0);
    assert_ne!(after_pain.applied, alone.applied);
}

#[test]
fn test_yerkes_dodson_band() {
    let at = |anxiety: f32| {
        let mut session = Session::with_affect(Affect {
            anxiety,
            ..Affect::default()
        });
        liking_delta(&mut session, ActionId::Massage)
    };

    let calm = at(0.0);
    let moderate = at(35.0);
    let panicked = at(100.0);

    assert!(moderate > calm, "{} <= {}", moderate, calm);
    assert!(moderate > panicked, "{} <= {}", moderate, panicked);
}

#[test]
fn test_absorption_fragility_for_every_absorbing_action() {
    let neutral = Affect {
        energy: 55.0,
        hunger: 30.0,
        ..Affect::default()
    };
    let fragile = Affect {
        anxiety: 70.0,
        sleepiness: 70.0,
        ..neutral.clone()
    };

    for definition in Catalog::definitions() {
        let boosted: Vec<Dimension> = definition
            .effects
            .iter()
            .filter(|e| e.channel == Channel::Absorbing && e.magnitude.resolve(0.0) > 0.0)
            .map(|e| e.dimension)
            .collect();
        if boosted.is_empty() {
            continue;
        }

        let calm = Session::with_affect(neutral.clone())
            .apply_action(definition.id)
            .unwrap();
        let strained = Session::with_affect(fragile.clone())
            .apply_action(definition.id)
            .unwrap();

        for dimension in boosted {
            assert!(
                strained.applied.get(dimension) < calm.applied.get(dimension),
                "{} on {} was not dampened",
                definition.name,
                dimension
            );
        }
    }
}

#[test]
fn test_queries_are_idempotent() {
    let mut session = fresh();
    session.apply("caffeine").unwrap();
    session.apply("cuddle").unwrap();
    let before = session.subject().clone();

    let first = session.get_state();
    for _ in 0..5 {
        assert_eq!(session.get_state(), first);
        session.list_actions(None).unwrap();
        session.list_actions(Some("substance")).unwrap();
        let _ = session.list_actions(Some("nonsense"));
    }

    assert_eq!(session.subject(), &before);
}

#[test]
fn test_reset_is_deterministic() {
    let baseline = fresh().get_state();

    let mut session = fresh();
    for name in ["stimulant", "crisis", "alcohol", "cuddle", "bad_news"] {
        let _ = session.apply(name);
    }
    let first = session.reset();
    session.apply("rest").unwrap();
    let second = session.reset();

    assert_eq!(first, baseline);
    assert_eq!(second, baseline);
    assert_eq!(first.state, Affect::default());
    assert!(first.history.is_empty());
}

proptest! {
    #[test]
    fn prop_state_stays_in_range(indices in prop::collection::vec(0..ActionId::COUNT, 1..80)) {
        let mut session = fresh();
        for index in indices {
            let _ = session.apply_action(ActionId::ALL[index]);
            prop_assert!(session.subject().affect.in_range(), "{:?}", session.subject().affect);
        }
    }

    #[test]
    fn prop_failed_apply_changes_nothing(
        prefix in prop::collection::vec(0..ActionId::COUNT, 0..40),
        target in 0..ActionId::COUNT,
    ) {
        let mut session = fresh();
        for index in prefix {
            let _ = session.apply_action(ActionId::ALL[index]);
        }

        let before = session.subject().clone();
        if session.apply_action(ActionId::ALL[target]).is_err() {
            prop_assert_eq!(session.subject(), &before);
        }
    }

    #[test]
    fn prop_repeats_never_land_stronger(
        values in prop::array::uniform9(0.0f32..100.0),
        pick in 0usize..64,
        repeats in 2usize..9,
    ) {
        let [liking_score, anxiety, energy, arousal, sleepiness, shutdown, absorption, hunger, prefrontal] = values;
        let mut session = Session::from_subject(
            Subject::with_affect(Affect {
                liking_score,
                anxiety,
                energy,
                arousal,
                sleepiness,
                shutdown,
                absorption,
                hunger,
                prefrontal,
            }),
            SimulationConfig::default(),
        );
        let actions = boosting_actions();
        let action = actions[pick % actions.len()];

        let mut previous: Option<Vec<f32>> = None;
        for _ in 0..repeats {
            let Ok(report) = session.apply_action(action) else {
                break;
            };
            if report.backfire > 0.0 {
                previous = None;
                continue;
            }
            let current = absorbing_gains(action, &report.applied);
            for &gain in &current {
                prop_assert!(gain > 0.0, "{} landed nothing", action);
            }
            if let Some(previous) = &previous {
                for (now, before) in current.iter().zip(previous) {
                    prop_assert!(
                        *now <= before + 1e-3,
                        "{} grew from {} to {} starting at {:?}",
                        action,
                        before,
                        now,
                        values
                    );
                }
            }
            previous = Some(current);
        }
    }

    #[test]
    fn prop_history_is_bounded(indices in prop::collection::vec(0..ActionId::COUNT, 0..60)) {
        let mut session = fresh();
        for index in indices {
            let _ = session.apply_action(ActionId::ALL[index]);
        }
        prop_assert!(session.subject().history.len() <= 10);
    }
}
