//! Transition engine
//!
//! A [`Session`] exclusively owns one subject and applies actions to it one at
//! a time. Every call is synchronous and deterministic. A rejected action
//! leaves the subject untouched.

use crate::actions::catalog::{ActionCategory, ActionId, Catalog, CatalogView};
use crate::actions::effects::{evaluate_effects, DeltaVector};
use crate::actions::table;
use crate::core::config::{config, SimulationConfig};
use crate::core::error::{Result, SimError};
use crate::entity::affect::{Affect, Dimension};
use crate::entity::habituation::Streak;
use crate::entity::subject::{PendingAftereffect, Subject};
use crate::entity::traits::Traits;
use crate::simulation::homeostasis;
use crate::simulation::modifiers::{appraisal, carryover, numbing, receptivity, yerkes_dodson};
use crate::simulation::motivation::wanting;
use serde::Serialize;

/// Read-only copy of everything a caller may observe about a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: Affect,
    /// Approach drive, see [`wanting`]
    pub wanting: f32,
    /// Most recent last
    pub history: Vec<ActionId>,
    pub clock_hours: f32,
    pub viable: bool,
    pub catalog: CatalogView,
}

/// How one `apply` call was computed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionReport {
    pub action: ActionId,
    pub category: ActionCategory,
    pub receptivity: f32,
    pub tolerance: f32,
    pub yerkes_dodson: f32,
    /// Residual arousal misattributed to this action
    pub carried_arousal: f32,
    pub intensity: f32,
    pub numbing: f32,
    /// Contextual fit in [min, 1]; negative means the action backfired
    pub appraisal: f32,
    /// Backfire severity, 0 when the action landed normally
    pub backfire: f32,
    /// Final multiplier on the absorbing effects, after any streak cap
    pub gain: f32,
    /// Hedonic reserve multiplier on the liking boost
    pub reserve_scale: f32,
    /// Composed delta before clamping and before passive decay
    pub applied: DeltaVector,
    /// Simulated hours consumed
    pub hours: f32,
}

/// Result of a successful `apply`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub report: TransitionReport,
    pub snapshot: SessionSnapshot,
}

/// One subject and the constants governing it
#[derive(Debug, Clone)]
pub struct Session {
    subject: Subject,
    config: SimulationConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session at the default baseline, using the global config
    pub fn new() -> Self {
        Self::with_config(config().clone())
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        tracing::debug!("session started");
        Self {
            subject: Subject::new(),
            config,
        }
    }

    /// Session resuming an existing subject
    pub fn from_subject(mut subject: Subject, config: SimulationConfig) -> Self {
        subject.affect.clamp_all();
        Self { subject, config }
    }

    /// Session starting from a specific affect with empty history
    pub fn with_affect(affect: Affect) -> Self {
        Self::from_subject(Subject::with_affect(affect), config().clone())
    }

    /// Session for a subject created from `traits`
    pub fn with_traits(traits: Traits, config: SimulationConfig) -> Result<Self> {
        traits.validate()?;
        let subject = Subject::with_traits(traits, &config.traits);
        Ok(Self::from_subject(subject, config))
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_viable(&self) -> bool {
        self.subject.is_viable(&self.config.viability)
    }

    // === QUERIES ===

    /// Current state, history and fresh eligibility
    pub fn get_state(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.subject.affect.clone(),
            wanting: wanting(&self.subject, &self.config.wanting),
            history: self.subject.history.iter().collect(),
            clock_hours: self.subject.clock_hours,
            viable: self.is_viable(),
            catalog: Catalog::listing(&self.subject.affect, None),
        }
    }

    /// Catalog grouped by category, optionally restricted to one category
    pub fn list_actions(&self, category: Option<&str>) -> Result<CatalogView> {
        let filter = category.map(str::parse::<ActionCategory>).transpose()?;
        Ok(Catalog::listing(&self.subject.affect, filter))
    }

    // === TRANSITIONS ===

    /// Apply the named action
    ///
    /// Fails with `UnknownAction` or `IneligibleAction` without touching the
    /// subject.
    pub fn apply(&mut self, name: &str) -> Result<Transition> {
        let action = ActionId::lookup(name)?;
        let report = self.apply_action(action)?;
        Ok(Transition {
            report,
            snapshot: self.get_state(),
        })
    }

    /// Apply an already-resolved action, returning only the report
    pub fn apply_action(&mut self, action: ActionId) -> Result<TransitionReport> {
        let definition = action.definition();
        let availability = definition.availability(&self.subject.affect);
        if !availability.available {
            return Err(SimError::IneligibleAction(format!(
                "{}: {}",
                definition.name,
                availability.reason.unwrap_or_default()
            )));
        }

        let config = &self.config;
        let subject = &mut self.subject;
        let hours = definition.duration;
        let category = definition.category;

        // Modifiers are read from the state before any change lands
        let r = receptivity(&subject.affect, &config.receptivity);
        let t = subject.habituation.tolerance_factor(action, &config.tolerance);
        let optimum = subject
            .traits
            .yerkes_dodson_optimum(config.yerkes_dodson.optimum, &config.traits);
        let y = yerkes_dodson(subject.affect.anxiety, optimum, &config.yerkes_dodson);
        let carried = carryover(
            &subject.affect,
            subject.arousal_source,
            category,
            homeostasis::effective_baseline(subject, Dimension::Arousal, config),
            &config.carryover,
        );
        let numb = numbing(subject.affect.shutdown, &config.shutdown);
        let fit = appraisal(&subject.affect, category, &subject.traits, &config.appraisal);
        let severity = (-fit).max(0.0);
        let backfired = severity > 0.0;

        let raw = definition.base_effect(&subject.affect, carried.intensity);
        let absorb = r * t * y;

        let streak = subject.habituation.streak(action);
        let mut gain = absorb * carried.intensity * numb;
        let mut hedonic = subject.reserve.scale(&config.reserve);
        if let Some(previous) = streak {
            gain = gain.min(previous.gain);
            hedonic = hedonic.min(previous.hedonic);
        }

        let mut absorbing = DeltaVector::new();
        if !backfired {
            absorbing = raw.absorbing.scaled(gain / carried.intensity);
            let liking = absorbing.get(Dimension::LikingScore);
            if liking > 0.0 {
                absorbing.set(Dimension::LikingScore, liking * hedonic);
            }
        }

        let mut emotional = raw.unconditional;
        if backfired {
            let aversive = evaluate_effects(table::backfire(category), &subject.affect, 1.0);
            emotional = emotional.plus(&aversive.unconditional.scaled(severity));
        }
        if numb < 1.0 {
            for dimension in Dimension::ALL {
                if dimension != Dimension::Shutdown {
                    emotional.set(dimension, emotional.get(dimension) * numb);
                }
            }
        }

        let applied = absorbing.plus(&emotional).plus(&raw.mechanical);
        for (dimension, change) in applied.iter() {
            subject.affect.add(dimension, change);
        }
        if applied.get(Dimension::Arousal) > 0.0 {
            subject.arousal_source = Some(category);
        }

        if backfired {
            subject
                .cues
                .weaken(category, severity * config.cues.backfire_loss);
        } else {
            subject
                .reserve
                .draw(raw.absorbing.get(Dimension::LikingScore), &config.reserve);
            subject.cues.reinforce(category, config.cues.learning_rate(category));
            subject
                .aftereffects
                .extend(definition.aftereffects.iter().map(|after| PendingAftereffect {
                    dimension: after.dimension,
                    amount: after.amount * absorb,
                    delay_remaining: after.delay,
                    span_remaining: after.span,
                    span: after.span,
                }));
        }
        if definition.restorative {
            subject.reserve.restore(&config.reserve);
            subject.cues.fade(config.cues.restful_fade);
        }

        homeostasis::advance(subject, hours, &applied, config);
        subject.clock_hours += hours;

        subject.habituation.decay(hours, &config.tolerance);
        subject.habituation.record_use(action, &config.tolerance);
        subject.habituation.set_streak((!backfired).then_some(Streak {
            action,
            gain,
            hedonic,
        }));
        subject.history.push(action);

        if backfired {
            tracing::debug!("{} backfired with severity {:.2}", action, severity);
        }
        tracing::debug!(
            "{} ({}): R={:.3} T={:.3} Y={:.3} carried={:.1} numbing={:.2} gain={:.3} reserve={:.1} clock={:.2}h",
            action,
            category,
            r,
            t,
            y,
            carried.carried,
            numb,
            gain,
            subject.reserve.level(),
            subject.clock_hours
        );

        Ok(TransitionReport {
            action,
            category,
            receptivity: r,
            tolerance: t,
            yerkes_dodson: y,
            carried_arousal: carried.carried,
            intensity: carried.intensity,
            numbing: numb,
            appraisal: fit,
            backfire: severity,
            gain: if backfired { 0.0 } else { gain },
            reserve_scale: hedonic,
            applied,
            hours,
        })
    }

    /// Restore the trait-adjusted starting state and forget everything else
    pub fn reset(&mut self) -> SessionSnapshot {
        let traits = self.subject.traits.clone();
        self.subject = Subject::with_traits(traits, &self.config.traits);
        tracing::info!("session reset");
        self.get_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ReserveConfig;

    fn session() -> Session {
        Session::with_config(SimulationConfig::default())
    }

    #[test]
    fn test_rest_raises_energy_and_lowers_sleepiness() {
        let mut session = session();
        let before = session.subject().affect.clone();

        let transition = session.apply("rest").unwrap();

        assert!(transition.snapshot.state.energy > before.energy);
        assert!(transition.snapshot.state.sleepiness < before.sleepiness);
        assert_eq!(transition.snapshot.history, vec![ActionId::Rest]);
        assert!((transition.snapshot.clock_hours - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_action_is_pure() {
        let mut session = session();
        session.apply("rest").unwrap();
        let before = session.subject().clone();

        let err = session.apply("teleport").unwrap_err();

        assert_eq!(err.kind(), "UnknownAction");
        assert_eq!(session.subject(), &before);
    }

    #[test]
    fn test_ineligible_action_is_pure() {
        let mut session = Session::with_affect(Affect {
            hunger: 5.0,
            ..Affect::default()
        });
        let before = session.subject().clone();

        let err = session.apply("snack").unwrap_err();

        assert_eq!(err.kind(), "IneligibleAction");
        assert!(err.to_string().contains("hunger above 10"));
        assert_eq!(session.subject(), &before);
    }

    #[test]
    fn test_list_actions_validates_category() {
        let session = session();
        assert_eq!(
            session.list_actions(Some("gardening")).unwrap_err().kind(),
            "ValidationError"
        );
        let food = session.list_actions(Some("food")).unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(session.list_actions(None).unwrap().len(), ActionCategory::ALL.len());
    }

    #[test]
    fn test_stress_ignores_receptivity() {
        let mut session = Session::with_affect(Affect {
            anxiety: 90.0,
            sleepiness: 90.0,
            ..Affect::default()
        });

        let report = session.apply_action(ActionId::BadNews).unwrap();

        assert!(report.receptivity < 1.0);
        assert_eq!(report.applied.get(Dimension::Anxiety), 35.0);
    }

    #[test]
    fn test_arousal_source_tracks_last_arousing_category() {
        let mut session = session();
        session.apply("light_pain").unwrap();
        assert_eq!(session.subject().arousal_source, Some(ActionCategory::Pain));

        // Deep breathing lowers arousal, so the source stays put
        session.apply("deep_breathing").unwrap();
        assert_eq!(session.subject().arousal_source, Some(ActionCategory::Pain));
    }

    #[test]
    fn test_aftereffects_are_queued() {
        let mut session = session();
        session.apply("caffeine").unwrap();
        assert_eq!(session.subject().aftereffects.len(), 2);
    }

    #[test]
    fn test_shutdown_numbs_other_deltas() {
        let mut session = Session::with_affect(Affect {
            shutdown: 80.0,
            ..Affect::default()
        });

        let report = session.apply_action(ActionId::BadNews).unwrap();

        assert!((report.numbing - 0.75).abs() < 1e-6);
        assert!((report.applied.get(Dimension::Anxiety) - 35.0 * 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_mechanical_deltas_ignore_numbing() {
        let mut session = Session::with_config(SimulationConfig::default());
        session.subject.affect.shutdown = 80.0;
        session.subject.affect.hunger = 60.0;

        let report = session.apply_action(ActionId::Eat).unwrap();

        assert!((report.numbing - 0.75).abs() < 1e-6);
        assert_eq!(report.applied.get(Dimension::Hunger), -50.0);
        assert_eq!(report.applied.get(Dimension::Sleepiness), 12.0);
        assert!((report.applied.get(Dimension::Arousal) + 8.0 * 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_social_contact_in_panic_backfires() {
        let mut session = Session::with_config(SimulationConfig::default());
        session.subject.affect.anxiety = 100.0;

        let report = session.apply_action(ActionId::Cuddle).unwrap();

        assert!((report.appraisal + 0.2).abs() < 1e-5);
        assert!((report.backfire - 0.2).abs() < 1e-5);
        assert_eq!(report.gain, 0.0);
        assert_eq!(report.applied.get(Dimension::LikingScore), 0.0);
        assert!((report.applied.get(Dimension::Anxiety) - 5.0).abs() < 1e-4);
        assert!((report.applied.get(Dimension::Absorption) + 2.0).abs() < 1e-4);
        assert_eq!(session.subject().cues.get(ActionCategory::Social), 0.0);
        assert_eq!(session.subject().habituation.streak(ActionId::Cuddle), None);
    }

    #[test]
    fn test_backfire_skips_aftereffects_and_weakens_cues() {
        let mut session = Session::with_config(SimulationConfig::default());
        session.subject.cues.reinforce(ActionCategory::Substance, 0.5);
        session.subject.affect.anxiety = 100.0;

        let report = session.apply_action(ActionId::Caffeine).unwrap();

        // Full anxiety alone costs half the appraisal
        assert_eq!(report.backfire, 0.0);
        assert!((report.appraisal - 0.5).abs() < 1e-5);

        session.subject.affect.anxiety = 100.0;
        session.subject.affect.shutdown = 100.0;
        session.subject.aftereffects.clear();
        let report = session.apply_action(ActionId::Caffeine).unwrap();

        assert!(report.backfire > 0.0);
        assert!(session.subject().aftereffects.is_empty());
        assert!(session.subject().cues.get(ActionCategory::Substance) < 0.575);
    }

    #[test]
    fn test_repeat_is_capped_at_previous_gain() {
        let mut session = Session::with_config(SimulationConfig::default());
        session.subject.habituation.set_streak(Some(Streak {
            action: ActionId::Caffeine,
            gain: 0.1,
            hedonic: 0.5,
        }));

        let report = session.apply_action(ActionId::Caffeine).unwrap();

        assert!((report.gain - 0.1).abs() < 1e-6);
        assert_eq!(report.reserve_scale, 0.5);
        assert!((report.applied.get(Dimension::Energy) - 1.0).abs() < 1e-5);
        assert!((report.applied.get(Dimension::LikingScore) - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_streak_of_another_action_is_no_cap() {
        let mut session = Session::with_config(SimulationConfig::default());
        session.subject.habituation.set_streak(Some(Streak {
            action: ActionId::Alcohol,
            gain: 0.1,
            hedonic: 0.5,
        }));

        let report = session.apply_action(ActionId::Caffeine).unwrap();

        assert!(report.gain > 0.5);
        assert_eq!(report.reserve_scale, 1.0);
    }

    #[test]
    fn test_liking_boost_draws_reserve() {
        let mut session = Session::with_config(SimulationConfig::default());

        let first = session.apply_action(ActionId::Stimulant).unwrap();
        let level = session.subject().reserve.level();
        let second = session.apply_action(ActionId::Cuddle).unwrap();

        assert_eq!(first.reserve_scale, 1.0);
        assert!(level < 100.0);
        assert!(second.reserve_scale < 1.0);
    }

    #[test]
    fn test_sleep_restores_reserve_and_fades_cues() {
        let mut session = Session::with_config(SimulationConfig::default());
        session.subject.affect.energy = 40.0;
        session.subject.reserve.draw(100.0, &ReserveConfig::default());
        session.subject.cues.reinforce(ActionCategory::Substance, 0.3);

        session.apply_action(ActionId::Sleep).unwrap();

        // 50 - 2 drawn + 40 restored + 2h of replenishment
        assert!((session.subject().reserve.level() - 98.0).abs() < 1e-3);
        assert!((session.subject().cues.get(ActionCategory::Substance) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_good_experiences_build_wanting() {
        let mut session = session();
        let before = session.get_state().wanting;

        session.apply("stimulant").unwrap();

        assert!((session.subject().cues.get(ActionCategory::Substance) - 0.075).abs() < 1e-6);
        assert_eq!(session.subject().cues.get(ActionCategory::Rest), 0.0);
        assert!(session.get_state().wanting > before);
    }

    #[test]
    fn test_traits_shape_start_and_reset() {
        let traits = Traits {
            testosterone: 100.0,
            ..Traits::default()
        };
        let mut session = Session::with_traits(traits.clone(), SimulationConfig::default()).unwrap();
        assert_eq!(session.subject().affect.arousal, 30.0);

        session.apply("deadline").unwrap();
        let snapshot = session.reset();

        assert_eq!(snapshot.state.arousal, 30.0);
        assert_eq!(session.subject().traits, traits);
    }

    #[test]
    fn test_invalid_traits_are_rejected() {
        let traits = Traits {
            ssri: -5.0,
            ..Traits::default()
        };
        let err = Session::with_traits(traits, SimulationConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut session = session();
        session.apply("stimulant").unwrap();
        session.apply("cuddle").unwrap();

        let snapshot = session.reset();

        assert_eq!(snapshot.state, Affect::default());
        assert!(snapshot.history.is_empty());
        assert_eq!(snapshot.clock_hours, 0.0);
        assert_eq!(session.subject(), &Subject::new());
    }
}
