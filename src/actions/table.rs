//! The authored action table
//!
//! One entry per action, in `ActionId` order. Every effect is written out by
//! hand; nothing here is derived or learned.

use crate::actions::catalog::{ActionCategory, ActionDefinition, ActionId};
use crate::actions::effects::{Aftereffect, Effect, Requirement};
use crate::entity::affect::Dimension::*;

pub static DEFINITIONS: [ActionDefinition; ActionId::COUNT] = [
    // === FOOD ===
    ActionDefinition {
        id: ActionId::Snack,
        name: "snack",
        category: ActionCategory::Food,
        description: "Have a light snack",
        duration: 0.1,
        effects: &[
            Effect::mechanical(Hunger, -15.0),
            Effect::absorbing(LikingScore, 3.0),
            Effect::absorbing(Energy, 2.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Above(Hunger, 10.0),
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::Eat,
        name: "eat",
        category: ActionCategory::Food,
        description: "Eat a full meal (causes drowsiness)",
        duration: 0.5,
        effects: &[
            Effect::mechanical(Hunger, -50.0),
            Effect::absorbing(LikingScore, 6.0),
            Effect::absorbing(Energy, 5.0),
            Effect::mechanical(Sleepiness, 12.0),
            Effect::unconditional(Arousal, -8.0),
            Effect::unconditional(Prefrontal, -5.0),
        ],
        // Post-meal drowsiness builds while digesting
        aftereffects: &[Aftereffect::new(Sleepiness, 10.0, 0.25, 1.5)],
        requirement: Requirement::Above(Hunger, 25.0),
        restorative: false,
    },
    // === REST ===
    ActionDefinition {
        id: ActionId::Rest,
        name: "rest",
        category: ActionCategory::Rest,
        description: "Rest quietly",
        duration: 0.25,
        effects: &[
            Effect::absorbing(Energy, 6.0),
            Effect::absorbing(Sleepiness, -4.0),
            Effect::unconditional(Prefrontal, 5.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Always,
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::Wait,
        name: "wait",
        category: ActionCategory::Rest,
        description: "Wait, do nothing",
        duration: 0.25,
        effects: &[Effect::mechanical(Energy, 1.0)],
        aftereffects: &[],
        requirement: Requirement::Always,
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::Sleep,
        name: "sleep",
        category: ActionCategory::Rest,
        description: "Take a restful nap",
        duration: 2.0,
        effects: &[
            Effect::mechanical(Energy, 35.0),
            Effect::settle(Sleepiness, 10.0, 1.0),
            Effect::settle(Arousal, 10.0, 1.0),
            Effect::settle(Prefrontal, 60.0, 1.0),
            Effect::unconditional(Anxiety, -10.0),
            Effect::mechanical(Hunger, 10.0),
            Effect::absorbing(LikingScore, 4.0),
        ],
        aftereffects: &[],
        requirement: Requirement::AnyOf(&[
            Requirement::Below(Energy, 60.0),
            Requirement::Above(Sleepiness, 50.0),
        ]),
        restorative: true,
    },
    // === SOCIAL ===
    ActionDefinition {
        id: ActionId::Cuddle,
        name: "cuddle",
        category: ActionCategory::Social,
        description: "Intimate cuddling and touch",
        duration: 0.5,
        effects: &[
            Effect::absorbing(LikingScore, 12.0),
            Effect::absorbing(Absorption, 8.0),
            Effect::absorbing(Anxiety, -6.0),
            Effect::absorbing(Arousal, 5.0),
            Effect::unconditional(Prefrontal, -5.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Always,
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::Conversation,
        name: "conversation",
        category: ActionCategory::Social,
        description: "Talk with a close friend",
        duration: 0.5,
        effects: &[
            Effect::absorbing(LikingScore, 7.0),
            Effect::absorbing(Anxiety, -4.0),
            Effect::unconditional(Prefrontal, 4.0),
            Effect::unconditional(Energy, -3.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Above(Energy, 15.0),
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::Massage,
        name: "massage",
        category: ActionCategory::Social,
        description: "Receive a relaxing massage",
        duration: 0.5,
        effects: &[
            Effect::absorbing(LikingScore, 10.0),
            Effect::absorbing(Energy, 5.0),
            Effect::absorbing(Absorption, 6.0),
            Effect::absorbing(Anxiety, -8.0),
            Effect::unconditional(Prefrontal, -10.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Always,
        restorative: false,
    },
    // === PAIN ===
    ActionDefinition {
        id: ActionId::LightPain,
        name: "light_pain",
        category: ActionCategory::Pain,
        description: "Light pain stimulus (pinching, a sharp slap)",
        duration: 0.1,
        effects: &[
            Effect::unconditional(Arousal, 10.0),
            Effect::unconditional(Anxiety, 4.0),
            Effect::unconditional(Prefrontal, -5.0),
            // Endorphin release
            Effect::absorbing(LikingScore, 6.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Always,
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::ColdShower,
        name: "cold_shower",
        category: ActionCategory::Pain,
        description: "Take an ice-cold shower",
        duration: 0.1,
        effects: &[
            Effect::unconditional(Arousal, 15.0),
            Effect::unconditional(Sleepiness, -10.0),
            Effect::unconditional(Anxiety, 3.0),
            Effect::absorbing(Energy, 8.0),
            Effect::absorbing(LikingScore, 4.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Above(Energy, 10.0),
        restorative: false,
    },
    // === BREATHWORK ===
    ActionDefinition {
        id: ActionId::DeepBreathing,
        name: "deep_breathing",
        category: ActionCategory::Breathwork,
        description: "Deep, slow breathing exercises",
        duration: 0.25,
        effects: &[
            Effect::absorbing(Anxiety, -10.0),
            Effect::absorbing(LikingScore, 3.0),
            Effect::absorbing(Energy, 2.0),
            Effect::unconditional(Arousal, -5.0),
            Effect::unconditional(Prefrontal, -5.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Always,
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::HolotropicBreathing,
        name: "holotropic_breathing",
        category: ActionCategory::Breathwork,
        description: "Intense holotropic breathwork",
        duration: 0.5,
        effects: &[
            Effect::absorbing(LikingScore, 12.0),
            Effect::absorbing(Absorption, 20.0),
            Effect::unconditional(Arousal, 15.0),
            Effect::unconditional(Prefrontal, -25.0),
            Effect::unconditional(Energy, -10.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Above(Energy, 30.0),
        restorative: false,
    },
    // === SUBSTANCE ===
    ActionDefinition {
        id: ActionId::Caffeine,
        name: "caffeine",
        category: ActionCategory::Substance,
        description: "Drink a strong coffee",
        duration: 1.0,
        effects: &[
            Effect::absorbing(Energy, 10.0),
            Effect::absorbing(Sleepiness, -15.0),
            Effect::absorbing(LikingScore, 2.0),
            Effect::unconditional(Arousal, 8.0),
            Effect::unconditional(Anxiety, 5.0),
        ],
        aftereffects: &[
            Aftereffect::new(Energy, -6.0, 2.0, 2.0),
            Aftereffect::new(Sleepiness, 8.0, 2.0, 2.0),
        ],
        requirement: Requirement::Always,
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::Alcohol,
        name: "alcohol",
        category: ActionCategory::Substance,
        description: "Have a few drinks",
        duration: 1.5,
        effects: &[
            Effect::absorbing(LikingScore, 10.0),
            Effect::absorbing(Anxiety, -15.0),
            Effect::absorbing(Arousal, 4.0),
            Effect::unconditional(Prefrontal, -15.0),
            Effect::unconditional(Sleepiness, 10.0),
        ],
        aftereffects: &[
            Aftereffect::new(Anxiety, 8.0, 2.0, 3.0),
            Aftereffect::new(Energy, -8.0, 2.0, 3.0),
        ],
        requirement: Requirement::Above(Energy, 15.0),
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::Stimulant,
        name: "stimulant",
        category: ActionCategory::Substance,
        description: "Take a strong stimulant (euphoria, then a crash)",
        duration: 0.5,
        effects: &[
            Effect::absorbing(LikingScore, 18.0),
            Effect::absorbing(Energy, 15.0),
            Effect::absorbing(Absorption, 10.0),
            Effect::unconditional(Arousal, 25.0),
            Effect::unconditional(Anxiety, 5.0),
            Effect::unconditional(Prefrontal, 5.0),
        ],
        aftereffects: &[
            Aftereffect::new(Energy, -25.0, 0.5, 2.0),
            Aftereffect::new(Anxiety, 15.0, 0.5, 2.0),
            Aftereffect::new(LikingScore, -10.0, 0.5, 2.0),
        ],
        requirement: Requirement::Above(Energy, 20.0),
        restorative: false,
    },
    // === STRESS ===
    ActionDefinition {
        id: ActionId::Deadline,
        name: "deadline",
        category: ActionCategory::Stress,
        description: "Work against a tight deadline",
        duration: 1.0,
        effects: &[
            Effect::unconditional(Anxiety, 15.0),
            Effect::unconditional(Arousal, 12.0),
            Effect::unconditional(Prefrontal, 10.0),
            Effect::unconditional(Energy, -8.0),
            Effect::unconditional(LikingScore, -3.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Above(Energy, 10.0),
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::BadNews,
        name: "bad_news",
        category: ActionCategory::Stress,
        description: "Receive alarming news",
        duration: 0.1,
        effects: &[
            Effect::unconditional(Anxiety, 35.0),
            Effect::unconditional(LikingScore, -8.0),
            Effect::unconditional(Arousal, 8.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Always,
        restorative: false,
    },
    ActionDefinition {
        id: ActionId::Crisis,
        name: "crisis",
        category: ActionCategory::Stress,
        description: "Go through an overwhelming crisis",
        duration: 0.5,
        effects: &[
            Effect::unconditional(Anxiety, 30.0),
            Effect::unconditional(Energy, -20.0),
            Effect::unconditional(Shutdown, 30.0),
            Effect::unconditional(LikingScore, -15.0),
            Effect::unconditional(Arousal, 10.0),
        ],
        aftereffects: &[],
        requirement: Requirement::Always,
        restorative: false,
    },
];

/// Aversive consequences of a backfired action, per unit of severity
pub fn backfire(category: ActionCategory) -> &'static [Effect] {
    match category {
        // Company while panicking spirals into rumination
        ActionCategory::Social => const { &[
            Effect::unconditional(Anxiety, 25.0),
            Effect::unconditional(Absorption, -10.0),
            Effect::unconditional(Prefrontal, 15.0),
        ] },
        ActionCategory::Pain => const { &[
            Effect::unconditional(Anxiety, 20.0),
            Effect::unconditional(Absorption, -10.0),
        ] },
        ActionCategory::Breathwork => const { &[Effect::unconditional(Anxiety, 15.0)] },
        ActionCategory::Food => const { &[
            Effect::unconditional(Anxiety, 10.0),
            Effect::unconditional(Sleepiness, 5.0),
        ] },
        // A bad trip can tip straight into collapse
        ActionCategory::Substance => const { &[
            Effect::unconditional(Anxiety, 30.0),
            Effect::unconditional(Absorption, -15.0),
            Effect::unconditional(Shutdown, 50.0),
        ] },
        ActionCategory::Rest | ActionCategory::Stress => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::effects::Channel;

    #[test]
    fn test_durations_are_positive() {
        for definition in DEFINITIONS.iter() {
            assert!(definition.duration > 0.0, "{} has no duration", definition.name);
        }
    }

    #[test]
    fn test_aftereffects_have_positive_span() {
        for definition in DEFINITIONS.iter() {
            for after in definition.aftereffects {
                assert!(after.span > 0.0, "{} has a zero-span aftereffect", definition.name);
                assert!(after.delay >= 0.0);
            }
        }
    }

    #[test]
    fn test_hunger_changes_are_mechanical() {
        for definition in DEFINITIONS.iter() {
            for effect in definition.effects.iter().filter(|e| e.dimension == Hunger) {
                assert_eq!(effect.channel, Channel::Mechanical, "{}", definition.name);
            }
        }
    }

    #[test]
    fn test_only_sleep_is_restorative() {
        let restorative: Vec<_> = DEFINITIONS.iter().filter(|d| d.restorative).map(|d| d.id).collect();
        assert_eq!(restorative, vec![ActionId::Sleep]);
    }

    #[test]
    fn test_backfires_are_aversive() {
        for category in ActionCategory::ALL {
            for effect in backfire(category) {
                assert_eq!(effect.channel, Channel::Unconditional);
                assert!(effect.dimension != LikingScore);
            }
        }
        assert!(backfire(ActionCategory::Rest).is_empty());
        assert!(!backfire(ActionCategory::Social).is_empty());
    }

    #[test]
    fn test_stress_actions_are_never_dampened() {
        for definition in DEFINITIONS.iter().filter(|d| d.category == ActionCategory::Stress) {
            assert!(definition
                .effects
                .iter()
                .all(|e| e.channel == Channel::Unconditional));
        }
    }
}
