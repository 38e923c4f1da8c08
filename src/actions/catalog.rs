//! Action definitions and catalog

use crate::actions::effects::{evaluate_effects, Aftereffect, Effect, RawDelta, Requirement};
use crate::actions::table::DEFINITIONS;
use crate::core::error::SimError;
use crate::entity::affect::Affect;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Unique action identifier
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    #[display(fmt = "snack")]
    Snack,
    #[display(fmt = "eat")]
    Eat,
    #[display(fmt = "rest")]
    Rest,
    #[display(fmt = "wait")]
    Wait,
    #[display(fmt = "sleep")]
    Sleep,
    #[display(fmt = "cuddle")]
    Cuddle,
    #[display(fmt = "conversation")]
    Conversation,
    #[display(fmt = "massage")]
    Massage,
    #[display(fmt = "light_pain")]
    LightPain,
    #[display(fmt = "cold_shower")]
    ColdShower,
    #[display(fmt = "deep_breathing")]
    DeepBreathing,
    #[display(fmt = "holotropic_breathing")]
    HolotropicBreathing,
    #[display(fmt = "caffeine")]
    Caffeine,
    #[display(fmt = "alcohol")]
    Alcohol,
    #[display(fmt = "stimulant")]
    Stimulant,
    #[display(fmt = "deadline")]
    Deadline,
    #[display(fmt = "bad_news")]
    BadNews,
    #[display(fmt = "crisis")]
    Crisis,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    #[display(fmt = "food")]
    Food,
    #[display(fmt = "rest")]
    Rest,
    #[display(fmt = "social")]
    Social,
    #[display(fmt = "pain")]
    Pain,
    #[display(fmt = "breathwork")]
    Breathwork,
    #[display(fmt = "substance")]
    Substance,
    #[display(fmt = "stress")]
    Stress,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 7] = [
        ActionCategory::Food,
        ActionCategory::Rest,
        ActionCategory::Social,
        ActionCategory::Pain,
        ActionCategory::Breathwork,
        ActionCategory::Substance,
        ActionCategory::Stress,
    ];
}

impl FromStr for ActionCategory {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionCategory::ALL
            .into_iter()
            .find(|c| c.to_string() == s)
            .ok_or_else(|| SimError::Validation(format!("unknown category '{}'", s)))
    }
}

impl ActionId {
    pub const COUNT: usize = 18;

    pub const ALL: [ActionId; ActionId::COUNT] = [
        ActionId::Snack,
        ActionId::Eat,
        ActionId::Rest,
        ActionId::Wait,
        ActionId::Sleep,
        ActionId::Cuddle,
        ActionId::Conversation,
        ActionId::Massage,
        ActionId::LightPain,
        ActionId::ColdShower,
        ActionId::DeepBreathing,
        ActionId::HolotropicBreathing,
        ActionId::Caffeine,
        ActionId::Alcohol,
        ActionId::Stimulant,
        ActionId::Deadline,
        ActionId::BadNews,
        ActionId::Crisis,
    ];

    /// The immutable definition for this action
    pub fn definition(self) -> &'static ActionDefinition {
        &DEFINITIONS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Resolve an identifier received at the boundary
    pub fn lookup(name: &str) -> Result<Self, SimError> {
        name.parse()
    }
}

impl FromStr for ActionId {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DEFINITIONS
            .iter()
            .find(|d| d.name == s)
            .map(|d| d.id)
            .ok_or_else(|| SimError::UnknownAction(s.to_string()))
    }
}

/// One entry of the action table
#[derive(Debug)]
pub struct ActionDefinition {
    pub id: ActionId,
    pub name: &'static str,
    pub category: ActionCategory,
    pub description: &'static str,
    /// Hours consumed when applied
    pub duration: f32,
    pub effects: &'static [Effect],
    pub aftereffects: &'static [Aftereffect],
    pub requirement: Requirement,
    /// Sleep-like: refills the hedonic reserve and fades learned cues
    pub restorative: bool,
}

impl ActionDefinition {
    pub fn can_apply(&self, affect: &Affect) -> bool {
        self.requirement.is_met(affect)
    }

    pub fn availability(&self, affect: &Affect) -> ActionAvailability {
        if self.can_apply(affect) {
            ActionAvailability::yes()
        } else {
            ActionAvailability::no(format!("requires {}", self.requirement.describe()))
        }
    }

    /// Base-effect rule: raw per-channel deltas before modifiers
    pub fn base_effect(&self, affect: &Affect, intensity: f32) -> RawDelta {
        evaluate_effects(self.effects, affect, intensity)
    }
}

pub struct ActionAvailability {
    pub available: bool,
    pub reason: Option<String>,
}

impl ActionAvailability {
    pub fn yes() -> Self {
        Self { available: true, reason: None }
    }

    pub fn no(reason: impl Into<String>) -> Self {
        Self { available: false, reason: Some(reason.into()) }
    }
}

/// Presentation row of the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionListing {
    pub name: &'static str,
    pub description: &'static str,
    pub duration: f32,
    pub can_apply: bool,
}

/// Category -> actions in table order, with eligibility evaluated fresh
pub type CatalogView = BTreeMap<ActionCategory, Vec<ActionListing>>;

/// Read-only view over the process-wide action table
pub struct Catalog;

impl Catalog {
    pub fn definitions() -> &'static [ActionDefinition] {
        &DEFINITIONS
    }

    /// Group actions by category, optionally restricted to one category
    pub fn listing(affect: &Affect, filter: Option<ActionCategory>) -> CatalogView {
        let mut view = CatalogView::new();
        for definition in DEFINITIONS.iter() {
            if filter.is_some_and(|c| c != definition.category) {
                continue;
            }
            view.entry(definition.category).or_default().push(ActionListing {
                name: definition.name,
                description: definition.description,
                duration: definition.duration,
                can_apply: definition.can_apply(affect),
            });
        }
        view
    }
}
