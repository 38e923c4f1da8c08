//! Learned cue salience per action category
//!
//! Good experiences make a category more wanted, backfires make it less so.
//! Salience is independent of liking: a category can be wanted more even as
//! tolerance makes it feel less good.

use crate::actions::catalog::ActionCategory;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueSalience {
    salience: AHashMap<ActionCategory, f32>,
}

impl CueSalience {
    pub fn new() -> Self {
        Self::default()
    }

    /// Salience in [0, 1]; 0 for categories never learned
    pub fn get(&self, category: ActionCategory) -> f32 {
        self.salience.get(&category).copied().unwrap_or(0.0)
    }

    pub fn reinforce(&mut self, category: ActionCategory, amount: f32) {
        if amount > 0.0 {
            let entry = self.salience.entry(category).or_insert(0.0);
            *entry = (*entry + amount).min(1.0);
        }
    }

    pub fn weaken(&mut self, category: ActionCategory, amount: f32) {
        if let Some(value) = self.salience.get_mut(&category) {
            *value = (*value - amount).max(0.0);
        }
        self.salience.retain(|_, v| *v > 0.0);
    }

    /// Lower every category by `amount`
    pub fn fade(&mut self, amount: f32) {
        for value in self.salience.values_mut() {
            *value = (*value - amount).max(0.0);
        }
        self.salience.retain(|_, v| *v > 0.0);
    }

    /// Salience of the most wanted category
    pub fn strongest(&self) -> f32 {
        self.salience.values().copied().fold(0.0, f32::max)
    }
}
